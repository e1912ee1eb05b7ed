//! This module defines the interface through which a search enumerates
//! the applicable actions of a state and their successor states.

pub mod join_successor;
pub mod ordering;

use std::fmt::Display;

use itertools::Itertools;

use crate::{
    components::{ObjectId, Variable},
    error::Error,
    state::DBState,
    task::{ActionSchema, Task},
};

pub use join_successor::JoinSuccessorGenerator;
pub use ordering::{declaration_order, inverse_arity_order, JoinOrdering};

/// An action schema together with one object per parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroundAction {
    schema: usize,
    arguments: Vec<ObjectId>,
}

impl GroundAction {
    /// Create a new [GroundAction].
    pub fn new(schema: usize, arguments: Vec<ObjectId>) -> Self {
        Self { schema, arguments }
    }

    /// Return the index of the action schema.
    pub fn schema(&self) -> usize {
        self.schema
    }

    /// Return the object assigned to each parameter.
    pub fn arguments(&self) -> &[ObjectId] {
        &self.arguments
    }
}

impl Display for GroundAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.schema, self.arguments.iter().join(", "))
    }
}

/// Enumerates applicable actions and computes successor states
pub trait SuccessorGenerator {
    /// Return the task whose actions are generated.
    fn task(&self) -> &Task;

    /// Return all ground actions of `schema` that are applicable in `state`.
    fn applicable_actions(
        &self,
        schema: &ActionSchema,
        state: &DBState,
    ) -> Result<Vec<GroundAction>, Error>;

    /// Return the state obtained by applying `action` in `state`.
    ///
    /// The delete effects are applied before the add effects.
    fn generate_successor(
        &self,
        action: &GroundAction,
        state: &DBState,
    ) -> Result<DBState, Error> {
        let schema = self.task().action_schema(action.schema())?;
        if schema.num_parameters() != action.arguments().len() {
            return Err(Error::ActionArityMismatch {
                schema: action.schema(),
                expected: schema.num_parameters(),
                found: action.arguments().len(),
            });
        }

        let binding = |variable: Variable| action.arguments().get(variable.0).copied();
        let mut successor = state.clone();

        for effect in schema.delete_effects() {
            if let Some(atom) = effect.ground(binding) {
                successor.remove(&atom);
            }
        }
        for effect in schema.add_effects() {
            if let Some(atom) = effect.ground(binding) {
                successor.insert(atom);
            }
        }

        Ok(successor)
    }
}
