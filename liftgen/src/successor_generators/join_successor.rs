//! This module defines [JoinSuccessorGenerator].

use liftgen_physical::{
    meta::timing::TimedCode,
    tabular::{
        operations::{cartesian_product, project},
        table::Table,
    },
};

use crate::{
    components::{Atom, ObjectId, Variable},
    error::Error,
    execution::JoinProgram,
    parameters::GroundingParameters,
    state::{DBState, RelationSource},
    task::{ActionSchema, Task},
};

use super::{
    ordering::{inverse_arity_order, JoinOrdering},
    GroundAction, SuccessorGenerator,
};

/// Successor generator that finds applicable actions
/// by joining the relations of the preconditions of an action schema
#[derive(Debug, Clone, Copy)]
pub struct JoinSuccessorGenerator<'a> {
    task: &'a Task,
    ordering: JoinOrdering,
    timing: bool,
}

impl<'a> JoinSuccessorGenerator<'a> {
    /// Create a new [JoinSuccessorGenerator] that folds preconditions in the given order.
    pub fn new(task: &'a Task, ordering: JoinOrdering) -> Self {
        Self {
            task,
            ordering,
            timing: false,
        }
    }

    /// Create a [JoinSuccessorGenerator] that folds preconditions of higher arity first.
    pub fn inverse_ordered(task: &'a Task) -> Self {
        Self::new(task, inverse_arity_order)
    }

    /// Create a [JoinSuccessorGenerator] as configured by the given parameters.
    pub fn with_parameters(task: &'a Task, parameters: &GroundingParameters) -> Self {
        Self {
            task,
            ordering: parameters.join_ordering.ordering(),
            timing: parameters.timing,
        }
    }

    /// Build the join program for the given precondition atoms.
    pub fn build_join_program(
        &self,
        precondition: &[Atom],
        state: &DBState,
    ) -> Result<JoinProgram, Error> {
        let order = (self.ordering)(precondition);
        Ok(JoinProgram::build(precondition, &order, state)?)
    }

    /// Extend the bindings with every object for each parameter that they do not bind.
    fn bind_free_parameters(&self, schema: &ActionSchema, mut bindings: Table) -> Result<Table, Error> {
        for parameter in (0..schema.num_parameters()).map(Variable) {
            if bindings.is_empty() {
                break;
            }
            if bindings.contains_marker(parameter.marker()) {
                continue;
            }

            let objects = Table::from_rows(
                vec![parameter.marker()],
                self.task.object_ids().map(|object| vec![object.0]),
            )?;
            bindings = cartesian_product(&bindings, &objects);
        }

        Ok(bindings)
    }

    fn compute_applicable_actions(
        &self,
        schema: &ActionSchema,
        state: &DBState,
    ) -> Result<Vec<GroundAction>, Error> {
        let (nullary, positive): (Vec<&Atom>, Vec<&Atom>) = schema
            .preconditions()
            .iter()
            .partition(|atom| atom.is_nullary());

        if !nullary
            .iter()
            .all(|atom| state.holds_nullary(atom.predicate()))
        {
            return Ok(Vec::new());
        }
        if schema
            .negative_preconditions()
            .iter()
            .any(|atom| atom.is_nullary() && state.holds_nullary(atom.predicate()))
        {
            return Ok(Vec::new());
        }

        let positive = positive.into_iter().cloned().collect::<Vec<_>>();
        let program = self.build_join_program(&positive, state)?;
        let bindings = self.bind_free_parameters(schema, program.evaluate())?;
        if bindings.is_empty() {
            log::debug!("No applicable actions of {schema}");
            return Ok(Vec::new());
        }

        let parameters = (0..schema.num_parameters())
            .map(|parameter| Variable(parameter).marker())
            .collect::<Vec<_>>();
        let bindings = project(&bindings, &parameters)?;

        let mut result = Vec::with_capacity(bindings.len());
        for row in bindings.rows() {
            let arguments = row.iter().copied().map(ObjectId).collect::<Vec<_>>();

            let violates_negative = schema
                .negative_preconditions()
                .iter()
                .filter(|atom| !atom.is_nullary())
                .filter_map(|atom| atom.ground(|variable| arguments.get(variable.0).copied()))
                .any(|atom| state.contains(&atom));

            if !violates_negative {
                result.push(GroundAction::new(schema.index(), arguments));
            }
        }

        result.sort_unstable();
        result.dedup();

        log::debug!("{} applicable actions of {schema}", result.len());
        Ok(result)
    }
}

impl SuccessorGenerator for JoinSuccessorGenerator<'_> {
    fn task(&self) -> &Task {
        self.task
    }

    fn applicable_actions(
        &self,
        schema: &ActionSchema,
        state: &DBState,
    ) -> Result<Vec<GroundAction>, Error> {
        if self.timing {
            TimedCode::measure("Search/Applicable actions", || {
                self.compute_applicable_actions(schema, state)
            })
        } else {
            self.compute_applicable_actions(schema, state)
        }
    }
}
