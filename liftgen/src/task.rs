//! This module defines [Task], a lifted classical planning task.

pub mod action_schema;

use thiserror::Error;

use crate::{
    components::{Argument, Atom, GroundAtom, ObjectId, PredicateId, Variable},
    state::DBState,
};

pub use action_schema::ActionSchema;

/// Prefix of the predicate names reserved for auxiliary predicates
pub const RESERVED_PREFIX: &str = "@";

/// Errors in the description of a [Task]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// An atom uses a predicate that was not declared
    #[error("The predicate {0} is not declared")]
    UnknownPredicate(PredicateId),
    /// An atom uses an object that was not declared
    #[error("The object {0} is not declared")]
    UnknownObject(ObjectId),
    /// An action schema index does not refer to a schema of the task
    #[error("There is no action schema with index {0}")]
    UnknownActionSchema(usize),
    /// Number of arguments of an atom does not match its predicate
    #[error("Predicate \"{predicate}\" has arity {expected} but is used with {found} arguments")]
    PredicateArityMismatch {
        /// Name of the predicate
        predicate: String,
        /// Declared arity
        expected: usize,
        /// Number of arguments in the atom
        found: usize,
    },
    /// An action schema uses a variable that is not one of its parameters
    #[error("Action schema \"{schema}\" has {parameters} parameters and cannot use variable {variable}")]
    VariableOutOfRange {
        /// Name of the action schema
        schema: String,
        /// The offending variable
        variable: Variable,
        /// Number of parameters of the schema
        parameters: usize,
    },
    /// Two predicates share a name
    #[error("The predicate \"{0}\" is declared more than once")]
    DuplicatePredicate(String),
    /// Two objects share a name
    #[error("The object \"{0}\" is declared more than once")]
    DuplicateObject(String),
    /// Two action schemas share a name
    #[error("The action schema \"{0}\" is declared more than once")]
    DuplicateActionSchema(String),
    /// A predicate name uses the prefix reserved for auxiliary predicates
    #[error("The predicate name \"{0}\" is reserved")]
    ReservedPredicateName(String),
}

/// A predicate symbol of a [Task]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    name: String,
    arity: usize,
}

impl Predicate {
    /// Create a new [Predicate].
    pub fn new(name: String, arity: usize) -> Self {
        Self { name, arity }
    }

    /// Return the name of this predicate.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the arity of this predicate.
    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// A lifted planning task
///
/// Every atom that is added to the task is checked against
/// the declared predicates and objects.
#[derive(Debug, Clone)]
pub struct Task {
    name: String,
    predicates: Vec<Predicate>,
    objects: Vec<String>,
    action_schemas: Vec<ActionSchema>,
    initial_state: DBState,
    goal: Vec<GroundAtom>,
}

impl Task {
    /// Create a new empty [Task].
    pub fn new<Name: Into<String>>(name: Name) -> Self {
        Self {
            name: name.into(),
            predicates: Vec::new(),
            objects: Vec::new(),
            action_schemas: Vec::new(),
            initial_state: DBState::new(0),
            goal: Vec::new(),
        }
    }

    /// Return the name of this task.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a new predicate.
    pub fn add_predicate<Name: Into<String>>(
        &mut self,
        name: Name,
        arity: usize,
    ) -> Result<PredicateId, TaskError> {
        let name = name.into();
        if name.starts_with(RESERVED_PREFIX) {
            return Err(TaskError::ReservedPredicateName(name));
        }
        if self.predicate_id(&name).is_some() {
            return Err(TaskError::DuplicatePredicate(name));
        }

        let id = PredicateId(self.predicates.len());
        log::trace!("declared predicate {id}: {name}/{arity}");
        self.predicates.push(Predicate::new(name, arity));

        Ok(id)
    }

    /// Declare a new object.
    pub fn add_object<Name: Into<String>>(&mut self, name: Name) -> Result<ObjectId, TaskError> {
        let name = name.into();
        if self.object_id(&name).is_some() {
            return Err(TaskError::DuplicateObject(name));
        }

        let id = ObjectId(self.objects.len());
        self.objects.push(name);

        Ok(id)
    }

    /// Add an action schema and return its index.
    pub fn add_action_schema(&mut self, mut schema: ActionSchema) -> Result<usize, TaskError> {
        if self
            .action_schemas
            .iter()
            .any(|existing| existing.name() == schema.name())
        {
            return Err(TaskError::DuplicateActionSchema(schema.name().to_string()));
        }

        for atom in schema.atoms() {
            self.validate_atom(atom)?;

            for variable in atom.variables() {
                if variable.0 >= schema.num_parameters() {
                    return Err(TaskError::VariableOutOfRange {
                        schema: schema.name().to_string(),
                        variable,
                        parameters: schema.num_parameters(),
                    });
                }
            }
        }

        let index = self.action_schemas.len();
        schema.set_index(index);
        self.action_schemas.push(schema);

        Ok(index)
    }

    /// Add an atom to the initial state.
    pub fn add_initial_atom(&mut self, atom: GroundAtom) -> Result<(), TaskError> {
        self.validate_ground_atom(&atom)?;
        self.initial_state.insert(atom);

        Ok(())
    }

    /// Add an atom to the goal.
    pub fn add_goal_atom(&mut self, atom: GroundAtom) -> Result<(), TaskError> {
        self.validate_ground_atom(&atom)?;
        if !self.goal.contains(&atom) {
            self.goal.push(atom);
        }

        Ok(())
    }

    fn validate_predicate(&self, predicate: PredicateId, found: usize) -> Result<(), TaskError> {
        let declared = self
            .predicate(predicate)
            .ok_or(TaskError::UnknownPredicate(predicate))?;

        if declared.arity() != found {
            return Err(TaskError::PredicateArityMismatch {
                predicate: declared.name().to_string(),
                expected: declared.arity(),
                found,
            });
        }

        Ok(())
    }

    fn validate_object(&self, object: ObjectId) -> Result<(), TaskError> {
        if object.0 < self.objects.len() {
            Ok(())
        } else {
            Err(TaskError::UnknownObject(object))
        }
    }

    fn validate_atom(&self, atom: &Atom) -> Result<(), TaskError> {
        self.validate_predicate(atom.predicate(), atom.arity())?;

        for argument in atom.arguments() {
            if let Argument::Object(object) = argument {
                self.validate_object(*object)?;
            }
        }

        Ok(())
    }

    fn validate_ground_atom(&self, atom: &GroundAtom) -> Result<(), TaskError> {
        self.validate_predicate(atom.predicate(), atom.arity())?;

        for object in atom.arguments() {
            self.validate_object(*object)?;
        }

        Ok(())
    }

    /// Return the declared predicates, indexed by [PredicateId].
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Return the predicate with the given id.
    pub fn predicate(&self, id: PredicateId) -> Option<&Predicate> {
        self.predicates.get(id.0)
    }

    /// Look up a predicate by name.
    pub fn predicate_id(&self, name: &str) -> Option<PredicateId> {
        self.predicates
            .iter()
            .position(|predicate| predicate.name() == name)
            .map(PredicateId)
    }

    /// Return the names of the declared objects, indexed by [ObjectId].
    pub fn objects(&self) -> &[String] {
        &self.objects
    }

    /// Return the number of objects.
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over the ids of all objects.
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> {
        (0..self.objects.len()).map(ObjectId)
    }

    /// Look up an object by name.
    pub fn object_id(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|object| object == name)
            .map(ObjectId)
    }

    /// Return the action schemas in order of their index.
    pub fn action_schemas(&self) -> &[ActionSchema] {
        &self.action_schemas
    }

    /// Return the action schema with the given index.
    pub fn action_schema(&self, index: usize) -> Result<&ActionSchema, TaskError> {
        self.action_schemas
            .get(index)
            .ok_or(TaskError::UnknownActionSchema(index))
    }

    /// Return the initial state.
    ///
    /// It has one relation per declared predicate.
    pub fn initial_state(&self) -> DBState {
        let mut state = DBState::new(self.predicates.len());
        for atom in self.initial_state.atoms() {
            state.insert(atom);
        }

        state
    }

    /// Return the goal atoms.
    pub fn goal(&self) -> &[GroundAtom] {
        &self.goal
    }

    /// Return whether every goal atom holds in the given state.
    pub fn is_goal(&self, state: &DBState) -> bool {
        self.goal.iter().all(|atom| state.contains(atom))
    }
}
