//! This module defines the identifiers of objects, predicates and variables.

use std::fmt::Display;

use liftgen_physical::tabular::table::{ColumnMarker, StorageValue};

/// Index of an object of a [Task][crate::task::Task]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "o{}", self.0)
    }
}

impl From<ObjectId> for StorageValue {
    fn from(value: ObjectId) -> Self {
        value.0
    }
}

/// Index of a predicate
///
/// The predicates of a [Task][crate::task::Task] come first;
/// a Datalog [Program][crate::datalog::program::Program] appends its auxiliary predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(pub usize);

impl Display for PredicateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A variable, identified by its index within a rule or an action schema
///
/// In an action schema, variable `i` is the `i`th parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(pub usize);

impl Variable {
    /// Return the column marker that represents this variable in a table.
    pub fn marker(self) -> ColumnMarker {
        ColumnMarker::new(self.0)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{}", self.0)
    }
}

impl From<Variable> for ColumnMarker {
    fn from(value: Variable) -> Self {
        value.marker()
    }
}
