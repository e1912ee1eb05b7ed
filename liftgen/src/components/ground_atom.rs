//! This module defines [GroundAtom].

use std::fmt::Display;

use itertools::Itertools;

use super::identifiers::{ObjectId, PredicateId};

/// An atom whose arguments are all objects
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroundAtom {
    /// Predicate of this atom
    predicate: PredicateId,
    /// Objects of this atom
    arguments: Vec<ObjectId>,
}

impl GroundAtom {
    /// Create a new [GroundAtom].
    pub fn new(predicate: PredicateId, arguments: Vec<ObjectId>) -> Self {
        Self {
            predicate,
            arguments,
        }
    }

    /// Return the predicate of this atom.
    pub fn predicate(&self) -> PredicateId {
        self.predicate
    }

    /// Return the objects of this atom.
    pub fn arguments(&self) -> &[ObjectId] {
        &self.arguments
    }

    /// Return the arity of this atom.
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Consume the atom and return its objects.
    pub fn into_arguments(self) -> Vec<ObjectId> {
        self.arguments
    }
}

impl Display for GroundAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.predicate, self.arguments.iter().join(", "))
    }
}
