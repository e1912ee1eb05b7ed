//! This module defines [Argument].

use std::fmt::Display;

use super::identifiers::{ObjectId, Variable};

/// Argument of an [Atom][super::atom::Atom]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Argument {
    /// A fixed object
    Object(ObjectId),
    /// A variable
    Variable(Variable),
}

impl Argument {
    /// Return whether this argument is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Argument::Object(_))
    }

    /// Return the variable if this argument is one.
    pub fn variable(&self) -> Option<Variable> {
        match self {
            Argument::Variable(variable) => Some(*variable),
            Argument::Object(_) => None,
        }
    }
}

impl From<Variable> for Argument {
    fn from(value: Variable) -> Self {
        Self::Variable(value)
    }
}

impl From<ObjectId> for Argument {
    fn from(value: ObjectId) -> Self {
        Self::Object(value)
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Object(object) => object.fmt(f),
            Argument::Variable(variable) => variable.fmt(f),
        }
    }
}
