//! This module defines the basic building blocks of tasks, states and rules.

pub mod argument;
pub mod atom;
pub mod ground_atom;
pub mod identifiers;

pub use argument::Argument;
pub use atom::Atom;
pub use ground_atom::GroundAtom;
pub use identifiers::{ObjectId, PredicateId, Variable};
