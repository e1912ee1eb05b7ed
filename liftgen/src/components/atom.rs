//! This module defines [Atom].

use std::fmt::Display;

use itertools::Itertools;

use super::{
    argument::Argument,
    ground_atom::GroundAtom,
    identifiers::{ObjectId, PredicateId, Variable},
};

/// A predicate applied to a list of [Argument]s
///
/// Two atoms with the same predicate and different arguments are different conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    /// Predicate of this atom
    predicate: PredicateId,
    /// Arguments of this atom
    arguments: Vec<Argument>,
}

impl Atom {
    /// Create a new [Atom].
    pub fn new(predicate: PredicateId, arguments: Vec<Argument>) -> Self {
        Self {
            predicate,
            arguments,
        }
    }

    /// Create a new [Atom] that only contains variables.
    pub fn with_variables<Variables>(predicate: PredicateId, variables: Variables) -> Self
    where
        Variables: IntoIterator<Item = Variable>,
    {
        Self::new(
            predicate,
            variables.into_iter().map(Argument::Variable).collect(),
        )
    }

    /// Return the predicate of this atom.
    pub fn predicate(&self) -> PredicateId {
        self.predicate
    }

    /// Return the arguments of this atom.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Return the arity of this atom.
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Return whether this atom has no arguments.
    pub fn is_nullary(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Return the distinct variables of this atom in order of their first occurrence.
    pub fn variables(&self) -> Vec<Variable> {
        self.arguments
            .iter()
            .filter_map(Argument::variable)
            .unique()
            .collect()
    }

    /// Return whether the given variable occurs in this atom.
    pub fn contains_variable(&self, variable: Variable) -> bool {
        self.arguments
            .iter()
            .any(|argument| argument.variable() == Some(variable))
    }

    /// Replace every variable with the object assigned by `binding`.
    ///
    /// Returns `None` if some variable is left unassigned.
    pub fn ground<Binding>(&self, mut binding: Binding) -> Option<GroundAtom>
    where
        Binding: FnMut(Variable) -> Option<ObjectId>,
    {
        let arguments = self
            .arguments
            .iter()
            .map(|argument| match argument {
                Argument::Object(object) => Some(*object),
                Argument::Variable(variable) => binding(*variable),
            })
            .collect::<Option<Vec<ObjectId>>>()?;

        Some(GroundAtom::new(self.predicate, arguments))
    }
}

impl From<GroundAtom> for Atom {
    fn from(value: GroundAtom) -> Self {
        Self::new(
            value.predicate(),
            value.arguments().iter().copied().map(Argument::Object).collect(),
        )
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.predicate, self.arguments.iter().join(", "))
    }
}
