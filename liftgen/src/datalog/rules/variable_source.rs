//! This module defines [VariableSourceTable].

use std::collections::BTreeMap;

use crate::components::{Atom, Variable};

/// Location where a variable is first bound in the body of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableSource {
    /// Index of the condition
    pub condition: usize,
    /// Argument position within the condition
    pub position: usize,
}

/// Maps every variable of a rule body to the condition and argument position
/// where it is bound first
///
/// The condition index refers to the [base atoms][crate::datalog::rules::Rule::base_atoms]
/// of a rule. For a join rule these are the leaves of its join tree from left to right,
/// so bindings of intermediate results can always be traced back to a base condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSourceTable {
    sources: BTreeMap<Variable, VariableSource>,
}

impl VariableSourceTable {
    /// Create a new empty [VariableSourceTable].
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the table for a list of conditions.
    pub fn from_conditions(conditions: &[Atom]) -> Self {
        Self::from_atoms(conditions)
    }

    /// Compute the table for the given atoms,
    /// where `condition` is the position of an atom in `atoms`.
    pub fn from_atoms<'a, Atoms>(atoms: Atoms) -> Self
    where
        Atoms: IntoIterator<Item = &'a Atom>,
    {
        let mut result = Self::new();

        for (condition, atom) in atoms.into_iter().enumerate() {
            for (position, argument) in atom.arguments().iter().enumerate() {
                if let Some(variable) = argument.variable() {
                    result
                        .sources
                        .entry(variable)
                        .or_insert(VariableSource {
                            condition,
                            position,
                        });
                }
            }
        }

        result
    }

    /// Return where the given variable is bound first.
    pub fn source(&self, variable: Variable) -> Option<VariableSource> {
        self.sources.get(&variable).copied()
    }

    /// Return whether the table knows the given variable.
    pub fn contains(&self, variable: Variable) -> bool {
        self.sources.contains_key(&variable)
    }

    /// Return an iterator over all entries, ordered by variable.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, VariableSource)> + '_ {
        self.sources
            .iter()
            .map(|(variable, source)| (*variable, *source))
    }

    /// Return the number of variables.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Return whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
