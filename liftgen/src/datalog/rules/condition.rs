//! This module defines [Condition].

use std::fmt::Display;

use crate::components::{Atom, Variable};

/// The result of joining two conditions
///
/// It stands for the relation obtained by joining the relations of `left` and `right`
/// on their shared variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinedCondition {
    left: Box<Condition>,
    right: Box<Condition>,
    /// Variables of `left` followed by the variables of `right` not in `left`
    variables: Vec<Variable>,
}

impl JoinedCondition {
    /// Return the left operand.
    pub fn left(&self) -> &Condition {
        &self.left
    }

    /// Return the right operand.
    pub fn right(&self) -> &Condition {
        &self.right
    }

    /// Return the variables that are bound by this join.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Return the variables occurring in both operands.
    pub fn shared_variables(&self) -> Vec<Variable> {
        let right = self.right.variables();
        self.left
            .variables()
            .into_iter()
            .filter(|variable| right.contains(variable))
            .collect()
    }
}

/// Element of a rule body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// A base atom over a predicate
    Atom(Atom),
    /// A synthetic condition whose identity is the join of two conditions
    Join(JoinedCondition),
}

impl Condition {
    /// Create the synthetic condition joining `left` and `right`.
    pub fn join(left: Condition, right: Condition) -> Self {
        let mut variables = left.variables();
        for variable in right.variables() {
            if !variables.contains(&variable) {
                variables.push(variable);
            }
        }

        Self::Join(JoinedCondition {
            left: Box::new(left),
            right: Box::new(right),
            variables,
        })
    }

    /// Return the distinct variables of this condition in order of their first occurrence.
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Condition::Atom(atom) => atom.variables(),
            Condition::Join(join) => join.variables.clone(),
        }
    }

    /// Return whether this condition shares a variable with `other`.
    pub fn shares_variable_with(&self, other: &Condition) -> bool {
        let other = other.variables();
        self.variables()
            .iter()
            .any(|variable| other.contains(variable))
    }

    /// Return whether this condition was created by joining other conditions.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Condition::Join(_))
    }

    /// Return the base atoms below this condition from left to right.
    pub fn base_atoms(&self) -> Vec<&Atom> {
        let mut result = Vec::new();
        self.collect_base_atoms(&mut result);
        result
    }

    fn collect_base_atoms<'a>(&'a self, result: &mut Vec<&'a Atom>) {
        match self {
            Condition::Atom(atom) => result.push(atom),
            Condition::Join(join) => {
                join.left.collect_base_atoms(result);
                join.right.collect_base_atoms(result);
            }
        }
    }
}

impl From<Atom> for Condition {
    fn from(value: Atom) -> Self {
        Self::Atom(value)
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Atom(atom) => atom.fmt(f),
            Condition::Join(join) => write!(f, "[{} ⋈ {}]", join.left, join.right),
        }
    }
}
