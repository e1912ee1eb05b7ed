//! This module defines [ActionSchema].

use std::fmt::Display;

use crate::{components::Atom, datalog::rules::Weight};

/// A lifted action with STRIPS preconditions and effects
///
/// Variable `i` in any of its atoms refers to the `i`th parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    name: String,
    index: usize,
    parameters: Vec<String>,
    cost: Weight,
    preconditions: Vec<Atom>,
    negative_preconditions: Vec<Atom>,
    add_effects: Vec<Atom>,
    delete_effects: Vec<Atom>,
}

impl ActionSchema {
    /// Create a new [ActionSchema] with unit cost and no preconditions or effects.
    pub fn new<Name: Into<String>>(name: Name, parameters: Vec<String>) -> Self {
        Self {
            name: name.into(),
            index: 0,
            parameters,
            cost: 1,
            preconditions: Vec::new(),
            negative_preconditions: Vec::new(),
            add_effects: Vec::new(),
            delete_effects: Vec::new(),
        }
    }

    /// Set the cost of applying this action.
    pub fn with_cost(mut self, cost: Weight) -> Self {
        self.cost = cost;
        self
    }

    /// Add a positive precondition.
    pub fn with_precondition(mut self, atom: Atom) -> Self {
        self.preconditions.push(atom);
        self
    }

    /// Add a negative precondition.
    pub fn with_negative_precondition(mut self, atom: Atom) -> Self {
        self.negative_preconditions.push(atom);
        self
    }

    /// Add an atom that becomes true when the action is applied.
    pub fn with_add_effect(mut self, atom: Atom) -> Self {
        self.add_effects.push(atom);
        self
    }

    /// Add an atom that becomes false when the action is applied.
    pub fn with_delete_effect(mut self, atom: Atom) -> Self {
        self.delete_effects.push(atom);
        self
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Return the name of this schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the position of this schema in its [Task][crate::task::Task].
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the names of the parameters.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Return the number of parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// Return the cost of this schema.
    pub fn cost(&self) -> Weight {
        self.cost
    }

    /// Return the positive preconditions.
    pub fn preconditions(&self) -> &[Atom] {
        &self.preconditions
    }

    /// Return the negative preconditions.
    pub fn negative_preconditions(&self) -> &[Atom] {
        &self.negative_preconditions
    }

    /// Return the add effects.
    pub fn add_effects(&self) -> &[Atom] {
        &self.add_effects
    }

    /// Return the delete effects.
    pub fn delete_effects(&self) -> &[Atom] {
        &self.delete_effects
    }

    /// Iterate over every atom occurring in this schema.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.preconditions
            .iter()
            .chain(self.negative_preconditions.iter())
            .chain(self.add_effects.iter())
            .chain(self.delete_effects.iter())
    }
}

impl Display for ActionSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.join(", "))
    }
}
