//! This module defines the Datalog rules of liftgen:
//! [GenericRule]s as built from a task and the primitive [Rule]s they are split into.

pub mod condition;
pub mod variable_source;

use std::fmt::Display;

use crate::components::{Atom, Variable};

pub use condition::{Condition, JoinedCondition};
pub use variable_source::{VariableSource, VariableSourceTable};

/// Cost contribution of a rule
pub type Weight = u32;

/// What a rule was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleTemplate {
    /// The action schema with the given index
    Schema(usize),
    /// The goal of the task
    Goal,
}

impl RuleTemplate {
    /// Return the index of the action schema, if any.
    pub fn schema_index(&self) -> Option<usize> {
        match self {
            RuleTemplate::Schema(index) => Some(*index),
            RuleTemplate::Goal => None,
        }
    }
}

impl Display for RuleTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleTemplate::Schema(index) => write!(f, "schema {index}"),
            RuleTemplate::Goal => write!(f, "goal"),
        }
    }
}

/// Writes a rule in the form `(effect <- conditions | key: value; ...)`.
fn write_rule<Conditions, Item>(
    f: &mut std::fmt::Formatter<'_>,
    effect: &Atom,
    conditions: Conditions,
    weight: Weight,
    kind: &str,
    template: RuleTemplate,
) -> std::fmt::Result
where
    Conditions: IntoIterator<Item = Item>,
    Item: Display,
{
    write!(f, "({effect} <- ")?;
    for (index, condition) in conditions.into_iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{condition}")?;
    }
    write!(f, " | weight: {weight}; kind: {kind}; template: {template})")
}

/// A conjunctive rule as it is built from a task
///
/// This is the only form accepted by the
/// [rule splitter][crate::datalog::transformations::rule_splitting::split_rules].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRule {
    weight: Weight,
    effect: Atom,
    conditions: Vec<Atom>,
    variable_source: VariableSourceTable,
    template: RuleTemplate,
}

impl GenericRule {
    /// Create a new [GenericRule].
    pub fn new(weight: Weight, effect: Atom, conditions: Vec<Atom>, template: RuleTemplate) -> Self {
        let variable_source = VariableSourceTable::from_conditions(&conditions);

        Self {
            weight,
            effect,
            conditions,
            variable_source,
            template,
        }
    }

    /// Return the weight of this rule.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Return the effect of this rule.
    pub fn effect(&self) -> &Atom {
        &self.effect
    }

    /// Return the conditions of this rule.
    pub fn conditions(&self) -> &[Atom] {
        &self.conditions
    }

    /// Return the variable source table of this rule.
    pub fn variable_source(&self) -> &VariableSourceTable {
        &self.variable_source
    }

    /// Return the template this rule was created from.
    pub fn template(&self) -> RuleTemplate {
        self.template
    }

    /// Return a variable of the effect that is not bound by any condition.
    pub fn unbound_effect_variable(&self) -> Option<Variable> {
        self.effect
            .variables()
            .into_iter()
            .find(|variable| !self.variable_source.contains(*variable))
    }
}

impl Display for GenericRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_rule(
            f,
            &self.effect,
            &self.conditions,
            self.weight,
            "generic",
            self.template,
        )
    }
}

/// Content shared by all primitive rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBody<A> {
    weight: Weight,
    effect: Atom,
    conditions: Vec<Condition>,
    variable_source: VariableSourceTable,
    template: RuleTemplate,
    annotation: A,
}

impl<A> RuleBody<A> {
    pub(crate) fn new(
        weight: Weight,
        effect: Atom,
        conditions: Vec<Condition>,
        variable_source: VariableSourceTable,
        template: RuleTemplate,
        annotation: A,
    ) -> Self {
        Self {
            weight,
            effect,
            conditions,
            variable_source,
            template,
            annotation,
        }
    }

    /// Return the weight of this rule.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Return the effect of this rule.
    pub fn effect(&self) -> &Atom {
        &self.effect
    }

    /// Return the conditions of this rule.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Return the variable source table of this rule.
    pub fn variable_source(&self) -> &VariableSourceTable {
        &self.variable_source
    }

    /// Return the template this rule was created from.
    pub fn template(&self) -> RuleTemplate {
        self.template
    }

    /// Return the annotation of this rule.
    pub fn annotation(&self) -> &A {
        &self.annotation
    }
}

/// Kind of a primitive [Rule]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RuleKind {
    /// A single condition
    Project,
    /// Variable-disjoint conditions
    Product,
    /// A single synthetic join condition
    Join,
}

/// A primitive rule, carrying an annotation of type `A`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule<A> {
    /// Body has exactly one condition.
    Project(RuleBody<A>),
    /// Body has pairwise variable-disjoint conditions.
    Product(RuleBody<A>),
    /// Body consists of one synthetic condition,
    /// whose joins all share a variable if the original conditions were connected.
    Join(RuleBody<A>),
}

impl<A> Rule<A> {
    /// Return the content of this rule.
    pub fn body(&self) -> &RuleBody<A> {
        match self {
            Rule::Project(body) | Rule::Product(body) | Rule::Join(body) => body,
        }
    }

    /// Return the kind of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Project(_) => RuleKind::Project,
            Rule::Product(_) => RuleKind::Product,
            Rule::Join(_) => RuleKind::Join,
        }
    }

    /// Return the weight of this rule.
    pub fn weight(&self) -> Weight {
        self.body().weight()
    }

    /// Return the effect of this rule.
    pub fn effect(&self) -> &Atom {
        self.body().effect()
    }

    /// Return the conditions of this rule.
    pub fn conditions(&self) -> &[Condition] {
        self.body().conditions()
    }

    /// Return the variable source table of this rule.
    pub fn variable_source(&self) -> &VariableSourceTable {
        self.body().variable_source()
    }

    /// Return the template this rule was created from.
    pub fn template(&self) -> RuleTemplate {
        self.body().template()
    }

    /// Return the annotation of this rule.
    pub fn annotation(&self) -> &A {
        self.body().annotation()
    }

    /// Return the base atoms of the conditions from left to right.
    ///
    /// The [VariableSourceTable] of the rule indexes into this list.
    pub fn base_atoms(&self) -> Vec<&Atom> {
        self.conditions()
            .iter()
            .flat_map(Condition::base_atoms)
            .collect()
    }
}

impl<A> Display for Rule<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self.body();
        write_rule(
            f,
            &body.effect,
            &body.conditions,
            body.weight,
            &self.kind().to_string(),
            body.template,
        )
    }
}
