//! This module implements the splitting of [GenericRule]s into primitive [Rule]s.
//!
//! A rule with a single condition becomes a project rule,
//! a rule whose conditions have pairwise no variable in common becomes a product rule
//! and every other rule is combined into a single join tree by [greedy_join].

use std::collections::HashSet;

use liftgen_physical::meta::timing::TimedCode;
use thiserror::Error;

use crate::{
    components::Variable,
    datalog::rules::{
        Condition, GenericRule, Rule, RuleBody, RuleKind, RuleTemplate, VariableSourceTable,
    },
    task::Task,
};

use super::greedy_join::greedy_join;

/// Errors that can occur while splitting rules
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    /// Rule without conditions
    #[error("Rule {rule} has no conditions")]
    EmptyBody {
        /// Position of the rule in the input
        rule: usize,
    },
    /// Rule whose effect uses a variable that no condition binds
    #[error("Variable {variable} in the effect of rule {rule} is not bound by any condition")]
    MissingVariableSource {
        /// Position of the rule in the input
        rule: usize,
        /// The unbound variable
        variable: Variable,
    },
}

/// Return whether no variable of a condition occurs in an earlier condition of the rule.
pub fn is_product_rule(rule: &GenericRule) -> bool {
    let mut seen = HashSet::<Variable>::new();

    for condition in rule.conditions() {
        let variables = condition.variables();
        if variables.iter().any(|variable| seen.contains(variable)) {
            return false;
        }
        seen.extend(variables);
    }

    true
}

/// Decide into which kind of primitive rule the given rule is split.
pub fn classify(rule: &GenericRule) -> Option<RuleKind> {
    match rule.conditions().len() {
        0 => None,
        1 => Some(RuleKind::Project),
        _ if is_product_rule(rule) => Some(RuleKind::Product),
        _ => Some(RuleKind::Join),
    }
}

fn split_rule<A>(
    index: usize,
    rule: GenericRule,
    template: RuleTemplate,
    annotation: A,
) -> Result<Rule<A>, SplitError> {
    let kind = classify(&rule).ok_or(SplitError::EmptyBody { rule: index })?;
    if let Some(variable) = rule.unbound_effect_variable() {
        return Err(SplitError::MissingVariableSource {
            rule: index,
            variable,
        });
    }

    let weight = rule.weight();
    let effect = rule.effect().clone();
    let variable_source = rule.variable_source().clone();
    let conditions = rule
        .conditions()
        .iter()
        .cloned()
        .map(Condition::Atom)
        .collect::<Vec<_>>();

    let split = match kind {
        RuleKind::Project => Rule::Project(RuleBody::new(
            weight,
            effect,
            conditions,
            variable_source,
            template,
            annotation,
        )),
        RuleKind::Product => Rule::Product(RuleBody::new(
            weight,
            effect,
            conditions,
            variable_source,
            template,
            annotation,
        )),
        RuleKind::Join => {
            let joined = greedy_join(conditions)
                .into_iter()
                .collect::<Vec<_>>();
            // greedy joining may reorder the base atoms
            let variable_source = VariableSourceTable::from_atoms(
                joined.iter().flat_map(Condition::base_atoms),
            );

            Rule::Join(RuleBody::new(
                weight,
                effect,
                joined,
                variable_source,
                template,
                annotation,
            ))
        }
    };

    Ok(split)
}

/// Split every rule into a primitive rule.
///
/// The input order is preserved and `annotation_generator` is called once for each emitted rule.
/// Rules without conditions and rules with unbound effect variables are rejected.
pub fn split_rules<A, Generator>(
    rules: Vec<GenericRule>,
    mut annotation_generator: Generator,
    task: &Task,
) -> Result<Vec<Rule<A>>, SplitError>
where
    Generator: FnMut(RuleTemplate, &Task) -> A,
{
    TimedCode::measure("Grounding/Split rules", || {
        let templates = rules.iter().map(GenericRule::template).collect::<Vec<_>>();

        let mut result = Vec::<Rule<A>>::with_capacity(rules.len());
        for (index, (rule, template)) in rules.into_iter().zip(templates).enumerate() {
            let annotation = annotation_generator(template, task);
            let split = split_rule(index, rule, template, annotation)?;

            log::debug!("Split rule {index} into {split}");
            result.push(split);
        }

        let count = |kind: RuleKind| result.iter().filter(|rule| rule.kind() == kind).count();
        log::info!(
            "Split {} rules: {} project, {} product, {} join",
            result.len(),
            count(RuleKind::Project),
            count(RuleKind::Product),
            count(RuleKind::Join)
        );

        Ok(result)
    })
}
