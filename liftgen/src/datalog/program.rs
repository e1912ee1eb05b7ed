//! This module defines [Program], the Datalog program of a planning task,
//! and [RuleProgram], the program after splitting.

use std::{fmt::Display, rc::Rc};

use crate::{
    components::{Atom, GroundAtom, ObjectId, PredicateId, Variable},
    datalog::{
        facts::FactStore,
        rules::{GenericRule, Rule, RuleTemplate},
        transformations::rule_splitting::{split_rules, SplitError},
    },
    state::DBState,
    task::Task,
};

/// Name prefix of the predicates that mark applicable actions
pub const APPLICABLE_PREFIX: &str = "applicable-";
/// Name of the nullary predicate that always holds
pub const TRUE_PREDICATE: &str = "@true";
/// Name of the unary predicate that holds for every object
pub const OBJECT_PREDICATE: &str = "@object";
/// Name of the nullary predicate that holds once the goal is reached
pub const GOAL_PREDICATE: &str = "@goal";

/// Auxiliary predicates added to the predicates of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedPredicates {
    /// Nullary predicate that always holds
    pub truth: PredicateId,
    /// Unary predicate that holds for every object
    pub object: PredicateId,
    /// Nullary predicate derived from the goal
    pub goal: PredicateId,
}

/// Collect the facts of a Datalog program from a state of the task.
fn facts_from_state(
    state: &DBState,
    reserved: ReservedPredicates,
    num_objects: usize,
) -> FactStore {
    let mut facts = state.atoms().collect::<FactStore>();

    facts.insert(GroundAtom::new(reserved.truth, Vec::new()));
    facts.extend(
        (0..num_objects).map(|object| GroundAtom::new(reserved.object, vec![ObjectId(object)])),
    );

    facts
}

/// The relaxed Datalog program of a planning task
///
/// For each action schema it contains a rule deriving the applicability of its actions
/// and one rule per add effect.
/// A final rule derives the goal predicate.
#[derive(Debug, Clone)]
pub struct Program {
    predicate_names: Vec<String>,
    rules: Vec<GenericRule>,
    reserved: ReservedPredicates,
    num_schemas: usize,
    num_objects: usize,
}

impl Program {
    /// Build the program of the given task.
    pub fn from_task(task: &Task) -> Self {
        let num_schemas = task.action_schemas().len();
        let first_applicable = task.predicates().len();

        let mut predicate_names = task
            .predicates()
            .iter()
            .map(|predicate| predicate.name().to_string())
            .collect::<Vec<_>>();
        predicate_names.extend(
            task.action_schemas()
                .iter()
                .map(|schema| format!("{APPLICABLE_PREFIX}{}", schema.name())),
        );

        let reserved = ReservedPredicates {
            truth: PredicateId(first_applicable + num_schemas),
            object: PredicateId(first_applicable + num_schemas + 1),
            goal: PredicateId(first_applicable + num_schemas + 2),
        };
        predicate_names.extend(
            [TRUE_PREDICATE, OBJECT_PREDICATE, GOAL_PREDICATE]
                .into_iter()
                .map(String::from),
        );

        let truth = || Atom::new(reserved.truth, Vec::new());
        let mut rules = Vec::new();

        for schema in task.action_schemas() {
            let template = RuleTemplate::Schema(schema.index());
            let applicable = Atom::with_variables(
                PredicateId(first_applicable + schema.index()),
                (0..schema.num_parameters()).map(Variable),
            );

            let mut conditions = schema.preconditions().to_vec();
            for parameter in (0..schema.num_parameters()).map(Variable) {
                if !conditions
                    .iter()
                    .any(|condition| condition.contains_variable(parameter))
                {
                    conditions.push(Atom::with_variables(reserved.object, [parameter]));
                }
            }
            if conditions.is_empty() {
                conditions.push(truth());
            }

            rules.push(GenericRule::new(
                schema.cost(),
                applicable.clone(),
                conditions,
                template,
            ));

            for effect in schema.add_effects() {
                rules.push(GenericRule::new(
                    0,
                    effect.clone(),
                    vec![applicable.clone()],
                    template,
                ));
            }
        }

        let mut goal = task
            .goal()
            .iter()
            .cloned()
            .map(Atom::from)
            .collect::<Vec<_>>();
        if goal.is_empty() {
            goal.push(truth());
        }
        rules.push(GenericRule::new(
            0,
            Atom::new(reserved.goal, Vec::new()),
            goal,
            RuleTemplate::Goal,
        ));

        log::info!(
            "Built Datalog program with {} rules over {} predicates",
            rules.len(),
            predicate_names.len()
        );

        Self {
            predicate_names,
            rules,
            reserved,
            num_schemas,
            num_objects: task.num_objects(),
        }
    }

    /// Return the rules of this program.
    pub fn rules(&self) -> &[GenericRule] {
        &self.rules
    }

    /// Return the names of all predicates, indexed by [PredicateId].
    pub fn predicate_names(&self) -> &[String] {
        &self.predicate_names
    }

    /// Return the auxiliary predicates of this program.
    pub fn reserved(&self) -> ReservedPredicates {
        self.reserved
    }

    /// Return the predicate marking applicable actions of the given schema.
    pub fn applicability_predicate(&self, schema: usize) -> Option<PredicateId> {
        let first = self.reserved.truth.0 - self.num_schemas;
        (schema < self.num_schemas).then_some(PredicateId(first + schema))
    }

    /// Return the facts of the given state in the predicate space of this program.
    pub fn facts_from_state(&self, state: &DBState) -> FactStore {
        facts_from_state(state, self.reserved, self.num_objects)
    }

    /// Split the rules of this program into primitive rules.
    pub fn split<A, Generator>(
        self,
        annotation_generator: Generator,
        task: &Task,
    ) -> Result<RuleProgram<A>, SplitError>
    where
        Generator: FnMut(RuleTemplate, &Task) -> A,
    {
        let rules = split_rules(self.rules, annotation_generator, task)?;

        Ok(RuleProgram {
            rules: rules.into(),
            predicate_names: self.predicate_names.into(),
            reserved: self.reserved,
            num_objects: self.num_objects,
        })
    }
}

/// Immutable sequence of primitive rules
///
/// Cloning only creates a new handle to the same rules.
#[derive(Debug)]
pub struct RuleProgram<A> {
    rules: Rc<[Rule<A>]>,
    predicate_names: Rc<[String]>,
    reserved: ReservedPredicates,
    num_objects: usize,
}

impl<A> Clone for RuleProgram<A> {
    fn clone(&self) -> Self {
        Self {
            rules: Rc::clone(&self.rules),
            predicate_names: Rc::clone(&self.predicate_names),
            reserved: self.reserved,
            num_objects: self.num_objects,
        }
    }
}

impl<A> RuleProgram<A> {
    /// Return the rules of this program.
    pub fn rules(&self) -> &[Rule<A>] {
        &self.rules
    }

    /// Return the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Return whether this program has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Return the name of the given predicate.
    pub fn predicate_name(&self, predicate: PredicateId) -> Option<&str> {
        self.predicate_names.get(predicate.0).map(String::as_str)
    }

    /// Return the auxiliary predicates of this program.
    pub fn reserved(&self) -> ReservedPredicates {
        self.reserved
    }

    /// Return the facts of the given state in the predicate space of this program.
    pub fn facts_from_state(&self, state: &DBState) -> FactStore {
        facts_from_state(state, self.reserved, self.num_objects)
    }
}

impl<A> Display for RuleProgram<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rule in self.rules.iter() {
            writeln!(f, "{rule}")?;
        }

        Ok(())
    }
}
