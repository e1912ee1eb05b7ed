//! Helpers shared by the unit tests of this crate

use quickcheck::{Arbitrary, Gen};

use crate::{
    components::{Argument, Atom, GroundAtom, ObjectId, PredicateId, Variable},
    datalog::{
        facts::FactStore,
        rules::{GenericRule, RuleTemplate},
    },
    execution::Derivation,
    state::{DBState, RelationSource},
    successor_generators::GroundAction,
    task::{ActionSchema, Task},
};

/// Arities of the predicates used by randomly generated rules and facts
const ARITIES: [usize; 5] = [1, 2, 2, 0, 3];
/// Number of objects used by randomly generated rules and facts
const NUM_OBJECTS: usize = 3;
/// Number of variables used by randomly generated rules
const NUM_VARIABLES: usize = 4;
/// Predicate of the effect of randomly generated rules
const EFFECT_PREDICATE: PredicateId = PredicateId(ARITIES.len());

fn below(g: &mut Gen, bound: usize) -> usize {
    usize::arbitrary(g) % bound
}

impl Arbitrary for GenericRule {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_conditions = 1 + below(g, 4);

        let conditions = (0..num_conditions)
            .map(|_| {
                let predicate = below(g, ARITIES.len());
                let arguments = (0..ARITIES[predicate])
                    .map(|_| {
                        if below(g, 5) == 0 {
                            Argument::Object(ObjectId(below(g, NUM_OBJECTS)))
                        } else {
                            Argument::Variable(Variable(below(g, NUM_VARIABLES)))
                        }
                    })
                    .collect();

                Atom::new(PredicateId(predicate), arguments)
            })
            .collect::<Vec<_>>();

        let bound = conditions
            .iter()
            .flat_map(Atom::variables)
            .collect::<Vec<_>>();
        let effect_arity = below(g, 4);
        let effect_arguments = (0..effect_arity)
            .map(|_| {
                if bound.is_empty() || below(g, 4) == 0 {
                    Argument::Object(ObjectId(below(g, NUM_OBJECTS)))
                } else {
                    Argument::Variable(bound[below(g, bound.len())])
                }
            })
            .collect();

        let template = if bool::arbitrary(g) {
            RuleTemplate::Schema(below(g, 8))
        } else {
            RuleTemplate::Goal
        };

        GenericRule::new(
            below(g, 5) as u32,
            Atom::new(EFFECT_PREDICATE, effect_arguments),
            conditions,
            template,
        )
    }
}

impl Arbitrary for FactStore {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut facts = FactStore::new();

        for (predicate, arity) in ARITIES.iter().enumerate() {
            let num_tuples = below(g, 7);
            for _ in 0..num_tuples {
                let tuple = (0..*arity)
                    .map(|_| ObjectId(below(g, NUM_OBJECTS)))
                    .collect();
                facts.insert(GroundAtom::new(PredicateId(predicate), tuple));
            }
        }

        facts
    }
}

/// Generate the given number of random rules.
pub(crate) fn arbitrary_rules(count: usize) -> Vec<GenericRule> {
    let mut g = Gen::new(10);
    (0..count).map(|_| GenericRule::arbitrary(&mut g)).collect()
}

/// Return whether the conditions of `rule` are connected through shared variables.
pub(crate) fn is_connected(rule: &GenericRule) -> bool {
    let conditions = rule.conditions();
    let mut reached = vec![false; conditions.len()];
    let mut variables = Vec::<Variable>::new();

    if let Some(first) = conditions.first() {
        reached[0] = true;
        variables.extend(first.variables());
    }

    let mut changed = true;
    while changed {
        changed = false;
        for (index, condition) in conditions.iter().enumerate() {
            if reached[index] {
                continue;
            }

            let condition_variables = condition.variables();
            if condition_variables
                .iter()
                .any(|variable| variables.contains(variable))
            {
                reached[index] = true;
                variables.extend(condition_variables);
                changed = true;
            }
        }
    }

    reached.into_iter().all(|reached| reached)
}

fn naive_bindings<Source: RelationSource>(
    conditions: &[Atom],
    source: &Source,
    binding: &mut Vec<Option<ObjectId>>,
    result: &mut Vec<Vec<Option<ObjectId>>>,
) {
    let Some((condition, rest)) = conditions.split_first() else {
        result.push(binding.clone());
        return;
    };

    if condition.is_nullary() {
        if source.holds_nullary(condition.predicate()) {
            naive_bindings(rest, source, binding, result);
        }
        return;
    }

    for tuple in source.tuples(condition.predicate()).into_iter().flatten() {
        let previous = binding.clone();
        let matches = condition
            .arguments()
            .iter()
            .zip(tuple)
            .all(|(argument, object)| match argument {
                Argument::Object(expected) => expected == object,
                Argument::Variable(variable) => match binding[variable.0] {
                    Some(bound) => bound == *object,
                    None => {
                        binding[variable.0] = Some(*object);
                        true
                    }
                },
            });

        if matches {
            naive_bindings(rest, source, binding, result);
        }
        *binding = previous;
    }
}

/// Evaluate a rule by enumerating all combinations of matching tuples.
pub(crate) fn naive_derivations<Source: RelationSource>(
    rule: &GenericRule,
    source: &Source,
) -> Vec<Derivation> {
    let num_variables = rule
        .conditions()
        .iter()
        .chain(std::iter::once(rule.effect()))
        .flat_map(Atom::variables)
        .map(|variable| variable.0 + 1)
        .max()
        .unwrap_or(0);

    let mut bindings = Vec::new();
    naive_bindings(
        rule.conditions(),
        source,
        &mut vec![None; num_variables],
        &mut bindings,
    );

    let mut result = bindings
        .into_iter()
        .filter_map(|binding| rule.effect().ground(|variable| binding[variable.0]))
        .map(|atom| Derivation {
            atom,
            weight: rule.weight(),
            template: rule.template(),
        })
        .collect::<Vec<_>>();
    result.sort_unstable();
    result.dedup();

    result
}

/// Arities of the predicates of randomly generated tasks
const TASK_ARITIES: [usize; 4] = [1, 2, 0, 2];

/// A task with random initial state and a single random action schema
#[derive(Debug, Clone)]
pub(crate) struct SchemaCase {
    pub(crate) task: Task,
}

fn arbitrary_schema_atom(g: &mut Gen, num_parameters: usize) -> Atom {
    let predicate = below(g, TASK_ARITIES.len());
    let arguments = (0..TASK_ARITIES[predicate])
        .map(|_| {
            if num_parameters == 0 || below(g, 4) == 0 {
                Argument::Object(ObjectId(below(g, NUM_OBJECTS)))
            } else {
                Argument::Variable(Variable(below(g, num_parameters)))
            }
        })
        .collect();

    Atom::new(PredicateId(predicate), arguments)
}

impl Arbitrary for SchemaCase {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut task = Task::new("arbitrary");
        for (index, arity) in TASK_ARITIES.iter().enumerate() {
            task.add_predicate(format!("p{index}"), *arity).unwrap();
        }
        for index in 0..NUM_OBJECTS {
            task.add_object(format!("o{index}")).unwrap();
        }

        for (predicate, arity) in TASK_ARITIES.iter().enumerate() {
            for _ in 0..below(g, 6) {
                let tuple = (0..*arity)
                    .map(|_| ObjectId(below(g, NUM_OBJECTS)))
                    .collect();
                task.add_initial_atom(GroundAtom::new(PredicateId(predicate), tuple))
                    .unwrap();
            }
        }

        let num_parameters = below(g, 4);
        let parameters = (0..num_parameters)
            .map(|index| format!("?x{index}"))
            .collect();
        let mut schema = ActionSchema::new("act", parameters);
        for _ in 0..below(g, 4) {
            schema = schema.with_precondition(arbitrary_schema_atom(g, num_parameters));
        }
        for _ in 0..below(g, 3) {
            schema = schema.with_negative_precondition(arbitrary_schema_atom(g, num_parameters));
        }
        task.add_action_schema(schema).unwrap();

        Self { task }
    }
}

/// Compute the applicable actions of `schema` by testing every assignment of objects to its parameters.
pub(crate) fn naive_applicable_actions(
    schema: &ActionSchema,
    task: &Task,
    state: &DBState,
) -> Vec<GroundAction> {
    let mut assignments = vec![Vec::<ObjectId>::new()];
    for _ in 0..schema.num_parameters() {
        assignments = assignments
            .into_iter()
            .flat_map(|assignment| {
                task.object_ids().map(move |object| {
                    let mut extended = assignment.clone();
                    extended.push(object);
                    extended
                })
            })
            .collect();
    }

    let holds = |atom: &Atom, arguments: &[ObjectId]| {
        atom.ground(|variable| arguments.get(variable.0).copied())
            .is_some_and(|atom| state.contains(&atom))
    };

    assignments
        .into_iter()
        .filter(|arguments| {
            schema
                .preconditions()
                .iter()
                .all(|atom| holds(atom, arguments.as_slice()))
                && !schema
                    .negative_preconditions()
                    .iter()
                    .any(|atom| holds(atom, arguments.as_slice()))
        })
        .map(|arguments| GroundAction::new(schema.index(), arguments))
        .collect()
}

#[path = "../tests/common/mod.rs"]
mod common;

/// Build the blocksworld task of the integration tests with the given number of blocks.
pub(crate) fn blocksworld(num_blocks: usize) -> Task {
    common::blocksworld(num_blocks).expect("blocksworld task is valid")
}
