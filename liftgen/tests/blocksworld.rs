use std::collections::{BTreeSet, HashSet, VecDeque};

mod common;

use common::blocksworld;
use liftgen::{
    components::{GroundAtom, ObjectId},
    datalog::{annotation::schema_name_annotation, facts::FactStore, program::Program},
    parameters::{GroundingParameters, JoinOrderingKind},
    state::DBState,
    successor_generators::{GroundAction, JoinSuccessorGenerator, SuccessorGenerator},
    task::Task,
};
use test_log::test;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn applicable_actions<Generator: SuccessorGenerator>(
    generator: &Generator,
    task: &Task,
    state: &DBState,
) -> Result<Vec<GroundAction>, liftgen::error::Error> {
    let mut result = Vec::new();
    for schema in task.action_schemas() {
        result.extend(generator.applicable_actions(schema, state)?);
    }

    Ok(result)
}

#[test]
fn initial_actions() -> TestResult {
    let task = blocksworld(3)?;
    let generator = JoinSuccessorGenerator::inverse_ordered(&task);

    let actions = applicable_actions(&generator, &task, &task.initial_state())?;
    assert_eq!(
        actions,
        (0..3)
            .map(|block| GroundAction::new(0, vec![ObjectId(block)]))
            .collect::<Vec<_>>()
    );

    Ok(())
}

#[test]
fn stack_after_pickup() -> TestResult {
    let task = blocksworld(3)?;
    let parameters = GroundingParameters::from_json(r#"{ "join_ordering": "declaration" }"#)?;
    assert_eq!(parameters.join_ordering, JoinOrderingKind::Declaration);
    let generator = JoinSuccessorGenerator::with_parameters(&task, &parameters);

    let holding = generator.generate_successor(
        &GroundAction::new(0, vec![ObjectId(0)]),
        &task.initial_state(),
    )?;

    let on = task.predicate_id("on").ok_or("missing predicate")?;
    let handempty = task.predicate_id("handempty").ok_or("missing predicate")?;
    assert!(!holding.contains(&GroundAtom::new(handempty, vec![])));

    let actions = applicable_actions(&generator, &task, &holding)?;
    assert_eq!(
        actions,
        vec![
            GroundAction::new(1, vec![ObjectId(0)]),
            GroundAction::new(2, vec![ObjectId(0), ObjectId(1)]),
            GroundAction::new(2, vec![ObjectId(0), ObjectId(2)]),
        ]
    );

    let stacked = generator.generate_successor(&actions[1], &holding)?;
    assert!(stacked.contains(&GroundAtom::new(on, vec![ObjectId(0), ObjectId(1)])));
    assert!(stacked.contains(&GroundAtom::new(handempty, vec![])));

    let unstack = applicable_actions(&generator, &task, &stacked)?
        .into_iter()
        .filter(|action| action.schema() == 3)
        .collect::<Vec<_>>();
    assert_eq!(
        unstack,
        vec![GroundAction::new(3, vec![ObjectId(0), ObjectId(1)])]
    );

    Ok(())
}

#[test]
fn breadth_first_search_reaches_goal() -> TestResult {
    let task = blocksworld(3)?;
    let generator = JoinSuccessorGenerator::inverse_ordered(&task);

    let initial = task.initial_state();
    let mut visited = HashSet::from([initial.clone()]);
    let mut queue = VecDeque::from([(initial, 0)]);

    let mut plan_length = None;
    while let Some((state, depth)) = queue.pop_front() {
        if task.is_goal(&state) {
            plan_length = Some(depth);
            break;
        }

        for action in applicable_actions(&generator, &task, &state)? {
            let successor = generator.generate_successor(&action, &state)?;
            if visited.insert(successor.clone()) {
                queue.push_back((successor, depth + 1));
            }
        }
    }

    // pickup b1, stack b1 b2, pickup b0, stack b0 b1
    assert_eq!(plan_length, Some(4));

    Ok(())
}

#[test]
fn relaxed_reachability_derives_goal() -> TestResult {
    let task = blocksworld(3)?;
    let program = Program::from_task(&task).split(schema_name_annotation, &task)?;

    let mut facts: FactStore = program.facts_from_state(&task.initial_state());
    loop {
        let mut derived = BTreeSet::new();
        for rule in program.rules() {
            for derivation in rule.derive(&facts)? {
                if !facts.contains(&derivation.atom) {
                    derived.insert(derivation.atom);
                }
            }
        }

        if derived.is_empty() {
            break;
        }
        facts.extend(derived);
    }

    let goal = GroundAtom::new(program.reserved().goal, vec![]);
    assert!(facts.contains(&goal));

    let on = task.predicate_id("on").ok_or("missing predicate")?;
    assert!(facts.contains(&GroundAtom::new(on, vec![ObjectId(2), ObjectId(0)])));

    Ok(())
}
