//! Planning tasks shared by the unit and integration tests

use liftgen::{
    components::{Atom, GroundAtom, Variable},
    task::{ActionSchema, Task, TaskError},
};

/// Build a blocksworld task with the given number of blocks.
///
/// Predicates: `on/2`, `ontable/1`, `clear/1`, `handempty/0`, `holding/1`.
/// Schemas: `pickup`, `putdown`, `stack`, `unstack`.
/// All blocks start on the table, the goal is a single tower `b0` on `b1` on ... .
pub fn blocksworld(num_blocks: usize) -> Result<Task, TaskError> {
    let mut task = Task::new("blocksworld");
    let on = task.add_predicate("on", 2)?;
    let ontable = task.add_predicate("ontable", 1)?;
    let clear = task.add_predicate("clear", 1)?;
    let handempty = task.add_predicate("handempty", 0)?;
    let holding = task.add_predicate("holding", 1)?;

    let x = Variable(0);
    let y = Variable(1);
    let parameters = |count: usize| (0..count).map(|index| format!("?v{index}")).collect();

    task.add_action_schema(
        ActionSchema::new("pickup", parameters(1))
            .with_precondition(Atom::with_variables(clear, [x]))
            .with_precondition(Atom::with_variables(ontable, [x]))
            .with_precondition(Atom::new(handempty, vec![]))
            .with_add_effect(Atom::with_variables(holding, [x]))
            .with_delete_effect(Atom::with_variables(clear, [x]))
            .with_delete_effect(Atom::with_variables(ontable, [x]))
            .with_delete_effect(Atom::new(handempty, vec![])),
    )?;
    task.add_action_schema(
        ActionSchema::new("putdown", parameters(1))
            .with_precondition(Atom::with_variables(holding, [x]))
            .with_add_effect(Atom::with_variables(clear, [x]))
            .with_add_effect(Atom::with_variables(ontable, [x]))
            .with_add_effect(Atom::new(handempty, vec![]))
            .with_delete_effect(Atom::with_variables(holding, [x])),
    )?;
    task.add_action_schema(
        ActionSchema::new("stack", parameters(2))
            .with_precondition(Atom::with_variables(holding, [x]))
            .with_precondition(Atom::with_variables(clear, [y]))
            .with_add_effect(Atom::with_variables(on, [x, y]))
            .with_add_effect(Atom::with_variables(clear, [x]))
            .with_add_effect(Atom::new(handempty, vec![]))
            .with_delete_effect(Atom::with_variables(holding, [x]))
            .with_delete_effect(Atom::with_variables(clear, [y])),
    )?;
    task.add_action_schema(
        ActionSchema::new("unstack", parameters(2))
            .with_precondition(Atom::with_variables(on, [x, y]))
            .with_precondition(Atom::with_variables(clear, [x]))
            .with_precondition(Atom::new(handempty, vec![]))
            .with_add_effect(Atom::with_variables(holding, [x]))
            .with_add_effect(Atom::with_variables(clear, [y]))
            .with_delete_effect(Atom::with_variables(on, [x, y]))
            .with_delete_effect(Atom::with_variables(clear, [x]))
            .with_delete_effect(Atom::new(handempty, vec![])),
    )?;

    let blocks = (0..num_blocks)
        .map(|index| task.add_object(format!("b{index}")))
        .collect::<Result<Vec<_>, _>>()?;

    task.add_initial_atom(GroundAtom::new(handempty, vec![]))?;
    for block in &blocks {
        task.add_initial_atom(GroundAtom::new(ontable, vec![*block]))?;
        task.add_initial_atom(GroundAtom::new(clear, vec![*block]))?;
    }
    for pair in blocks.windows(2) {
        task.add_goal_atom(GroundAtom::new(on, vec![pair[0], pair[1]]))?;
    }

    Ok(task)
}
