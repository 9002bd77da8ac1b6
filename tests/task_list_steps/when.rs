//! When steps for task list BDD scenarios.

use super::world::{TaskListWorld, run_async, todo_id};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("todo {id:u64} is toggled")]
fn toggle_todo(world: &mut TaskListWorld, id: u64) -> Result<(), eyre::Report> {
    let id = todo_id(id)?;
    run_async(world.list()?.toggle(id)).wrap_err("toggle todo")?;
    Ok(())
}

#[when("todo {id:u64} is removed")]
fn remove_todo(world: &mut TaskListWorld, id: u64) -> Result<(), eyre::Report> {
    let id = todo_id(id)?;
    run_async(world.list()?.remove(id)).wrap_err("remove todo")?;
    Ok(())
}

#[when(r#"the todo "{label}" is added"#)]
fn add_todo(world: &mut TaskListWorld, label: String) -> Result<(), eyre::Report> {
    run_async(world.list()?.add(&label)).wrap_err("add todo")?;
    Ok(())
}

#[when("completed todos are cleared")]
fn clear_completed(world: &mut TaskListWorld) -> Result<(), eyre::Report> {
    run_async(world.list()?.clear_completed()).wrap_err("clear completed todos")?;
    Ok(())
}
