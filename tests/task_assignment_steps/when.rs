//! When steps for task assignment BDD scenarios.

use super::world::{TaskAssignmentWorld, parse_users, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskroster::task::{domain::UserId, services::CreateTaskRequest};

#[when(r#"the task is assigned to users "{user_ids}""#)]
fn task_is_assigned(world: &mut TaskAssignmentWorld, user_ids: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let users = parse_users(&user_ids)?;
    run_async(world.reconciler.reconcile(task_id, users)).wrap_err("reconcile assignees")?;
    Ok(())
}

#[when("every user is unassigned from the task")]
fn every_user_unassigned(world: &mut TaskAssignmentWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    run_async(world.reconciler.reconcile(task_id, Vec::<UserId>::new()))
        .wrap_err("unassign every user")?;
    Ok(())
}

#[when(r#"a task titled "{title}" is submitted"#)]
fn task_is_submitted(world: &mut TaskAssignmentWorld, title: String) {
    let result = run_async(
        world
            .service
            .create(CreateTaskRequest::new(title, "Low", 1)),
    );
    if let Ok(ref created) = result {
        world.current_task = Some(created.clone());
    }
    world.last_create_result = Some(result);
}
