//! Then steps for task assignment BDD scenarios.

use super::world::{TaskAssignmentWorld, parse_users, run_async};
use rstest_bdd_macros::then;
use taskroster::task::{
    domain::UserId, services::TaskLifecycleError, validation::ValidationError,
};

fn active_assignees(world: &TaskAssignmentWorld) -> Result<Vec<UserId>, eyre::Report> {
    let task_id = world.task()?.id();
    let mut ids: Vec<UserId> = run_async(world.reconciler.active_links_for_task(task_id))?
        .iter()
        .map(|link| link.user_id())
        .collect();
    ids.sort();
    Ok(ids)
}

#[then(r#"the active assignees are "{user_ids}""#)]
fn active_assignees_are(world: &TaskAssignmentWorld, user_ids: String) -> Result<(), eyre::Report> {
    let mut expected = parse_users(&user_ids)?;
    expected.sort();
    let actual = active_assignees(world)?;
    if actual != expected {
        return Err(eyre::eyre!(
            "expected active assignees {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then("the task has no active assignees")]
fn no_active_assignees(world: &TaskAssignmentWorld) -> Result<(), eyre::Report> {
    let actual = active_assignees(world)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected no active assignees, found {actual:?}"));
    }
    Ok(())
}

#[then("the task has {count:usize} assignment records")]
fn assignment_record_count(world: &TaskAssignmentWorld, count: usize) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let history = run_async(world.reconciler.link_history_for_task(task_id))?;
    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} assignment records, found {}",
            history.len()
        ));
    }
    Ok(())
}

#[then("user {user_id:i64} has an inactive assignment record")]
fn user_has_inactive_record(world: &TaskAssignmentWorld, user_id: i64) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let user = UserId::new(user_id)?;
    let history = run_async(world.reconciler.link_history_for_task(task_id))?;
    let record = history
        .iter()
        .find(|link| link.user_id() == user)
        .ok_or_else(|| eyre::eyre!("no assignment record for user {user_id}"))?;
    if record.is_active() {
        return Err(eyre::eyre!("assignment record for user {user_id} is still active"));
    }
    Ok(())
}

#[then(r#"the submission fails for the field "{field}""#)]
fn submission_fails_for_field(
    world: &TaskAssignmentWorld,
    field: String,
) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission result"))?;

    match result {
        Err(TaskLifecycleError::Validation(ValidationError::InjectionDetected {
            field: rejected,
        })) if *rejected == field => Ok(()),
        other => Err(eyre::eyre!(
            "expected injection rejection for {field}, got {other:?}"
        )),
    }
}
