//! Assignment reconciliation integration tests against the in-memory store.

use super::helpers::{Roster, create_task, roster};
use crate::test_helpers::{base_instant, users};
use chrono::Duration;
use rstest::rstest;
use taskroster::task::domain::{TaskId, UserId};

async fn active(roster: &Roster, task_id: TaskId) -> Result<Vec<UserId>, eyre::Report> {
    let mut ids: Vec<UserId> = roster
        .reconciler
        .active_links_for_task(task_id)
        .await?
        .iter()
        .map(|link| link.user_id())
        .collect();
    ids.sort();
    Ok(ids)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_target_adds_no_rows(roster: Roster) -> Result<(), eyre::Report> {
    let task = create_task(&roster, "Sprint review", 1).await?;

    roster.reconciler.reconcile(task, users(&[1, 2, 3])).await?;
    roster.clock.advance(Duration::minutes(1));
    roster.reconciler.reconcile(task, users(&[3, 2, 1])).await?;

    let history = roster.reconciler.link_history_for_task(task).await?;
    assert_eq!(active(&roster, task).await?, users(&[1, 2, 3]));
    assert_eq!(history.len(), 3);
    assert!(
        history
            .iter()
            .all(|link| link.assigned_at() == base_instant() + Duration::minutes(1))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn swapping_users_keeps_one_row_per_pair(roster: Roster) -> Result<(), eyre::Report> {
    let task = create_task(&roster, "Release", 1).await?;

    roster.reconciler.reconcile(task, users(&[1, 2])).await?;
    roster.reconciler.reconcile(task, users(&[2, 3])).await?;
    roster.reconciler.reconcile(task, users(&[1])).await?;

    let history = roster.reconciler.link_history_for_task(task).await?;
    let inactive: Vec<UserId> = history
        .iter()
        .filter(|link| !link.is_active())
        .map(|link| link.user_id())
        .collect();
    assert_eq!(active(&roster, task).await?, users(&[1]));
    assert_eq!(history.len(), 3);
    assert_eq!(inactive, users(&[2, 3]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_view_tracks_active_links_only(roster: Roster) -> Result<(), eyre::Report> {
    let first = create_task(&roster, "First", 1).await?;
    let second = create_task(&roster, "Second", 1).await?;
    let user = users(&[5])[0];

    roster.reconciler.reconcile(first, [user]).await?;
    roster.reconciler.reconcile(second, [user]).await?;
    roster.reconciler.reconcile(first, Vec::new()).await?;

    assert_eq!(
        roster.reconciler.active_task_ids_for_user(user).await?,
        vec![second]
    );
    Ok(())
}
