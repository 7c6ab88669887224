//! Task persistence tests against `PostgreSQL`.

use super::helpers::{TestDatabase, seed_task, test_runtime};
use crate::test_helpers::{FixedClock, base_instant};
use chrono::Duration;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use taskroster::task::{
    domain::{PersistedTaskData, Task, TaskChanges, TaskId, TaskPriority, TaskStatus, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
fn insert_assigns_identifiers_and_round_trips(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = TestDatabase::create(shared_test_cluster, "task_round_trip")?;
    test_runtime().block_on(async {
        let repository = db.tasks();
        let clock = FixedClock::default();

        let first = seed_task(&repository, &clock, "First").await?;
        let second = seed_task(&repository, &clock, "Second").await?;
        let stored = repository
            .find_by_id(second)
            .await?
            .ok_or_else(|| eyre::eyre!("inserted task should be found"))?;

        assert!(second > first);
        assert_eq!(stored.title(), "Second");
        assert_eq!(stored.priority(), TaskPriority::Low);
        assert_eq!(stored.status(), TaskStatus::NotStarted);
        assert!(stored.is_active());
        assert_eq!(stored.created_at(), base_instant());
        assert_eq!(stored.updated_at(), base_instant());
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn update_overwrites_mutable_fields(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = TestDatabase::create(shared_test_cluster, "task_update")?;
    test_runtime().block_on(async {
        let repository = db.tasks();
        let clock = FixedClock::default();
        let id = seed_task(&repository, &clock, "Draft").await?;
        let mut task = repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| eyre::eyre!("seeded task should be found"))?;
        clock.advance(Duration::minutes(15));

        task.apply(
            TaskChanges {
                title: Some("Published".to_owned()),
                description: Some(Some("Now with details".to_owned())),
                status: Some(TaskStatus::Completed),
                assigned_user_id: Some(Some(UserId::new(11)?)),
                ..TaskChanges::default()
            },
            &clock,
        )?;
        task.soft_delete(&clock);
        repository.update(&task).await?;

        let stored = repository.find_by_id(id).await?;
        assert_eq!(stored, Some(task));
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn update_of_missing_row_is_not_found(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = TestDatabase::create(shared_test_cluster, "task_missing")?;
    test_runtime().block_on(async {
        let repository = db.tasks();
        let clock = FixedClock::default();
        let id = seed_task(&repository, &clock, "Real").await?;
        let stored = repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| eyre::eyre!("seeded task should be found"))?;
        let missing = TaskId::from_raw(id.value() + 1_000);
        let moved = Task::from_persisted(PersistedTaskData {
            id: missing,
            title: stored.title().to_owned(),
            description: None,
            priority: stored.priority(),
            status: TaskStatus::InProgress,
            active: true,
            created_at: stored.created_at(),
            updated_at: stored.updated_at(),
            project_id: stored.project_id(),
            assigned_user_id: None,
        });

        let result = repository.update(&moved).await;

        assert!(matches!(
            result,
            Err(TaskRepositoryError::NotFound(not_found)) if not_found == missing
        ));
        assert_eq!(repository.find_by_id(missing).await?, None);
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn find_all_returns_every_row_in_id_order(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let db = TestDatabase::create(shared_test_cluster, "task_find_all")?;
    test_runtime().block_on(async {
        let repository = db.tasks();
        let clock = FixedClock::default();
        let ids = [
            seed_task(&repository, &clock, "One").await?,
            seed_task(&repository, &clock, "Two").await?,
            seed_task(&repository, &clock, "Three").await?,
        ];
        let mut hidden = repository
            .find_by_id(ids[1])
            .await?
            .ok_or_else(|| eyre::eyre!("seeded task should be found"))?;
        hidden.soft_delete(&clock);
        repository.update(&hidden).await?;

        let all = repository.find_all().await?;

        assert_eq!(
            all.iter().map(|task| task.id()).collect::<Vec<_>>(),
            ids.to_vec()
        );
        assert_eq!(
            all.iter().map(|task| task.is_active()).collect::<Vec<_>>(),
            vec![true, false, true]
        );
        Ok::<(), eyre::Report>(())
    })
}
