//! `PostgreSQL` repository implementation for assignment links.

use super::{
    config::TaskPgPool,
    models::{LinkRow, NewLinkRow},
    schema::task_users,
};
use crate::task::{
    domain::{AssignmentPlan, AssignmentTarget, TaskId, TaskUserLink, UserId},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed assignment repository.
///
/// Each reconciliation runs in one transaction that first takes a
/// transaction-scoped advisory lock keyed by the task id, so concurrent
/// reconciliations of one task queue behind each other while other tasks
/// proceed in parallel.
#[derive(Debug, Clone)]
pub struct PostgresAssignmentRepository {
    pool: TaskPgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AssignmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AssignmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AssignmentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AssignmentRepositoryError::persistence)?
    }
}

impl From<diesel::result::Error> for AssignmentRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn find_active_by_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentRepositoryResult<Vec<TaskUserLink>> {
        self.run_blocking(move |connection| {
            let rows = task_users::table
                .filter(task_users::task_id.eq(task_id.value()))
                .filter(task_users::active.eq(true))
                .select(LinkRow::as_select())
                .load::<LinkRow>(connection)?;
            rows.into_iter().map(row_to_link).collect()
        })
        .await
    }

    async fn find_all_by_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentRepositoryResult<Vec<TaskUserLink>> {
        self.run_blocking(move |connection| {
            let rows = task_users::table
                .filter(task_users::task_id.eq(task_id.value()))
                .order(task_users::user_id.asc())
                .select(LinkRow::as_select())
                .load::<LinkRow>(connection)?;
            rows.into_iter().map(row_to_link).collect()
        })
        .await
    }

    async fn find_active_task_ids_by_user(
        &self,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskId>> {
        self.run_blocking(move |connection| {
            let ids = task_users::table
                .filter(task_users::user_id.eq(user_id.value()))
                .filter(task_users::active.eq(true))
                .select(task_users::task_id)
                .distinct()
                .order(task_users::task_id.asc())
                .load::<i64>(connection)?;
            Ok(ids.into_iter().map(TaskId::from_raw).collect())
        })
        .await
    }

    async fn reconcile_links(
        &self,
        task_id: TaskId,
        target: &AssignmentTarget,
        assigned_at: DateTime<Utc>,
    ) -> AssignmentRepositoryResult<AssignmentPlan> {
        let target = target.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, AssignmentRepositoryError, _>(|tx| {
                lock_task_links(tx, task_id)?;
                let existing = task_users::table
                    .filter(task_users::task_id.eq(task_id.value()))
                    .select(LinkRow::as_select())
                    .for_update()
                    .load::<LinkRow>(tx)?
                    .into_iter()
                    .map(row_to_link)
                    .collect::<AssignmentRepositoryResult<Vec<_>>>()?;

                let plan = AssignmentPlan::compute(&existing, &target);
                apply_plan(tx, task_id, &plan, assigned_at)?;
                Ok(plan)
            })
        })
        .await
    }
}

fn lock_task_links(connection: &mut PgConnection, task_id: TaskId) -> QueryResult<usize> {
    diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
        .bind::<diesel::sql_types::BigInt, _>(task_id.value())
        .execute(connection)
}

fn apply_plan(
    connection: &mut PgConnection,
    task_id: TaskId,
    plan: &AssignmentPlan,
    assigned_at: DateTime<Utc>,
) -> AssignmentRepositoryResult<()> {
    let task_key = task_id.value();

    let deactivate: Vec<i64> = plan.deactivate().iter().copied().map(UserId::value).collect();
    if !deactivate.is_empty() {
        diesel::update(
            task_users::table
                .filter(task_users::task_id.eq(task_key))
                .filter(task_users::user_id.eq_any(deactivate)),
        )
        .set(task_users::active.eq(false))
        .execute(connection)?;
    }

    let existing: Vec<i64> = plan.upsert_existing().map(UserId::value).collect();
    if !existing.is_empty() {
        diesel::update(
            task_users::table
                .filter(task_users::task_id.eq(task_key))
                .filter(task_users::user_id.eq_any(existing)),
        )
        .set((
            task_users::active.eq(true),
            task_users::assigned_at.eq(assigned_at),
        ))
        .execute(connection)?;
    }

    let inserts: Vec<NewLinkRow> = plan
        .insert()
        .iter()
        .map(|user_id| NewLinkRow {
            task_id: task_key,
            user_id: user_id.value(),
            assigned_at,
            active: true,
        })
        .collect();
    if !inserts.is_empty() {
        diesel::insert_into(task_users::table)
            .values(&inserts)
            .on_conflict((task_users::task_id, task_users::user_id))
            .do_update()
            .set((
                task_users::active.eq(true),
                task_users::assigned_at.eq(assigned_at),
            ))
            .execute(connection)?;
    }

    Ok(())
}

fn row_to_link(row: LinkRow) -> AssignmentRepositoryResult<TaskUserLink> {
    let user_id = UserId::new(row.user_id).map_err(AssignmentRepositoryError::persistence)?;
    Ok(TaskUserLink::from_persisted(
        TaskId::from_raw(row.task_id),
        user_id,
        row.assigned_at,
        row.active,
    ))
}
