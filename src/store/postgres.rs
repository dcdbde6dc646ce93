//! Postgres-backed store implementations.
//!
//! Only runtime queries (`sqlx::query`/`query_as`) are used here, so the
//! crate builds without a live database. The schema lives under
//! `migrations/` and is applied at startup via `sqlx::migrate!`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{NewUser, Task, TaskRecord, User};
use crate::store::{StoreError, TaskStore, UserStore};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) \
             RETURNING id, email, password_hash, name",
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        // Claims carry the id as an opaque string; anything that does not
        // parse back into a stored id cannot match a record.
        let uuid = match Uuid::parse_str(id) {
            Ok(uuid) => uuid,
            Err(_) => return Ok(None),
        };

        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name FROM users WHERE id = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[derive(FromRow)]
struct TaskRow {
    id: String,
    title: String,
    description: Option<String>,
    completed: bool,
    owner_id: String,
    created_at: i64,
    updated_at: i64,
}

impl From<TaskRow> for TaskRecord {
    fn from(row: TaskRow) -> TaskRecord {
        TaskRecord {
            id: row.id,
            task: Task {
                title: row.title,
                description: row.description,
                completed: row.completed,
                owner_id: row.owner_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, id: &str, task: &Task) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO tasks (id, title, description, completed, owner_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(&task.owner_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let row = sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, description, completed, owner_id, created_at, updated_at \
             FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| TaskRecord::from(row).task))
    }

    async fn update(&self, id: &str, task: &Task) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE tasks SET title = $1, description = $2, completed = $3, updated_at = $4 \
             WHERE id = $5",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, description, completed, owner_id, created_at, updated_at \
             FROM tasks WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskRecord::from).collect())
    }
}
