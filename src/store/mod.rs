//!
//! # Store Access Layer
//!
//! The stores are external collaborators: the user store and the task
//! document store. Handlers never talk to a driver directly; they go through
//! the `UserStore`/`TaskStore` traits so that the outcome of every call is an
//! explicit value (`Ok(Some(..))`, `Ok(None)`, `Err(Conflict)`,
//! `Err(Backend(..))`) that each handler switches on, rather than a driver
//! exception.
//!
//! Two implementations exist: [`postgres`] for production and [`memory`] for
//! tests and local runs without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{NewUser, Task, TaskRecord, User};

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

/// Failure of a single store call.
#[derive(Debug)]
pub enum StoreError {
    /// A unique-key violation (the user store's email uniqueness).
    Conflict,
    /// Any other backend failure, carrying the driver's message.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Conflict => write!(f, "unique key conflict"),
            StoreError::Backend(msg) => write!(f, "store failure: {}", msg),
        }
    }
}

/// Maps driver errors onto the explicit store outcomes: unique-key
/// violations become `Conflict`, everything else `Backend`.
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::Conflict
            }
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

/// Persistence operations on user identity records.
///
/// Ids are assigned by the store on insert. Lookups by id take the opaque
/// string form carried in token claims; an id the store cannot interpret is
/// simply "not found".
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
}

/// Persistence operations on task documents, keyed by caller-supplied ids.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, id: &str, task: &Task) -> Result<(), StoreError>;
    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError>;
    async fn update(&self, id: &str, task: &Task) -> Result<(), StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TaskRecord>, StoreError>;
}
