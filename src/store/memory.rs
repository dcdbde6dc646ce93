//! In-memory store implementations.
//!
//! These back the integration tests (and local runs without a database) with
//! the same observable semantics as the Postgres stores: email uniqueness on
//! the user store, opaque ids, store-native ordering on list.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{NewUser, Task, TaskRecord, User};
use crate::store::{StoreError, TaskStore, UserStore};

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::Backend("store mutex poisoned".to_string())
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|user| user.id.to_string() == id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryTaskStore {
    documents: Mutex<HashMap<String, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, id: &str, task: &Task) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().map_err(poisoned)?;
        documents.insert(id.to_string(), task.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let documents = self.documents.lock().map_err(poisoned)?;
        Ok(documents.get(id).cloned())
    }

    async fn update(&self, id: &str, task: &Task) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().map_err(poisoned)?;
        match documents.get_mut(id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(StoreError::Backend("no such document".to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().map_err(poisoned)?;
        documents.remove(id);
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        let documents = self.documents.lock().map_err(poisoned)?;
        Ok(documents
            .iter()
            .filter(|(_, task)| task.owner_id == owner_id)
            .map(|(id, task)| TaskRecord {
                id: id.clone(),
                task: task.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            name: "Test".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_a_conflict() {
        let store = MemoryUserStore::new();
        store.insert(new_user("a@example.com")).await.unwrap();

        match store.insert(new_user("a@example.com")).await {
            Err(StoreError::Conflict) => {}
            other => panic!("expected Conflict, got {:?}", other.map(|u| u.email)),
        }
    }

    #[actix_rt::test]
    async fn test_find_by_id_roundtrip() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("a@example.com")).await.unwrap();

        let found = store.find_by_id(&user.id.to_string()).await.unwrap();
        assert_eq!(found.map(|u| u.email).as_deref(), Some("a@example.com"));

        let missing = store.find_by_id("not-an-id").await.unwrap();
        assert!(missing.is_none());
    }

    #[actix_rt::test]
    async fn test_list_by_owner_filters() {
        let store = MemoryTaskStore::new();
        store
            .insert("t1", &Task::new("A".to_string(), None, false, "alice"))
            .await
            .unwrap();
        store
            .insert("t2", &Task::new("B".to_string(), None, false, "bob"))
            .await
            .unwrap();

        let tasks = store.list_by_owner("alice").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task.title, "A");

        assert!(store.list_by_owner("carol").await.unwrap().is_empty());
    }
}
