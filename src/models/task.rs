use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A task document as held by the task store.
///
/// The store id is kept outside this struct (see [`TaskRecord`]): the store
/// assigns ids and the document itself only knows its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Opaque identity id of the creator, copied from the verified token at
    /// creation time and never reassigned.
    pub owner_id: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Milliseconds since the Unix epoch.
    pub updated_at: i64,
}

/// A task annotated with its store-assigned id, as returned by list/get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    #[serde(flatten)]
    pub task: Task,
}

/// Payload for `POST /tasks/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Payload for `PUT /tasks/update`.
///
/// `title` and `description` are partial: an absent or empty value leaves the
/// stored field unchanged (there is no "clear the field" operation).
/// `completed` is not partial: whatever boolean arrives is written, and an
/// omitted flag defaults to `false`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a new `Task` owned by `owner_id`, with both timestamps set to
    /// the current time.
    pub fn new(title: String, description: Option<String>, completed: bool, owner_id: &str) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            title,
            description,
            completed,
            owner_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the partial-update semantics of `PUT /tasks/update` and
    /// refreshes `updated_at`. Ownership and timestamps of creation are left
    /// untouched.
    pub fn apply_update(&mut self, update: &UpdateTaskRequest) {
        if let Some(title) = update.title.as_deref().filter(|t| !t.is_empty()) {
            self.title = title.to_string();
        }
        if let Some(description) = update.description.as_deref().filter(|d| !d.is_empty()) {
            self.description = Some(description.to_string());
        }
        self.completed = update.completed;
        self.updated_at = Utc::now().timestamp_millis();
    }
}
