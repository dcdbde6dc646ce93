use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::task::{CreateTaskRequest, UpdateTaskRequest};
use crate::models::Task;
use crate::state::AppState;
use crate::store::StoreError;

fn store_failure(action: &str, err: StoreError) -> AppError {
    log::error!("task store call failed: {}", err);
    AppError::Internal(format!("Something went wrong when {} the task", action))
}

/// Create a task owned by the caller
///
/// The owner is always the authenticated caller; the id is a fresh uuid
/// assigned here and echoed back so the client can address the task.
#[post("/create")]
pub async fn create_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let title = payload.title.as_deref().unwrap_or("");
    if title.is_empty() {
        return Err(AppError::BadRequest("Task title is required".into()));
    }

    let task = Task::new(
        title.to_string(),
        payload.description.clone(),
        payload.completed,
        &caller.0,
    );
    let id = Uuid::new_v4().to_string();

    state
        .tasks
        .insert(&id, &task)
        .await
        .map_err(|err| store_failure("creating", err))?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "code": 201,
        "message": "Task created successfully",
        "id": id,
    })))
}

/// Update a task owned by the caller
///
/// Existence is checked before ownership: a missing task is 400 "Task not
/// found", someone else's task is 403. Partial-update semantics live in
/// [`Task::apply_update`].
#[put("/update")]
pub async fn update_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    payload: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();
    let task_id = payload.task_id.as_deref().unwrap_or("");
    if task_id.is_empty() {
        return Err(AppError::BadRequest("Task id is required".into()));
    }

    let existing = state
        .tasks
        .get(task_id)
        .await
        .map_err(|err| store_failure("updating", err))?;

    let mut task = match existing {
        Some(task) => task,
        None => return Err(AppError::BadRequest("Task not found".into())),
    };

    if task.owner_id != caller.0 {
        return Err(AppError::Forbidden(
            "You don't have access to update this task".into(),
        ));
    }

    task.apply_update(&payload);

    state
        .tasks
        .update(task_id, &task)
        .await
        .map_err(|err| store_failure("updating", err))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "code": 200,
        "message": "Task updated successfully",
    })))
}

/// Delete a task owned by the caller
#[delete("/delete/{task_id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    let existing = state
        .tasks
        .get(&task_id)
        .await
        .map_err(|err| store_failure("deleting", err))?;

    let task = match existing {
        Some(task) => task,
        None => return Err(AppError::BadRequest("Task not found".into())),
    };

    if task.owner_id != caller.0 {
        return Err(AppError::Forbidden(
            "You don't have access to delete this task".into(),
        ));
    }

    state
        .tasks
        .delete(&task_id)
        .await
        .map_err(|err| store_failure("deleting", err))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "code": 200,
        "message": "Task deleted successfully",
    })))
}

/// List every task owned by the caller
///
/// Order is store-native; owning no tasks yields an empty list, not an error.
#[get("/getAll")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_by_owner(&caller.0).await.map_err(|err| {
        log::error!("task store call failed: {}", err);
        AppError::Internal("Something went wrong when retrieving tasks".into())
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "code": 200,
        "tasks": tasks,
    })))
}

/// Fetch a single task owned by the caller
#[get("/get/{task_id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    let existing = state
        .tasks
        .get(&task_id)
        .await
        .map_err(|err| store_failure("retrieving", err))?;

    let task = match existing {
        Some(task) => task,
        None => return Err(AppError::BadRequest("Task not found".into())),
    };

    if task.owner_id != caller.0 {
        return Err(AppError::Forbidden(
            "You don't have access to retrieve this task".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "code": 200,
        "task": task,
    })))
}
