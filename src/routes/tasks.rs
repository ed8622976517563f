use crate::{
    error::AppError,
    models::{TaskInput, TaskPatch},
    store::TaskRepository,
};
use actix_web::{delete, get, http::Method, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// An id that does not parse as a number is an unknown id. `PUT` keeps its
/// JSON error body; the other routes answer with an empty 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        log::debug!("unparseable task id in {}: {}", req.path(), err);
        let message = if req.method() == Method::PUT {
            "Task not found".to_string()
        } else {
            String::new()
        };
        AppError::NotFound(message).into()
    })
}

/// Lists all tasks in insertion order.
///
/// ## Responses:
/// - `200 OK`: a JSON array of tasks.
#[get("")]
pub async fn list_tasks(tasks: web::Data<dyn TaskRepository>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(tasks.find_all().await?))
}

/// Retrieves a task by id.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `404 Not Found`: empty body. A non-numeric id is treated as unknown.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<dyn TaskRepository>,
    task_id: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .find_by_id(task_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(String::new()))?;
    Ok(HttpResponse::Ok().json(task))
}

/// Creates a task.
///
/// ## Request Body:
/// - `title`: non-empty string (required).
/// - `description`: non-empty string (required).
/// - `completed`: boolean (required).
///
/// ## Responses:
/// - `201 Created`: the new task, with its assigned id.
/// - `400 Bad Request`: a field is missing, empty, or of the wrong type.
#[post("")]
pub async fn create_task(
    tasks: web::Data<dyn TaskRepository>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let new_task = task_data.into_inner().into_new_task()?;
    let task = tasks.insert(new_task).await?;
    log::info!("created task {}", task.id);
    Ok(HttpResponse::Created().json(task))
}

/// Updates the supplied fields of a task.
///
/// ## Request Body:
/// Any subset of `title`, `description`, `completed`.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: a supplied title/description is empty, or `completed` is not a boolean.
/// - `404 Not Found`: `{"error": "Task not found"}`. Checked before field validation.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<dyn TaskRepository>,
    task_id: web::Path<u64>,
    task_data: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    if tasks.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("Task not found".into()));
    }

    task_data.validate()?;

    let task = tasks
        .update_by_id(id, task_data.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    log::info!("updated task {}", task.id);
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `200 OK`: empty body.
/// - `404 Not Found`: empty body.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<dyn TaskRepository>,
    task_id: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    if !tasks.delete_by_id(id).await? {
        return Err(AppError::NotFound(String::new()));
    }
    log::info!("deleted task {}", id);
    Ok(HttpResponse::Ok().finish())
}
