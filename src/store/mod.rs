//! Storage boundary for users and tasks.
//!
//! Handlers only see these traits, so a persistent backend can replace the
//! in-memory implementations without touching the routes.

pub mod memory;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskPatch, User};

pub use memory::{InMemoryTaskStore, InMemoryUserStore};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Appends a user. Fails with `AppError::Conflict` if the email is taken.
    async fn insert(&self, user: User) -> Result<(), AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Replaces the user's preference list. Returns `false` if no such user exists.
    async fn update_preferences(
        &self,
        email: &str,
        preferences: Vec<String>,
    ) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a task under a freshly assigned id and returns it.
    async fn insert(&self, task: NewTask) -> Result<Task, AppError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Task>, AppError>;

    /// All tasks in insertion order.
    async fn find_all(&self) -> Result<Vec<Task>, AppError>;

    /// Applies `patch` and returns the updated task, or `None` if the id is unknown.
    async fn update_by_id(&self, id: u64, patch: TaskPatch) -> Result<Option<Task>, AppError>;

    /// Returns `false` if the id is unknown.
    async fn delete_by_id(&self, id: u64) -> Result<bool, AppError>;
}
