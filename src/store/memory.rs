use async_trait::async_trait;
use std::sync::RwLock;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskPatch, User};

/// Users kept in a vector, scanned linearly by email.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<(), AppError> {
        let mut users = self.users.write()?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".into()));
        }
        users.push(user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read()?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read()?.clone())
    }

    async fn update_preferences(
        &self,
        email: &str,
        preferences: Vec<String>,
    ) -> Result<bool, AppError> {
        let mut users = self.users.write()?;
        match users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.preferences = preferences;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

struct TaskTable {
    tasks: Vec<Task>,
    next_id: u64,
}

/// Tasks kept in insertion order.
///
/// Ids come from a counter that only moves forward, so an id freed by a
/// deletion is never handed out again.
pub struct InMemoryTaskStore {
    table: RwLock<TaskTable>,
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::with_tasks(Vec::new())
    }
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing tasks. The counter resumes after the largest seeded id.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            table: RwLock::new(TaskTable { tasks, next_id }),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, AppError> {
        let mut table = self.table.write()?;
        let task = Task::from_new(table.next_id, task);
        table.next_id += 1;
        table.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Task>, AppError> {
        let table = self.table.read()?;
        Ok(table.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.table.read()?.tasks.clone())
    }

    async fn update_by_id(&self, id: u64, patch: TaskPatch) -> Result<Option<Task>, AppError> {
        let mut table = self.table.write()?;
        Ok(table.tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.apply(patch);
            task.clone()
        }))
    }

    async fn delete_by_id(&self, id: u64) -> Result<bool, AppError> {
        let mut table = self.table.write()?;
        match table.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                table.tasks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(email: &str) -> User {
        User {
            name: "Ada".into(),
            email: email.into(),
            password_hash: "hash".into(),
            preferences: vec![],
        }
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            description: "desc".into(),
            completed: false,
        }
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(user("ada@example.com")).await.unwrap();

        let result = store.insert(user("ada@example.com")).await;
        assert_eq!(
            result,
            Err(AppError::Conflict("User already exists".into()))
        );
        assert_eq!(store.find_all().await.unwrap().len(), 1);

        // Matching is case-sensitive.
        store.insert(user("Ada@example.com")).await.unwrap();
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[actix_rt::test]
    async fn test_update_preferences_replaces_list() {
        let store = InMemoryUserStore::new();
        store.insert(user("ada@example.com")).await.unwrap();

        assert!(store
            .update_preferences("ada@example.com", vec!["rust".into(), "golang".into()])
            .await
            .unwrap());
        assert!(store
            .update_preferences("ada@example.com", vec!["zig".into()])
            .await
            .unwrap());

        let stored = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(stored.preferences, vec!["zig".to_string()]);

        assert!(!store
            .update_preferences("nobody@example.com", vec![])
            .await
            .unwrap());
    }

    #[actix_rt::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryTaskStore::new();
        let first = store.insert(new_task("one")).await.unwrap();
        let second = store.insert(new_task("two")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert!(store.delete_by_id(first.id).await.unwrap());
        let third = store.insert(new_task("three")).await.unwrap();
        assert_eq!(third.id, 3);

        let ids: Vec<u64> = store.find_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[actix_rt::test]
    async fn test_seeded_store_continues_after_highest_id() {
        let store = InMemoryTaskStore::with_tasks(vec![
            Task::from_new(4, new_task("seeded")),
            Task::from_new(2, new_task("seeded too")),
        ]);
        let created = store.insert(new_task("fresh")).await.unwrap();
        assert_eq!(created.id, 5);
    }

    #[actix_rt::test]
    async fn test_update_and_delete_unknown_id() {
        let store = InMemoryTaskStore::new();
        assert_eq!(
            store.update_by_id(9, TaskPatch::default()).await.unwrap(),
            None
        );
        assert!(!store.delete_by_id(9).await.unwrap());
        assert_eq!(store.find_by_id(9).await.unwrap(), None);
    }
}
