use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;

/// Represents a task entity as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Identifier assigned by the store. Never reused.
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Body of `POST /tasks`.
///
/// Every field is optional at the serde level so that an absent field is a
/// validation failure rather than a deserialization failure. A `completed`
/// value that is not a boolean is rejected by the JSON extractor.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(
        required(message = "title and description are required"),
        length(min = 1, message = "title and description are required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "title and description are required"),
        length(min = 1, message = "title and description are required")
    )]
    pub description: Option<String>,

    #[validate(required(message = "completed must be a boolean"))]
    pub completed: Option<bool>,
}

/// A validated task awaiting an id from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TaskInput {
    /// Validates the input and converts it into a `NewTask`.
    pub fn into_new_task(self) -> Result<NewTask, AppError> {
        self.validate()?;
        match (self.title, self.description, self.completed) {
            (Some(title), Some(description), Some(completed)) => Ok(NewTask {
                title,
                description,
                completed,
            }),
            _ => Err(AppError::ValidationError(
                "title and description are required".into(),
            )),
        }
    }
}

/// Body of `PUT /tasks/{id}`. Only supplied fields are changed.
///
/// The outer `Option` records whether a field was present in the body, the
/// inner one whether it held a value, so `{"title": null}` can be rejected
/// instead of being read as "leave the title alone".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<Option<bool>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

impl Validate for TaskPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match &self.title {
            Some(None) => errors.add("title", field_error("required", "title must not be empty")),
            Some(Some(title)) if title.is_empty() => {
                errors.add("title", field_error("length", "title must not be empty"))
            }
            _ => {}
        }
        match &self.description {
            Some(None) => errors.add(
                "description",
                field_error("required", "description must not be empty"),
            ),
            Some(Some(description)) if description.is_empty() => errors.add(
                "description",
                field_error("length", "description must not be empty"),
            ),
            _ => {}
        }
        if let Some(None) = self.completed {
            errors.add(
                "completed",
                field_error("required", "completed must be a boolean"),
            );
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Task {
    pub fn from_new(id: u64, new_task: NewTask) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            completed: new_task.completed,
        }
    }

    /// Applies the supplied fields of `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title.flatten() {
            self.title = title;
        }
        if let Some(description) = patch.description.flatten() {
            self.description = description;
        }
        if let Some(completed) = patch.completed.flatten() {
            self.completed = completed;
        }
    }
}

/// Errors raised while loading the startup task seed.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read task seed {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse task seed {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("task seed contains id {0} more than once")]
    DuplicateId(u64),
    #[error("seeded task {0} has an empty title or description")]
    EmptyField(u64),
}

/// On-disk format of the optional seed file: `{"tasks": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskSeed {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskSeed {
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    /// Parses and checks a seed document. Ids must be unique and every task
    /// must satisfy the same presence rules as `POST /tasks`.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Self::parse(raw, Path::new("<inline>"))
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, SeedError> {
        let seed: TaskSeed = serde_json::from_str(raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        seed.check()?;
        Ok(seed)
    }

    fn check(&self) -> Result<(), SeedError> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id) {
                return Err(SeedError::DuplicateId(task.id));
            }
            if task.title.is_empty() || task.description.is_empty() {
                return Err(SeedError::EmptyField(task.id));
            }
        }
        Ok(())
    }
}
