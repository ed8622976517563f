pub mod article;
pub mod task;
pub mod user;

pub use article::{Article, NewsResponse};
pub use task::{NewTask, SeedError, Task, TaskInput, TaskPatch, TaskSeed};
pub use user::{PreferencesInput, PreferencesResponse, User};
