//! `brandhub-projects`
//!
//! **Responsibility:** projects and the tasks that hang off them.

pub mod project;
pub mod seed;
pub mod task;

pub use project::{Project, ProjectStatus};
pub use task::{Task, TaskStatus};
