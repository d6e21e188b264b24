//! Trait abstraction over the API client so the app can be tested with mocks

use super::error::ApiError;
use super::types::{ProjectFields, TodoFields};
use crate::state::{EntityId, Project, Todo};
use async_trait::async_trait;

/// Operations the TUI performs against the projectarium API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// List every project
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Fetch a single project
    async fn get_project(&self, id: EntityId) -> Result<Project, ApiError>;

    /// List the todos attached to a project
    async fn list_todos(&self, project_id: EntityId) -> Result<Vec<Todo>, ApiError>;

    /// Set a project's status, returning the stored project
    async fn update_status(&self, id: EntityId, status: &str) -> Result<Project, ApiError>;

    /// Set a project's priority, returning the stored project
    async fn update_priority(&self, id: EntityId, priority: u8) -> Result<Project, ApiError>;

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError>;

    async fn update_project(
        &self,
        id: EntityId,
        fields: &ProjectFields,
    ) -> Result<Project, ApiError>;

    async fn create_todo(&self, fields: &TodoFields) -> Result<Todo, ApiError>;

    async fn update_todo(&self, id: EntityId, fields: &TodoFields) -> Result<Todo, ApiError>;

    async fn delete_todo(&self, id: EntityId) -> Result<(), ApiError>;
}
