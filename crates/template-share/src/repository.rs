use std::sync::Arc;

use crate::template::Template;

/// Errors from a template repository.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// The editor's template collection, seen as a mutable keyed store.
///
/// Implementations must keep the backing registry and any persisted copy
/// in step: when `upsert` or `remove` returns, the change is visible to
/// the editor, not just queued in this subsystem.
#[async_trait::async_trait]
pub trait TemplateRepository: Send + Sync {
    /// All templates, in stable listing order.
    async fn list(&self) -> Result<Vec<Template>, RepositoryError>;

    /// Add a template, or replace the existing one with the same name.
    /// Replacement is whole-value; no field-level merging.
    async fn upsert(&self, template: &Template) -> Result<(), RepositoryError>;

    /// Remove the template with this name.
    async fn remove(&self, name: &str) -> Result<(), RepositoryError>;
}

#[async_trait::async_trait]
impl<T: TemplateRepository + ?Sized> TemplateRepository for Arc<T> {
    async fn list(&self) -> Result<Vec<Template>, RepositoryError> {
        (**self).list().await
    }

    async fn upsert(&self, template: &Template) -> Result<(), RepositoryError> {
        (**self).upsert(template).await
    }

    async fn remove(&self, name: &str) -> Result<(), RepositoryError> {
        (**self).remove(name).await
    }
}
