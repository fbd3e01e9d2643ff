use std::sync::Mutex;

use crate::repository::{RepositoryError, TemplateRepository};
use crate::template::Template;

/// In-memory repository for tests. Keeps insertion order, overwrites by
/// name like the real store.
#[derive(Default)]
pub struct InMemoryRepository {
    templates: Mutex<Vec<Template>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert directly, bypassing the async trait. Test setup only.
    pub fn seed(&self, template: Template) {
        self.templates.lock().unwrap().push(template);
    }
}

#[async_trait::async_trait]
impl TemplateRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<Template>, RepositoryError> {
        Ok(self.templates.lock().unwrap().clone())
    }

    async fn upsert(&self, template: &Template) -> Result<(), RepositoryError> {
        let mut templates = self.templates.lock().unwrap();
        if let Some(existing) = templates.iter_mut().find(|t| t.name == template.name) {
            *existing = template.clone();
        } else {
            templates.push(template.clone());
        }
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), RepositoryError> {
        let mut templates = self.templates.lock().unwrap();
        let before = templates.len();
        templates.retain(|t| t.name != name);
        if templates.len() == before {
            return Err(RepositoryError::NotFound(name.to_owned()));
        }
        Ok(())
    }
}
