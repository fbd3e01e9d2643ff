use std::path::Path;
use std::sync::Mutex;

use template_share::{RepositoryError, Template, TemplateKind, TemplateRepository};

use crate::schema;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),
}

/// The local File-template collection, backed by SQLite.
///
/// `name` is the primary key, so the one-entry-per-name invariant holds in
/// the schema itself; `upsert` is a plain `INSERT OR REPLACE`.
pub struct TemplateStore {
    conn: Mutex<rusqlite::Connection>,
}

impl TemplateStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn =
            rusqlite::Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: rusqlite::Connection) -> Result<Self, StoreError> {
        schema::migrations()
            .to_latest(&mut conn)
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Fetch one template by name.
    pub fn get(&self, name: &str) -> Result<Option<Template>, StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT name, extension, file_name, description, body, reformat, live_template_enabled
             FROM file_templates WHERE name = ?1",
            [name],
            Self::row_to_template,
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(StoreError::Database(other.to_string())),
        })
    }

    fn list_all(&self) -> Result<Vec<Template>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT name, extension, file_name, description, body, reformat, live_template_enabled
                 FROM file_templates ORDER BY name",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_template)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn upsert_row(&self, template: &Template) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT OR REPLACE INTO file_templates
                (name, extension, file_name, description, body, reformat, live_template_enabled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                template.name,
                template.extension,
                template.file_name,
                template.description,
                template.body,
                template.reformat,
                template.live_template_enabled,
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn remove_row(&self, name: &str) -> Result<usize, StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM file_templates WHERE name = ?1", [name])
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn row_to_template(row: &rusqlite::Row) -> rusqlite::Result<Template> {
        Ok(Template {
            name: row.get(0)?,
            kind: TemplateKind::File,
            extension: row.get(1)?,
            file_name: row.get(2)?,
            description: row.get(3)?,
            body: row.get(4)?,
            reformat: row.get(5)?,
            live_template_enabled: row.get(6)?,
        })
    }
}

#[async_trait::async_trait]
impl TemplateRepository for TemplateStore {
    async fn list(&self) -> Result<Vec<Template>, RepositoryError> {
        self.list_all()
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    async fn upsert(&self, template: &Template) -> Result<(), RepositoryError> {
        self.upsert_row(template)
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    async fn remove(&self, name: &str) -> Result<(), RepositoryError> {
        let removed = self
            .remove_row(name)
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if removed == 0 {
            return Err(RepositoryError::NotFound(name.to_owned()));
        }
        Ok(())
    }
}
