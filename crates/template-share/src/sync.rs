use crate::bundle::{BundleError, decode_bundle, encode_bundle};
use crate::feedback::Feedback;
use crate::repository::{RepositoryError, TemplateRepository};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no templates to export")]
    NothingToExport,

    #[error("no template named {0}")]
    UnknownTemplate(String),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome of importing a bundle: which templates landed in the
/// repository, and what was skipped along the way.
#[derive(Debug)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub feedback: Vec<Feedback>,
}

/// Export the repository's templates (optionally a named subset) as a
/// bundle. Selection keeps the repository's listing order. Exporting
/// nothing is an error rather than an empty archive.
pub async fn export_templates(
    repo: &dyn TemplateRepository,
    names: Option<&[String]>,
) -> Result<Vec<u8>, ExportError> {
    let mut templates = repo.list().await?;

    if let Some(names) = names {
        for name in names {
            if !templates.iter().any(|t| &t.name == name) {
                return Err(ExportError::UnknownTemplate(name.clone()));
            }
        }
        templates.retain(|t| names.contains(&t.name));
    }

    if templates.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    Ok(encode_bundle(&templates)?)
}

/// Import a bundle into the repository.
///
/// Entries the codec could not reconstruct are reported in the returned
/// feedback and the batch continues; a repository write failure aborts,
/// since at that point the store itself is in trouble.
pub async fn import_templates(
    repo: &dyn TemplateRepository,
    bytes: &[u8],
) -> Result<ImportReport, ImportError> {
    let decoded = decode_bundle(bytes)?;

    let mut imported = Vec::with_capacity(decoded.templates.len());
    for template in &decoded.templates {
        repo.upsert(template).await?;
        imported.push(template.name.clone());
    }

    Ok(ImportReport {
        imported,
        feedback: decoded.feedback,
    })
}
