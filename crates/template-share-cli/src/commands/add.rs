use std::path::Path;

use anyhow::{Context, Result, bail};
use template_share::{Template, TemplateKind, TemplateRepository};
use template_share_store::TemplateStore;

pub async fn run(
    store: &TemplateStore,
    name: &str,
    source: &Path,
    extension: Option<String>,
    description: String,
    file_name: String,
    no_reformat: bool,
    live_template: bool,
) -> Result<()> {
    let body = std::fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;

    let extension = match extension {
        Some(extension) => extension,
        None => source
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if extension.is_empty() {
        bail!(
            "cannot infer an extension from {}; pass --extension",
            source.display()
        );
    }

    let template = Template {
        name: name.to_owned(),
        kind: TemplateKind::File,
        extension,
        file_name,
        description,
        body,
        reformat: !no_reformat,
        live_template_enabled: live_template,
    };

    store.upsert(&template).await?;
    println!("Saved template {} (.{})", template.name, template.extension);
    Ok(())
}
