use std::path::{Path, PathBuf};

use anyhow::Result;
use template_share::TemplateKind;
use template_share_remote::ServerClient;
use template_share_store::{LiveTemplateDir, TemplateStore};

use crate::commands::{confirm, import};
use crate::config::{self, CliConfig};

const MAX_NAME_WIDTH: usize = 35;

/// Build a client for the configured server, surfacing the one-shot
/// read-only advisory and persisting its flag before the first request.
pub fn client(config: &mut CliConfig) -> Result<ServerClient> {
    if let Some(advisory) = config.server.take_default_advisory() {
        eprintln!("note: {advisory}");
        config::save(config)?;
    }

    Ok(ServerClient::new(config.server.clone())?)
}

pub async fn list(config: &mut CliConfig, kind: Option<TemplateKind>) -> Result<()> {
    let templates = client(config)?.list(kind).await?;

    if templates.is_empty() {
        println!("No shared templates.");
        return Ok(());
    }

    let name_width = templates
        .iter()
        .map(|t| t.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    for template in &templates {
        println!(
            "{:<name_width$}  {:<7}  {}",
            template.display_name, template.kind, template.file_name
        );
    }

    println!("\n{} shared templates", templates.len());
    Ok(())
}

pub async fn fetch(
    config: &mut CliConfig,
    store: &TemplateStore,
    live: &LiveTemplateDir,
    kind: TemplateKind,
    file_name: &str,
    apply: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let path = client(config)?
        .download(kind, file_name, output.as_deref())
        .await?;
    println!("Downloaded to {}", path.display());

    let apply = apply || confirm("Apply the downloaded templates now?")?;
    if !apply {
        println!("Not applied; the bundle is at {}", path.display());
        return Ok(());
    }

    import::run(store, live, kind, &path).await
}

pub async fn share(
    config: &mut CliConfig,
    kind: TemplateKind,
    archive: &Path,
    display_name: &str,
) -> Result<()> {
    client(config)?.upload(kind, display_name, archive).await?;
    println!("Shared {} as \"{display_name}\"", archive.display());
    Ok(())
}

pub async fn delete(
    config: &mut CliConfig,
    kind: TemplateKind,
    file_name: &str,
    yes: bool,
) -> Result<()> {
    if !yes
        && !confirm(&format!(
            "Delete {file_name} from the server? This cannot be undone."
        ))?
    {
        println!("Cancelled.");
        return Ok(());
    }

    client(config)?.delete(kind, file_name).await?;
    println!("Deleted {file_name}");
    Ok(())
}
