use std::path::Path;

use anyhow::{Context, Result, bail};
use template_share::{TemplateKind, encode_live_bundle, export_templates};
use template_share_store::{LiveTemplateDir, TemplateStore};

use crate::commands::{print_feedback, remote};
use crate::config::CliConfig;

/// Export templates to a bundle on disk, optionally continuing into an
/// upload. A failed share leaves the exported file where it is.
pub async fn run(
    store: &TemplateStore,
    live: &LiveTemplateDir,
    config: &mut CliConfig,
    kind: TemplateKind,
    output: &Path,
    names: &[String],
    share: Option<String>,
) -> Result<()> {
    let bytes = match kind {
        TemplateKind::File => {
            let filter = (!names.is_empty()).then_some(names);
            export_templates(store, filter).await?
        }
        TemplateKind::Live => {
            let scan = live.scan()?;
            print_feedback(&scan.feedback);

            let groups = if names.is_empty() {
                scan.groups
            } else {
                for name in names {
                    if !scan
                        .groups
                        .iter()
                        .any(|g| &g.group == name || &g.file_name == name)
                    {
                        bail!("no live template group named {name}");
                    }
                }
                scan.groups
                    .into_iter()
                    .filter(|g| names.contains(&g.group) || names.contains(&g.file_name))
                    .collect()
            };

            if groups.is_empty() {
                bail!("no live template definitions to export");
            }
            encode_live_bundle(&groups)?
        }
        TemplateKind::Snippet => {
            bail!("snippet templates are grouped with live templates; export with --kind live")
        }
    };

    std::fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Exported to {}", output.display());

    if let Some(display_name) = share {
        let client = remote::client(config)?;
        client.upload(kind, &display_name, output).await?;
        println!("Shared as \"{display_name}\"");
    }

    Ok(())
}
