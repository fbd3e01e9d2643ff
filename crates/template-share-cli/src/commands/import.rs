use std::path::Path;

use anyhow::{Context, Result, bail};
use template_share::{TemplateKind, decode_live_bundle, import_templates};
use template_share_store::{LiveTemplateDir, TemplateStore};

use crate::commands::print_feedback;

/// Import a bundle from disk. Entries the codec skipped are reported and
/// the rest still land; live imports back up the current definitions
/// before anything is replaced.
pub async fn run(
    store: &TemplateStore,
    live: &LiveTemplateDir,
    kind: TemplateKind,
    archive: &Path,
) -> Result<()> {
    let bytes = std::fs::read(archive)
        .with_context(|| format!("failed to read {}", archive.display()))?;

    match kind {
        TemplateKind::File => {
            let report = import_templates(store, &bytes).await?;
            print_feedback(&report.feedback);

            if report.imported.is_empty() {
                println!("No templates imported.");
            } else {
                println!(
                    "Imported {} templates: {}",
                    report.imported.len(),
                    report.imported.join(", ")
                );
            }
        }
        TemplateKind::Live => {
            let bundle = decode_live_bundle(&bytes)?;
            print_feedback(&bundle.feedback);

            if bundle.groups.is_empty() {
                println!("No template definitions to apply.");
                return Ok(());
            }

            let outcome = live.import(&bundle)?;
            if let Some(backup) = &outcome.backup_dir {
                println!("Backed up previous definitions to {}", backup.display());
            }
            for group in &bundle.groups {
                println!(
                    "Applied group {} ({} templates)",
                    group.group,
                    group.templates.len()
                );
            }
        }
        TemplateKind::Snippet => {
            bail!("snippet templates are grouped with live templates; import with --kind live")
        }
    }

    Ok(())
}
