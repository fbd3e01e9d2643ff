use std::collections::HashMap;
use std::io::Read;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::feedback::Feedback;
use crate::template::{Template, TemplateKind};

/// Entry prefix shared by every record in a File-kind bundle.
const ENTRY_PREFIX: &str = "templates/";

const KEY_NAME: &str = "NAME";
const KEY_EXTENSION: &str = "EXTENSION";
const KEY_FILENAME: &str = "FILENAME";
const KEY_DESCRIPTION: &str = "DESCRIPTION";
const KEY_REFORMAT: &str = "REFORMAT";
const KEY_LIVE_TEMPLATE_ENABLED: &str = "LIVE_TEMPLATE_ENABLED";

/// Errors that make a whole bundle unusable.
///
/// Problems scoped to a single template inside an otherwise readable
/// bundle are reported as `Feedback` on the decode result instead.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("invalid template bundle: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of decoding a File-kind bundle. Entries that could not be
/// reconstructed are absent from `templates` and explained in `feedback`.
#[derive(Debug)]
pub struct DecodedBundle {
    pub templates: Vec<Template>,
    pub feedback: Vec<Feedback>,
}

/// Encode File-kind templates into a portable bundle.
///
/// Each template becomes two records: `templates/<name>.properties` holding
/// every non-body field as `KEY=value` lines, and `templates/<name>.content`
/// holding the body verbatim. An empty body still gets its content record,
/// so empty templates round-trip. Entry order follows the input.
pub fn encode_bundle(templates: &[Template]) -> Result<Vec<u8>, BundleError> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut archive = tar::Builder::new(encoder);

    for template in templates {
        append_entry(
            &mut archive,
            &format!("{ENTRY_PREFIX}{}.properties", template.name),
            write_descriptor(template).as_bytes(),
        )?;
        append_entry(
            &mut archive,
            &format!("{ENTRY_PREFIX}{}.content", template.name),
            template.body.as_bytes(),
        )?;
    }

    let encoder = archive
        .into_inner()
        .map_err(|e| BundleError::Format(format!("failed to finish bundle: {e}")))?;
    encoder
        .finish()
        .map_err(|e| BundleError::Format(format!("failed to compress bundle: {e}")))
}

/// Decode a File-kind bundle back into templates.
///
/// Runs in two passes: every entry is extracted first, then descriptors
/// are paired with their content records, because the stream may carry
/// them in any order. A descriptor missing NAME or EXTENSION, or with no
/// matching content record, skips that template with a warning; the rest
/// of the bundle still decodes. An empty bundle decodes to an empty set.
pub fn decode_bundle(bytes: &[u8]) -> Result<DecodedBundle, BundleError> {
    let entries = extract_entries(bytes)?;

    let mut templates = Vec::new();
    let mut feedback = Vec::new();

    for (path, text) in &entries {
        let Some(stem) = path
            .strip_prefix(ENTRY_PREFIX)
            .and_then(|p| p.strip_suffix(".properties"))
        else {
            continue;
        };

        let fields = parse_descriptor(text);

        let Some(name) = fields.get(KEY_NAME).filter(|v| !v.is_empty()) else {
            feedback.push(Feedback::warning(format!(
                "skipping {path}: descriptor has no NAME"
            )));
            continue;
        };
        let Some(extension) = fields.get(KEY_EXTENSION).filter(|v| !v.is_empty()) else {
            feedback.push(Feedback::warning(format!(
                "skipping {name}: descriptor has no EXTENSION"
            )));
            continue;
        };

        let content_path = format!("{ENTRY_PREFIX}{stem}.content");
        let Some((_, body)) = entries.iter().find(|(p, _)| *p == content_path) else {
            feedback.push(Feedback::warning(format!(
                "skipping {name}: no content entry for {content_path}"
            )));
            continue;
        };

        templates.push(Template {
            name: (*name).to_owned(),
            kind: TemplateKind::File,
            extension: (*extension).to_owned(),
            file_name: fields.get(KEY_FILENAME).copied().unwrap_or("").to_owned(),
            description: fields
                .get(KEY_DESCRIPTION)
                .copied()
                .unwrap_or("")
                .to_owned(),
            body: body.clone(),
            reformat: fields
                .get(KEY_REFORMAT)
                .map(|v| v.trim() == "true")
                .unwrap_or(true),
            live_template_enabled: fields
                .get(KEY_LIVE_TEMPLATE_ENABLED)
                .map(|v| v.trim() == "true")
                .unwrap_or(false),
        });
    }

    Ok(DecodedBundle {
        templates,
        feedback,
    })
}

pub(crate) fn append_entry<W: std::io::Write>(
    archive: &mut tar::Builder<W>,
    path: &str,
    data: &[u8],
) -> Result<(), BundleError> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_entry_type(tar::EntryType::Regular);
    archive.append_data(&mut header, path, data)?;
    Ok(())
}

/// Extract every regular entry into memory, in stream order.
/// Non-UTF-8 entries are skipped; template records are always text.
pub(crate) fn extract_entries(bytes: &[u8]) -> Result<Vec<(String, String)>, BundleError> {
    let decoder = GzDecoder::new(bytes);
    let mut archive = tar::Archive::new(decoder);

    let entries = archive
        .entries()
        .map_err(|e| BundleError::Format(format!("failed to read bundle entries: {e}")))?;

    let mut out = Vec::new();

    for entry_result in entries {
        let mut entry = entry_result
            .map_err(|e| BundleError::Format(format!("failed to read bundle entry: {e}")))?;

        if entry.header().entry_type() != tar::EntryType::Regular {
            continue;
        }

        let path = entry
            .path()
            .map_err(|e| BundleError::Format(format!("invalid path in bundle: {e}")))?
            .to_string_lossy()
            .to_string();

        let mut content = String::new();
        if entry.read_to_string(&mut content).is_err() {
            continue;
        }

        out.push((path, content));
    }

    Ok(out)
}

fn write_descriptor(template: &Template) -> String {
    format!(
        "{KEY_NAME}={}\n{KEY_EXTENSION}={}\n{KEY_FILENAME}={}\n{KEY_DESCRIPTION}={}\n{KEY_REFORMAT}={}\n{KEY_LIVE_TEMPLATE_ENABLED}={}\n",
        template.name,
        template.extension,
        template.file_name,
        template.description,
        template.reformat,
        template.live_template_enabled,
    )
}

fn parse_descriptor(text: &str) -> HashMap<&str, &str> {
    text.lines()
        .filter_map(|line| line.split_once('='))
        .collect()
}
