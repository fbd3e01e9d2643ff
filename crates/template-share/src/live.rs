use flate2::Compression;
use flate2::write::GzEncoder;

use crate::bundle::{BundleError, append_entry, extract_entries};
use crate::feedback::Feedback;

/// One live-template definition file.
///
/// Live templates are grouped by the editor's own XML format: a
/// `templateSet` root with a `group` attribute and one `<template>` child
/// per definition. The whole file is the unit of transfer; `templates`
/// only carries what selection UIs need to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveGroup {
    pub file_name: String,
    pub group: String,
    pub templates: Vec<LiveTemplateRef>,
    /// The full source file, imported verbatim into the live-template store.
    pub content: String,
}

/// Display handle for one definition inside a group file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveTemplateRef {
    pub name: String,
    pub description: String,
}

#[derive(Debug)]
pub struct LiveBundle {
    pub groups: Vec<LiveGroup>,
    pub feedback: Vec<Feedback>,
}

/// Encode live-template group files into a bundle.
/// Unlike File-kind bundles, each source file is copied whole under its
/// own name; a file keeps all definitions of its group together.
pub fn encode_live_bundle(groups: &[LiveGroup]) -> Result<Vec<u8>, BundleError> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut archive = tar::Builder::new(encoder);

    for group in groups {
        append_entry(&mut archive, &group.file_name, group.content.as_bytes())?;
    }

    let encoder = archive
        .into_inner()
        .map_err(|e| BundleError::Format(format!("failed to finish bundle: {e}")))?;
    encoder
        .finish()
        .map_err(|e| BundleError::Format(format!("failed to compress bundle: {e}")))
}

/// Decode a live-template bundle.
/// Entries that are not parseable `templateSet` documents are skipped with
/// a warning; the remaining group files still decode.
pub fn decode_live_bundle(bytes: &[u8]) -> Result<LiveBundle, BundleError> {
    let entries = extract_entries(bytes)?;

    let mut groups = Vec::new();
    let mut feedback = Vec::new();

    for (path, content) in entries {
        if !path.ends_with(".xml") {
            feedback.push(Feedback::warning(format!(
                "skipping {path}: not a template definition file"
            )));
            continue;
        }

        match parse_live_group(&path, &content) {
            Ok(group) => groups.push(group),
            Err(reason) => {
                feedback.push(Feedback::warning(format!("skipping {path}: {reason}")));
            }
        }
    }

    Ok(LiveBundle { groups, feedback })
}

/// Parse one group file: the root's `group` attribute (defaulting to
/// `user`) and the name/description of each `<template>` child.
pub fn parse_live_group(file_name: &str, content: &str) -> Result<LiveGroup, String> {
    let doc = roxmltree::Document::parse(content).map_err(|e| e.to_string())?;
    let root = doc.root_element();

    if root.tag_name().name() != "templateSet" {
        return Err(format!("unexpected root element <{}>", root.tag_name().name()));
    }

    let group = root.attribute("group").unwrap_or("user").to_owned();

    let templates = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "template")
        .map(|node| LiveTemplateRef {
            name: node.attribute("name").unwrap_or("").to_owned(),
            description: node.attribute("description").unwrap_or("").to_owned(),
        })
        .collect();

    Ok(LiveGroup {
        file_name: file_name.to_owned(),
        group,
        templates,
        content: content.to_owned(),
    })
}
