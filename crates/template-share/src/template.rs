use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the editor's template collections a template belongs to.
///
/// The variants double as the server's `type` tag (`file`, `snippet`,
/// `live`), which is why they serialize in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    File,
    Snippet,
    Live,
}

impl TemplateKind {
    /// Parse a kind tag as the server and CLI spell it.
    /// Returns `None` for tags this client does not know.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "file" => Some(Self::File),
            "snippet" => Some(Self::Snippet),
            "live" => Some(Self::Live),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Snippet => write!(f, "snippet"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// A single editor template.
///
/// `name` is the identity: within one collection (all File templates, or
/// all Live templates) there is never more than one template per name, and
/// writes that reuse a name replace the previous entry wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub kind: TemplateKind,
    /// File suffix for File-kind templates; empty for other kinds.
    pub extension: String,
    /// Override of the generated file's base name; empty means derive from `name`.
    pub file_name: String,
    pub description: String,
    /// Full template text including any placeholder markup.
    pub body: String,
    /// Run the editor's formatter after instantiation.
    pub reformat: bool,
    /// Whether the template also registers as a live template.
    pub live_template_enabled: bool,
}

impl Template {
    /// A File-kind template with the default flags (`reformat` on,
    /// live-template registration off).
    pub fn file(
        name: impl Into<String>,
        extension: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: TemplateKind::File,
            extension: extension.into(),
            file_name: String::new(),
            description: String::new(),
            body: body.into(),
            reformat: true,
            live_template_enabled: false,
        }
    }
}

/// One entry of the server's template listing.
/// `GET /api/templates/list` returns a JSON array of these.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTemplate {
    /// Opaque handle understood by the server; used for download and delete.
    pub file_name: String,
    /// Human label shown in listings.
    pub display_name: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    /// Upload timestamp in epoch seconds; servers may omit it.
    #[serde(default)]
    pub create_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_server_tags() {
        assert_eq!(TemplateKind::parse("file"), Some(TemplateKind::File));
        assert_eq!(TemplateKind::parse("LIVE"), Some(TemplateKind::Live));
        assert_eq!(TemplateKind::parse("snippet"), Some(TemplateKind::Snippet));
        assert_eq!(TemplateKind::parse("bundle"), None);
    }

    #[test]
    fn kind_display_round_trips_through_parse() {
        for kind in [TemplateKind::File, TemplateKind::Snippet, TemplateKind::Live] {
            assert_eq!(TemplateKind::parse(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn file_constructor_applies_defaults() {
        let template = Template::file("Foo", "java", "class Foo {}");
        assert_eq!(template.kind, TemplateKind::File);
        assert!(template.reformat);
        assert!(!template.live_template_enabled);
        assert!(template.file_name.is_empty());
    }

    #[test]
    fn remote_template_deserializes_camel_case() {
        let json = r#"{"fileName":"a1b2.tar.gz","displayName":"Service skeleton","type":"file","createTime":1700000000}"#;
        let remote: RemoteTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(remote.file_name, "a1b2.tar.gz");
        assert_eq!(remote.display_name, "Service skeleton");
        assert_eq!(remote.kind, TemplateKind::File);
        assert_eq!(remote.create_time, 1700000000);
    }

    #[test]
    fn remote_template_create_time_defaults_to_zero() {
        let json = r#"{"fileName":"x.tar.gz","displayName":"X","type":"live"}"#;
        let remote: RemoteTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(remote.create_time, 0);
    }
}
