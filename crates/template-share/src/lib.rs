pub mod bundle;
pub mod feedback;
pub mod live;
pub mod repository;
pub mod sync;
pub mod template;

pub use bundle::{BundleError, DecodedBundle, decode_bundle, encode_bundle};
pub use feedback::Feedback;
pub use live::{
    LiveBundle, LiveGroup, LiveTemplateRef, decode_live_bundle, encode_live_bundle,
    parse_live_group,
};
pub use repository::{RepositoryError, TemplateRepository};
pub use sync::{ExportError, ImportError, ImportReport, export_templates, import_templates};
pub use template::{RemoteTemplate, Template, TemplateKind};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
