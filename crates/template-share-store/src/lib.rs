pub mod live_dir;
pub mod schema;
pub mod store;

pub use live_dir::{LiveDirError, LiveImportOutcome, LiveScan, LiveTemplateDir};
pub use store::{StoreError, TemplateStore};
