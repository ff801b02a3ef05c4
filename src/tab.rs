//! Tab domain: records, per-tab frame tables and metadata, and the registry.

pub mod frames;
pub mod metadata;
pub mod record;
pub mod registry;

pub use frames::{FrameRecord, FrameTable};
pub use metadata::TabMetadata;
pub use record::{TabCreateParams, TabRecord, TabStatus};
pub use registry::TabRegistry;
