//! Window domain: records, native handles, and the registry.

pub mod record;
pub mod registry;

pub use record::{
    NativeHandle, WindowChange, WindowCreateParams, WindowEntry, WindowRecord, WindowType,
    WindowUpdate,
};
pub use registry::WindowRegistry;
