//! Tabsync: Browser Window and Tab Registry
//!
//! Keeps an in-memory mirror of the host browser's windows and tabs, attaches
//! extension-owned frame records and metadata to each tab, and republishes the
//! host's lifecycle notifications on per-event channels.

pub mod browser;
pub mod channel;
pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod logging;
mod reconcile;
pub mod tab;
pub mod types;
pub mod window;

pub use browser::{Browser, SyncSummary};
pub use error::{ApiError, BindingError};
pub use tab::TabRegistry;
pub use types::{FrameId, TabId, WindowId};
pub use window::WindowRegistry;
