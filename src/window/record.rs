//! Window records and the opaque native handle paired with each one.

use crate::types::WindowId;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Kind of browser window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    #[default]
    Normal,
    Popup,
}

/// Logical window record kept by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub window_id: WindowId,
    #[serde(rename = "type", default)]
    pub window_type: WindowType,
}

impl WindowRecord {
    pub fn new(window_id: impl Into<WindowId>, window_type: WindowType) -> Self {
        Self {
            window_id: window_id.into(),
            window_type,
        }
    }
}

/// Host-owned window object carried alongside a [`WindowRecord`].
///
/// The registry never looks inside; bindings downcast it back to whatever
/// they stored.
#[derive(Clone)]
pub struct NativeHandle(Arc<dyn Any + Send + Sync>);

impl NativeHandle {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles point at the same native object
    pub fn ptr_eq(&self, other: &NativeHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeHandle(..)")
    }
}

/// A window record together with its native handle
#[derive(Debug, Clone)]
pub struct WindowEntry {
    pub record: WindowRecord,
    pub native: NativeHandle,
}

impl WindowEntry {
    pub fn new(record: WindowRecord, native: NativeHandle) -> Self {
        Self { record, native }
    }

    pub fn window_id(&self) -> WindowId {
        self.record.window_id
    }
}

/// What changed in a window update notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowChange {
    Focus,
    Type,
    Other(String),
}

/// Payload of the registry's `on_updated` channel
#[derive(Debug, Clone)]
pub struct WindowUpdate {
    pub entry: WindowEntry,
    pub change: WindowChange,
}

/// Parameters for opening a new window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCreateParams {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type", default)]
    pub window_type: WindowType,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}
