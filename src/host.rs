//! Host binding contract.
//!
//! A binding is the platform glue that talks to the real browser. The
//! registries consume two of them, one for windows and one for tabs. Lifecycle
//! notifications reach the registry through a listener registered with
//! `add_listener`; the binding must deliver a creation notification (or list
//! the id in an enumeration) before any other notification for the same id.

use crate::channel::SubscriptionId;
use crate::error::BindingError;
use crate::tab::{TabCreateParams, TabRecord};
use crate::types::{TabId, WindowId};
use crate::window::{WindowChange, WindowCreateParams, WindowEntry};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub mod memory;
pub mod unbound;

pub use unbound::{UnboundTabBinding, UnboundWindowBinding};

/// Handle for removing a listener from a binding
pub type ListenerId = SubscriptionId;

/// Window lifecycle notification from the host
#[derive(Debug, Clone)]
pub enum WindowEvent {
    Created(WindowEntry),
    Updated {
        entry: WindowEntry,
        change: WindowChange,
    },
    Removed(WindowId),
}

impl WindowEvent {
    pub fn window_id(&self) -> WindowId {
        match self {
            WindowEvent::Created(entry) => entry.window_id(),
            WindowEvent::Updated { entry, .. } => entry.window_id(),
            WindowEvent::Removed(id) => *id,
        }
    }
}

/// Tab lifecycle notification from the host
#[derive(Debug, Clone)]
pub enum TabEvent {
    Created(TabRecord),
    Updated(TabRecord),
    Removed(TabId),
    Activated(TabId),
}

impl TabEvent {
    pub fn tab_id(&self) -> TabId {
        match self {
            TabEvent::Created(tab) | TabEvent::Updated(tab) => tab.tab_id,
            TabEvent::Removed(id) | TabEvent::Activated(id) => *id,
        }
    }
}

pub type WindowListener = Arc<dyn Fn(&WindowEvent) + Send + Sync>;
pub type TabListener = Arc<dyn Fn(&TabEvent) + Send + Sync>;

/// Platform glue for browser windows
#[async_trait]
pub trait WindowBinding: Send + Sync {
    fn add_listener(&self, listener: WindowListener) -> Result<ListenerId, BindingError>;

    fn remove_listener(&self, id: ListenerId) -> Result<(), BindingError>;

    /// Open a window. The registry learns about it from the `Created` event.
    async fn create(&self, params: WindowCreateParams) -> Result<WindowEntry, BindingError>;

    /// Every window the host currently knows about
    async fn get_all(&self) -> Result<Vec<WindowEntry>, BindingError>;

    async fn get_last_focused(&self) -> Result<Option<WindowId>, BindingError>;
}

/// Platform glue for browser tabs
#[async_trait]
pub trait TabBinding: Send + Sync {
    fn add_listener(&self, listener: TabListener) -> Result<ListenerId, BindingError>;

    fn remove_listener(&self, id: ListenerId) -> Result<(), BindingError>;

    async fn create(&self, params: TabCreateParams) -> Result<TabRecord, BindingError>;

    async fn remove(&self, tab_id: TabId) -> Result<(), BindingError>;

    /// Activate the tab and focus its window
    async fn activate(&self, tab_id: TabId) -> Result<(), BindingError>;

    /// Reload the tab, optionally navigating it to `url`
    async fn reload(&self, tab_id: TabId, url: Option<String>) -> Result<(), BindingError>;

    /// Deliver `message` to the tab's content scripts and wait for an answer
    async fn send_message(
        &self,
        tab_id: TabId,
        message: Value,
    ) -> Result<Option<Value>, BindingError>;

    async fn get_all(&self) -> Result<Vec<TabRecord>, BindingError>;

    async fn get_active(&self) -> Result<Option<TabId>, BindingError>;
}
