//! Placeholder bindings used when the integrator supplied none.
//!
//! Every call fails with [`BindingError::NotImplemented`] so missing platform
//! glue shows up at first use instead of as a silently empty registry.

use super::{ListenerId, TabBinding, TabListener, WindowBinding, WindowListener};
use crate::error::BindingError;
use crate::tab::{TabCreateParams, TabRecord};
use crate::types::{TabId, WindowId};
use crate::window::{WindowCreateParams, WindowEntry};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundWindowBinding;

#[async_trait]
impl WindowBinding for UnboundWindowBinding {
    fn add_listener(&self, _listener: WindowListener) -> Result<ListenerId, BindingError> {
        Err(BindingError::NotImplemented("windows.addListener"))
    }

    fn remove_listener(&self, _id: ListenerId) -> Result<(), BindingError> {
        Err(BindingError::NotImplemented("windows.removeListener"))
    }

    async fn create(&self, _params: WindowCreateParams) -> Result<WindowEntry, BindingError> {
        Err(BindingError::NotImplemented("windows.create"))
    }

    async fn get_all(&self) -> Result<Vec<WindowEntry>, BindingError> {
        Err(BindingError::NotImplemented("windows.getAll"))
    }

    async fn get_last_focused(&self) -> Result<Option<WindowId>, BindingError> {
        Err(BindingError::NotImplemented("windows.getLastFocused"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundTabBinding;

#[async_trait]
impl TabBinding for UnboundTabBinding {
    fn add_listener(&self, _listener: TabListener) -> Result<ListenerId, BindingError> {
        Err(BindingError::NotImplemented("tabs.addListener"))
    }

    fn remove_listener(&self, _id: ListenerId) -> Result<(), BindingError> {
        Err(BindingError::NotImplemented("tabs.removeListener"))
    }

    async fn create(&self, _params: TabCreateParams) -> Result<TabRecord, BindingError> {
        Err(BindingError::NotImplemented("tabs.create"))
    }

    async fn remove(&self, _tab_id: TabId) -> Result<(), BindingError> {
        Err(BindingError::NotImplemented("tabs.remove"))
    }

    async fn activate(&self, _tab_id: TabId) -> Result<(), BindingError> {
        Err(BindingError::NotImplemented("tabs.activate"))
    }

    async fn reload(&self, _tab_id: TabId, _url: Option<String>) -> Result<(), BindingError> {
        Err(BindingError::NotImplemented("tabs.reload"))
    }

    async fn send_message(
        &self,
        _tab_id: TabId,
        _message: Value,
    ) -> Result<Option<Value>, BindingError> {
        Err(BindingError::NotImplemented("tabs.sendMessage"))
    }

    async fn get_all(&self) -> Result<Vec<TabRecord>, BindingError> {
        Err(BindingError::NotImplemented("tabs.getAll"))
    }

    async fn get_active(&self) -> Result<Option<TabId>, BindingError> {
        Err(BindingError::NotImplemented("tabs.getActive"))
    }
}
