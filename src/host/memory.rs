//! In-process host bindings.
//!
//! `MemoryWindows` and `MemoryTabs` keep the "browser side" state in memory and
//! deliver lifecycle events to their listeners synchronously, before the call
//! that caused them returns. Besides the binding traits they expose host-side
//! helpers (`seed`, `open`, `navigate`, `close`, `focus`, `emit`) so tests and
//! embedders can play the part of the browser.

use super::{
    ListenerId, TabBinding, TabEvent, TabListener, WindowBinding, WindowEvent, WindowListener,
};
use crate::channel::Channel;
use crate::error::BindingError;
use crate::tab::{TabCreateParams, TabRecord, TabStatus};
use crate::types::{TabId, WindowId};
use crate::window::{
    NativeHandle, WindowChange, WindowCreateParams, WindowEntry, WindowRecord, WindowType,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

/// Native object handed out by [`MemoryWindows`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNativeWindow {
    pub window_id: WindowId,
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Default)]
struct WindowState {
    windows: Vec<WindowEntry>,
    focused: Option<WindowId>,
    next_id: i64,
}

impl WindowState {
    fn position(&self, window_id: WindowId) -> Option<usize> {
        self.windows.iter().position(|e| e.window_id() == window_id)
    }

    fn note_id(&mut self, window_id: WindowId) {
        self.next_id = self.next_id.max(window_id.0 + 1);
    }
}

pub struct MemoryWindows {
    state: Mutex<WindowState>,
    listeners: Channel<WindowEvent>,
}

impl MemoryWindows {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WindowState {
                next_id: 1,
                ..WindowState::default()
            }),
            listeners: Channel::new("memory.windows"),
        }
    }

    /// Build the entry the host would report for a window of `window_type`.
    pub fn entry(window_id: impl Into<WindowId>, window_type: WindowType) -> WindowEntry {
        let window_id = window_id.into();
        WindowEntry::new(
            WindowRecord::new(window_id, window_type),
            NativeHandle::new(MemoryNativeWindow {
                window_id,
                url: None,
                width: None,
                height: None,
            }),
        )
    }

    /// Add a window that existed before any listener was attached; no event.
    pub fn seed(&self, entry: WindowEntry) {
        let mut state = self.state.lock();
        state.note_id(entry.window_id());
        state.windows.push(entry);
    }

    /// Add a window and announce it.
    pub fn open(&self, entry: WindowEntry) {
        self.seed(entry.clone());
        self.emit(WindowEvent::Created(entry));
    }

    /// Replace a window's host state and announce the change.
    pub fn update(&self, entry: WindowEntry, change: WindowChange) -> bool {
        {
            let mut state = self.state.lock();
            match state.position(entry.window_id()) {
                Some(index) => state.windows[index] = entry.clone(),
                None => return false,
            }
        }
        self.emit(WindowEvent::Updated { entry, change });
        true
    }

    pub fn focus(&self, window_id: WindowId) -> bool {
        let entry = {
            let mut state = self.state.lock();
            let Some(index) = state.position(window_id) else {
                return false;
            };
            state.focused = Some(window_id);
            state.windows[index].clone()
        };
        self.emit(WindowEvent::Updated {
            entry,
            change: WindowChange::Focus,
        });
        true
    }

    pub fn close(&self, window_id: WindowId) -> bool {
        {
            let mut state = self.state.lock();
            let Some(index) = state.position(window_id) else {
                return false;
            };
            state.windows.remove(index);
            if state.focused == Some(window_id) {
                state.focused = None;
            }
        }
        self.emit(WindowEvent::Removed(window_id));
        true
    }

    /// Deliver `event` to listeners without touching host state.
    pub fn emit(&self, event: WindowEvent) {
        self.listeners.notify(&event);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.subscriber_count()
    }
}

impl Default for MemoryWindows {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WindowBinding for MemoryWindows {
    fn add_listener(&self, listener: WindowListener) -> Result<ListenerId, BindingError> {
        Ok(self.listeners.subscribe_handler(listener))
    }

    fn remove_listener(&self, id: ListenerId) -> Result<(), BindingError> {
        if self.listeners.unsubscribe(id) {
            Ok(())
        } else {
            Err(BindingError::Host(format!("Unknown listener: {:?}", id)))
        }
    }

    async fn create(&self, params: WindowCreateParams) -> Result<WindowEntry, BindingError> {
        let entry = {
            let mut state = self.state.lock();
            let window_id = WindowId(state.next_id);
            state.note_id(window_id);
            let entry = WindowEntry::new(
                WindowRecord::new(window_id, params.window_type),
                NativeHandle::new(MemoryNativeWindow {
                    window_id,
                    url: params.url.clone(),
                    width: params.width,
                    height: params.height,
                }),
            );
            state.windows.push(entry.clone());
            if params.focused {
                state.focused = Some(window_id);
            }
            entry
        };
        self.emit(WindowEvent::Created(entry.clone()));
        Ok(entry)
    }

    async fn get_all(&self) -> Result<Vec<WindowEntry>, BindingError> {
        Ok(self.state.lock().windows.clone())
    }

    async fn get_last_focused(&self) -> Result<Option<WindowId>, BindingError> {
        Ok(self.state.lock().focused)
    }
}

#[derive(Default)]
struct TabState {
    tabs: Vec<TabRecord>,
    active: Option<TabId>,
    next_id: i64,
    sent: Vec<(TabId, Value)>,
    replies: HashMap<TabId, Value>,
}

impl TabState {
    fn position(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.tab_id == tab_id)
    }

    fn note_id(&mut self, tab_id: TabId) {
        self.next_id = self.next_id.max(tab_id.0 + 1);
    }

    fn require(&self, tab_id: TabId) -> Result<usize, BindingError> {
        self.position(tab_id)
            .ok_or_else(|| BindingError::Host(format!("No tab with id: {}", tab_id)))
    }
}

pub struct MemoryTabs {
    state: Mutex<TabState>,
    listeners: Channel<TabEvent>,
}

impl MemoryTabs {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TabState {
                next_id: 1,
                ..TabState::default()
            }),
            listeners: Channel::new("memory.tabs"),
        }
    }

    /// Add a tab that existed before any listener was attached; no event.
    pub fn seed(&self, tab: TabRecord) {
        let mut state = self.state.lock();
        state.note_id(tab.tab_id);
        state.tabs.push(tab);
    }

    /// Add a tab and announce it.
    pub fn open(&self, tab: TabRecord) {
        self.seed(tab.clone());
        self.emit(TabEvent::Created(tab));
    }

    /// Point a tab at `url` and announce the update.
    pub fn navigate(&self, tab_id: TabId, url: &str, status: TabStatus) -> bool {
        let tab = {
            let mut state = self.state.lock();
            let Some(index) = state.position(tab_id) else {
                return false;
            };
            let tab = &mut state.tabs[index];
            tab.url = url.to_string();
            tab.status = status;
            tab.clone()
        };
        self.emit(TabEvent::Updated(tab));
        true
    }

    pub fn close(&self, tab_id: TabId) -> bool {
        {
            let mut state = self.state.lock();
            let Some(index) = state.position(tab_id) else {
                return false;
            };
            state.tabs.remove(index);
            if state.active == Some(tab_id) {
                state.active = None;
            }
        }
        self.emit(TabEvent::Removed(tab_id));
        true
    }

    pub fn focus(&self, tab_id: TabId) -> bool {
        {
            let mut state = self.state.lock();
            if state.position(tab_id).is_none() {
                return false;
            }
            state.active = Some(tab_id);
        }
        self.emit(TabEvent::Activated(tab_id));
        true
    }

    /// Deliver `event` to listeners without touching host state.
    pub fn emit(&self, event: TabEvent) {
        self.listeners.notify(&event);
    }

    /// Answer future `send_message` calls to `tab_id` with `reply`.
    pub fn set_reply(&self, tab_id: TabId, reply: Value) {
        self.state.lock().replies.insert(tab_id, reply);
    }

    pub fn sent_messages(&self) -> Vec<(TabId, Value)> {
        self.state.lock().sent.clone()
    }

    pub fn host_tabs(&self) -> Vec<TabRecord> {
        self.state.lock().tabs.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.subscriber_count()
    }
}

impl Default for MemoryTabs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabBinding for MemoryTabs {
    fn add_listener(&self, listener: TabListener) -> Result<ListenerId, BindingError> {
        Ok(self.listeners.subscribe_handler(listener))
    }

    fn remove_listener(&self, id: ListenerId) -> Result<(), BindingError> {
        if self.listeners.unsubscribe(id) {
            Ok(())
        } else {
            Err(BindingError::Host(format!("Unknown listener: {:?}", id)))
        }
    }

    async fn create(&self, params: TabCreateParams) -> Result<TabRecord, BindingError> {
        let tab = {
            let mut state = self.state.lock();
            let tab_id = TabId(state.next_id);
            state.note_id(tab_id);
            let tab = TabRecord::new(tab_id, params.url).with_status(TabStatus::Loading);
            state.tabs.push(tab.clone());
            if params.active {
                state.active = Some(tab_id);
            }
            tab
        };
        self.emit(TabEvent::Created(tab.clone()));
        if params.active {
            self.emit(TabEvent::Activated(tab.tab_id));
        }
        Ok(tab)
    }

    async fn remove(&self, tab_id: TabId) -> Result<(), BindingError> {
        self.state.lock().require(tab_id)?;
        self.close(tab_id);
        Ok(())
    }

    async fn activate(&self, tab_id: TabId) -> Result<(), BindingError> {
        self.state.lock().require(tab_id)?;
        self.focus(tab_id);
        Ok(())
    }

    async fn reload(&self, tab_id: TabId, url: Option<String>) -> Result<(), BindingError> {
        let tab = {
            let mut state = self.state.lock();
            let index = state.require(tab_id)?;
            let tab = &mut state.tabs[index];
            if let Some(url) = url {
                tab.url = url;
            }
            tab.status = TabStatus::Loading;
            tab.clone()
        };
        self.emit(TabEvent::Updated(tab));
        Ok(())
    }

    async fn send_message(
        &self,
        tab_id: TabId,
        message: Value,
    ) -> Result<Option<Value>, BindingError> {
        let mut state = self.state.lock();
        state.require(tab_id)?;
        state.sent.push((tab_id, message));
        Ok(state.replies.get(&tab_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<TabRecord>, BindingError> {
        Ok(self.state.lock().tabs.clone())
    }

    async fn get_active(&self) -> Result<Option<TabId>, BindingError> {
        Ok(self.state.lock().active)
    }
}
