//! Tab registry: authoritative in-memory mirror of host tabs, plus the
//! extension-owned frame tables and metadata attached to each tab.
//!
//! Host calls (`create`, `remove`, `activate`, `reload`, `send_message`) never
//! touch the registry directly; it changes only when the binding delivers the
//! resulting event. Events for ids the registry does not track are dropped.

use crate::channel::Channel;
use crate::config::CreationPolicy;
use crate::domain::{domain_name, DomainFn};
use crate::error::BindingError;
use crate::host::{ListenerId, TabBinding, TabEvent};
use crate::reconcile::{RecordTable, Reconciled};
use crate::tab::frames::{FrameRecord, FrameTable};
use crate::tab::metadata::TabMetadata;
use crate::tab::record::{TabCreateParams, TabRecord};
use crate::types::{FrameId, TabId};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct TabRegistry {
    tabs: RwLock<RecordTable<TabId, TabRecord>>,
    binding: Arc<dyn TabBinding>,
    policy: CreationPolicy,
    domain_of: DomainFn,
    listener: Mutex<Option<ListenerId>>,
    on_created: Channel<TabRecord>,
    on_updated: Channel<TabRecord>,
    on_removed: Channel<TabRecord>,
    on_activated: Channel<TabRecord>,
}

impl TabRegistry {
    pub fn new(binding: Arc<dyn TabBinding>) -> Self {
        Self::with_policy(binding, CreationPolicy::default())
    }

    pub fn with_policy(binding: Arc<dyn TabBinding>, policy: CreationPolicy) -> Self {
        Self {
            tabs: RwLock::new(RecordTable::new()),
            binding,
            policy,
            domain_of: domain_name,
            listener: Mutex::new(None),
            on_created: Channel::new("tabs.on_created"),
            on_updated: Channel::new("tabs.on_updated"),
            on_removed: Channel::new("tabs.on_removed"),
            on_activated: Channel::new("tabs.on_activated"),
        }
    }

    /// Replace the URL to domain function used by [`record_frame`](Self::record_frame).
    pub fn with_domain_fn(mut self, domain_of: DomainFn) -> Self {
        self.domain_of = domain_of;
        self
    }

    pub fn policy(&self) -> CreationPolicy {
        self.policy
    }

    /// Register this registry as a listener on its binding (weakly held).
    pub fn attach(self: &Arc<Self>) -> Result<(), BindingError> {
        let weak = Arc::downgrade(self);
        let id = self.binding.add_listener(Arc::new(move |event: &TabEvent| {
            if let Some(registry) = weak.upgrade() {
                registry.handle_event(event.clone());
            }
        }))?;
        if let Some(previous) = self.listener.lock().replace(id) {
            self.binding.remove_listener(previous)?;
        }
        Ok(())
    }

    pub fn detach(&self) -> Result<(), BindingError> {
        match self.listener.lock().take() {
            Some(id) => self.binding.remove_listener(id),
            None => Ok(()),
        }
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        *self.listener.lock()
    }

    /// Fired when a tab is created. The URL may still be empty; watch
    /// `on_updated` for the first navigation.
    pub fn on_created(&self) -> &Channel<TabRecord> {
        &self.on_created
    }

    pub fn on_updated(&self) -> &Channel<TabRecord> {
        &self.on_updated
    }

    /// Fired before the tab is forgotten, so subscribers can still read its
    /// frames and metadata.
    pub fn on_removed(&self) -> &Channel<TabRecord> {
        &self.on_removed
    }

    pub fn on_activated(&self) -> &Channel<TabRecord> {
        &self.on_activated
    }

    pub fn handle_event(&self, event: TabEvent) {
        match event {
            TabEvent::Created(tab) => self.handle_created(tab),
            TabEvent::Updated(tab) => self.handle_updated(tab),
            TabEvent::Removed(tab_id) => self.handle_removed(tab_id),
            TabEvent::Activated(tab_id) => self.handle_activated(tab_id),
        }
    }

    fn handle_created(&self, mut tab: TabRecord) {
        let tab_id = tab.tab_id;
        {
            let mut tabs = self.tabs.write();
            if let Some(existing) = tabs.get_mut(&tab_id) {
                if self.policy == CreationPolicy::PreserveAuxiliary {
                    if tab.frames.is_none() {
                        tab.frames = existing.frames.take();
                    }
                    if tab.metadata.is_none() {
                        tab.metadata = existing.metadata.take();
                    }
                }
                debug!(%tab_id, policy = self.policy.as_str(), "Creation event for tracked tab");
            }
            tabs.insert(tab_id, tab.clone());
        }
        trace!(%tab_id, url = %tab.url, "Tab created");
        self.on_created.notify(&tab);
    }

    fn handle_updated(&self, incoming: TabRecord) {
        let tab_id = incoming.tab_id;
        let merged = {
            let mut tabs = self.tabs.write();
            let Some(existing) = tabs.get_mut(&tab_id) else {
                debug!(%tab_id, "Dropping update for untracked tab");
                return;
            };
            existing.apply_host_update(&incoming);
            existing.clone()
        };
        self.on_updated.notify(&merged);
    }

    fn handle_removed(&self, tab_id: TabId) {
        let tracked = self
            .tabs
            .read()
            .tracked(&tab_id)
            .map(|(generation, tab)| (generation, tab.clone()));
        let Some((generation, tab)) = tracked else {
            debug!(%tab_id, "Dropping removal of untracked tab");
            return;
        };
        self.on_removed.notify(&tab);
        if self
            .tabs
            .write()
            .remove_generation(&tab_id, generation)
            .is_some()
        {
            trace!(%tab_id, "Tab removed");
        } else {
            debug!(%tab_id, "Tab re-created while its removal was announced");
        }
    }

    fn handle_activated(&self, tab_id: TabId) {
        match self.get(tab_id) {
            Some(tab) => {
                self.on_activated.notify(&tab);
            }
            None => debug!(%tab_id, "Dropping activation of untracked tab"),
        }
    }

    fn merge(&self, snapshot: Vec<TabRecord>) -> Reconciled<TabRecord> {
        let result = self.tabs.write().merge_if_absent(snapshot, |t| t.tab_id);
        if result.inserted > 0 {
            debug!(inserted = result.inserted, "Reconciled tabs from enumeration");
        }
        result
    }

    /// Merge an enumeration snapshot, returning the registry's records in
    /// snapshot order.
    pub fn reconcile(&self, snapshot: Vec<TabRecord>) -> Vec<TabRecord> {
        self.merge(snapshot).records
    }

    /// Initial enumeration. Returns how many tabs were newly tracked.
    pub async fn synchronize(&self) -> Result<usize, BindingError> {
        let snapshot = self.binding.get_all().await?;
        Ok(self.merge(snapshot).inserted)
    }

    /// Open a new tab
    pub async fn create(&self, params: TabCreateParams) -> Result<TabRecord, BindingError> {
        self.binding.create(params).await
    }

    /// Close a tab
    pub async fn remove(&self, tab_id: TabId) -> Result<(), BindingError> {
        self.binding.remove(tab_id).await
    }

    /// Activate a tab (also focuses its window)
    pub async fn activate(&self, tab_id: TabId) -> Result<(), BindingError> {
        self.binding.activate(tab_id).await
    }

    pub async fn reload(&self, tab_id: TabId, url: Option<String>) -> Result<(), BindingError> {
        self.binding.reload(tab_id, url).await
    }

    pub async fn send_message(
        &self,
        tab_id: TabId,
        message: Value,
    ) -> Result<Option<Value>, BindingError> {
        self.binding.send_message(tab_id, message).await
    }

    /// Every tab the host reports, backed by the registry's records.
    pub async fn get_all(&self) -> Result<Vec<TabRecord>, BindingError> {
        let snapshot = self.binding.get_all().await?;
        Ok(self.reconcile(snapshot))
    }

    /// The host's active tab, if the registry tracks it.
    pub async fn get_active(&self) -> Result<Option<TabRecord>, BindingError> {
        let active = self.binding.get_active().await?;
        Ok(active.and_then(|tab_id| self.get(tab_id)))
    }

    pub fn get(&self, tab_id: TabId) -> Option<TabRecord> {
        self.tabs.read().get(&tab_id).cloned()
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.tabs.read().contains_key(&tab_id)
    }

    /// Unknown tabs are never reported as incognito.
    pub fn is_incognito(&self, tab_id: TabId) -> bool {
        self.tabs
            .read()
            .get(&tab_id)
            .map(|tab| tab.incognito)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.tabs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.read().is_empty()
    }

    /// Ids of every tracked tab, in ascending order
    pub fn tab_ids(&self) -> Vec<TabId> {
        let mut ids: Vec<TabId> = self.tabs.read().keys().copied().collect();
        ids.sort();
        ids
    }

    /// Record the URL a frame of `tab_id` navigated to.
    pub fn record_frame(&self, tab_id: TabId, frame_id: FrameId, url: &str) {
        let mut tabs = self.tabs.write();
        let Some(tab) = tabs.get_mut(&tab_id) else {
            trace!(%tab_id, %frame_id, "Ignoring frame for untracked tab");
            return;
        };
        tab.frames.get_or_insert_with(FrameTable::new).record(FrameRecord {
            frame_id,
            url: url.to_string(),
            domain_name: (self.domain_of)(url),
        });
    }

    /// Forget every frame of `tab_id`, typically when a new navigation starts.
    pub fn clear_frames(&self, tab_id: TabId) {
        if let Some(tab) = self.tabs.write().get_mut(&tab_id) {
            tab.frames = None;
        }
    }

    pub fn get_frame(&self, tab_id: TabId, frame_id: FrameId) -> Option<FrameRecord> {
        self.tabs
            .read()
            .get(&tab_id)?
            .frames
            .as_ref()?
            .get(frame_id)
            .cloned()
    }

    pub fn main_frame(&self, tab_id: TabId) -> Option<FrameRecord> {
        self.get_frame(tab_id, FrameId::MAIN)
    }

    /// Merge `values` into the tab's metadata, key by key.
    pub fn update_metadata<I, K>(&self, tab_id: TabId, values: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut tabs = self.tabs.write();
        if let Some(tab) = tabs.get_mut(&tab_id) {
            tab.metadata.get_or_insert_with(TabMetadata::new).merge(values);
        }
    }

    pub fn get_metadata(&self, tab_id: TabId, key: &str) -> Option<Value> {
        self.tabs
            .read()
            .get(&tab_id)?
            .metadata
            .as_ref()?
            .get(key)
            .cloned()
    }

    pub fn clear_metadata(&self, tab_id: TabId) {
        if let Some(tab) = self.tabs.write().get_mut(&tab_id) {
            tab.metadata = None;
        }
    }
}

impl std::fmt::Debug for TabRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabRegistry")
            .field("tabs", &self.len())
            .field("policy", &self.policy)
            .field("attached", &self.listener_id().is_some())
            .finish()
    }
}
