//! Window registry: authoritative in-memory mirror of host windows.

use crate::channel::Channel;
use crate::error::BindingError;
use crate::host::{ListenerId, WindowBinding, WindowEvent};
use crate::reconcile::{RecordTable, Reconciled};
use crate::types::WindowId;
use crate::window::record::{WindowChange, WindowCreateParams, WindowEntry, WindowUpdate};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct WindowRegistry {
    windows: RwLock<RecordTable<WindowId, WindowEntry>>,
    binding: Arc<dyn WindowBinding>,
    listener: Mutex<Option<ListenerId>>,
    on_created: Channel<WindowEntry>,
    on_updated: Channel<WindowUpdate>,
    on_removed: Channel<WindowEntry>,
}

impl WindowRegistry {
    /// Create an empty registry over `binding`. Call [`attach`](Self::attach)
    /// to start receiving host events.
    pub fn new(binding: Arc<dyn WindowBinding>) -> Self {
        Self {
            windows: RwLock::new(RecordTable::new()),
            binding,
            listener: Mutex::new(None),
            on_created: Channel::new("windows.on_created"),
            on_updated: Channel::new("windows.on_updated"),
            on_removed: Channel::new("windows.on_removed"),
        }
    }

    /// Register this registry as a listener on its binding.
    ///
    /// The binding only holds a weak reference, so dropping the last `Arc`
    /// stops event handling even without [`detach`](Self::detach).
    pub fn attach(self: &Arc<Self>) -> Result<(), BindingError> {
        let weak = Arc::downgrade(self);
        let id = self.binding.add_listener(Arc::new(move |event: &WindowEvent| {
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

    pub fn on_created(&self) -> &Channel<WindowEntry> {
        &self.on_created
    }

    pub fn on_updated(&self) -> &Channel<WindowUpdate> {
        &self.on_updated
    }

    pub fn on_removed(&self) -> &Channel<WindowEntry> {
        &self.on_removed
    }

    /// Apply one host notification and republish it.
    pub fn handle_event(&self, event: WindowEvent) {
        match event {
            WindowEvent::Created(entry) => self.handle_created(entry),
            WindowEvent::Updated { entry, change } => self.handle_updated(entry, change),
            WindowEvent::Removed(window_id) => self.handle_removed(window_id),
        }
    }

    fn handle_created(&self, entry: WindowEntry) {
        let window_id = entry.window_id();
        let replaced = self
            .windows
            .write()
            .insert(window_id, entry.clone())
            .is_some();
        trace!(%window_id, replaced, "Window created");
        self.on_created.notify(&entry);
    }

    fn handle_updated(&self, incoming: WindowEntry, change: WindowChange) {
        let window_id = incoming.window_id();
        let merged = {
            let mut windows = self.windows.write();
            match windows.get_mut(&window_id) {
                Some(existing) => {
                    existing.record.window_type = incoming.record.window_type;
                    existing.native = incoming.native;
                    existing.clone()
                }
                None => {
                    debug!(%window_id, ?change, "Dropping update for untracked window");
                    return;
                }
            }
        };
        self.on_updated.notify(&WindowUpdate {
            entry: merged,
            change,
        });
    }

    fn handle_removed(&self, window_id: WindowId) {
        let tracked = self
            .windows
            .read()
            .tracked(&window_id)
            .map(|(generation, entry)| (generation, entry.clone()));
        let Some((generation, entry)) = tracked else {
            debug!(%window_id, "Dropping removal of untracked window");
            return;
        };
        self.on_removed.notify(&entry);
        if self
            .windows
            .write()
            .remove_generation(&window_id, generation)
            .is_some()
        {
            trace!(%window_id, "Window removed");
        } else {
            debug!(%window_id, "Window re-created while its removal was announced");
        }
    }

    fn merge(&self, snapshot: Vec<WindowEntry>) -> Reconciled<WindowEntry> {
        let result = self
            .windows
            .write()
            .merge_if_absent(snapshot, |e| e.window_id());
        if result.inserted > 0 {
            debug!(inserted = result.inserted, "Reconciled windows from enumeration");
        }
        result
    }

    /// Merge an enumeration snapshot, returning the registry's entries in
    /// snapshot order.
    pub fn reconcile(&self, snapshot: Vec<WindowEntry>) -> Vec<WindowEntry> {
        self.merge(snapshot).records
    }

    /// Initial enumeration. Returns how many windows were newly tracked.
    pub async fn synchronize(&self) -> Result<usize, BindingError> {
        let snapshot = self.binding.get_all().await?;
        Ok(self.merge(snapshot).inserted)
    }

    /// Ask the host to open a window. The registry changes only when the
    /// resulting `Created` event arrives.
    pub async fn create(&self, params: WindowCreateParams) -> Result<WindowEntry, BindingError> {
        self.binding.create(params).await
    }

    /// Every window the host reports, backed by the registry's entries.
    pub async fn get_all(&self) -> Result<Vec<WindowEntry>, BindingError> {
        let snapshot = self.binding.get_all().await?;
        Ok(self.reconcile(snapshot))
    }

    /// The host's last focused window, if the registry tracks it.
    pub async fn get_last_focused(&self) -> Result<Option<WindowEntry>, BindingError> {
        let focused = self.binding.get_last_focused().await?;
        Ok(focused.and_then(|window_id| self.get(window_id)))
    }

    pub fn get(&self, window_id: WindowId) -> Option<WindowEntry> {
        self.windows.read().get(&window_id).cloned()
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.windows.read().contains_key(&window_id)
    }

    pub fn len(&self) -> usize {
        self.windows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.read().is_empty()
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        *self.listener.lock()
    }
}

impl std::fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("windows", &self.len())
            .field("attached", &self.listener_id().is_some())
            .finish()
    }
}
