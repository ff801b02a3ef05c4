//! Shared test utilities for integration tests
//!
//! Builds a connected [`Browser`] over in-memory bindings and records every
//! notification the registries publish.

use parking_lot::Mutex;
use std::sync::Arc;
use tabsync::channel::Channel;
use tabsync::config::{CreationPolicy, RegistryConfig};
use tabsync::host::memory::{MemoryTabs, MemoryWindows};
use tabsync::Browser;

pub struct Harness {
    pub windows: Arc<MemoryWindows>,
    pub tabs: Arc<MemoryTabs>,
    pub browser: Browser,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_policy(CreationPolicy::Replace).await
    }

    pub async fn with_policy(creation_policy: CreationPolicy) -> Self {
        let windows = Arc::new(MemoryWindows::new());
        let tabs = Arc::new(MemoryTabs::new());
        let config = RegistryConfig {
            creation_policy,
            ..RegistryConfig::default()
        };
        let browser = Browser::connect(&config, windows.clone(), tabs.clone())
            .await
            .expect("in-memory bindings always connect");
        Self {
            windows,
            tabs,
            browser,
        }
    }
}

/// Collects every payload published on a channel
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn on(channel: &Channel<T>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        channel.subscribe(move |payload: &T| sink.lock().push(payload.clone()));
        Self { seen }
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }

    pub fn all(&self) -> Vec<T> {
        self.seen.lock().clone()
    }
}
