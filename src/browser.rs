//! Composition root: wires both bindings to their registries.
//!
//! Business logic receives a [`Browser`] (or the registries it hands out)
//! instead of reaching for process-wide state, so tests can build as many
//! isolated instances as they need.

use crate::config::RegistryConfig;
use crate::error::{ApiError, BindingError};
use crate::host::{TabBinding, WindowBinding};
use crate::tab::TabRegistry;
use crate::window::WindowRegistry;
use futures::future::try_join;
use std::sync::Arc;
use tracing::{info, warn};

/// Counts of records newly tracked by an enumeration pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub windows: usize,
    pub tabs: usize,
}

#[derive(Debug, Clone)]
pub struct Browser {
    windows: Arc<WindowRegistry>,
    tabs: Arc<TabRegistry>,
}

impl Browser {
    /// Build both registries and attach them to their bindings.
    ///
    /// Fails immediately if either binding is missing (`NotImplemented`). When
    /// `config.synchronize_on_connect` is set, an initial enumeration of both
    /// bindings runs before returning.
    pub async fn connect(
        config: &RegistryConfig,
        windows: Arc<dyn WindowBinding>,
        tabs: Arc<dyn TabBinding>,
    ) -> Result<Self, ApiError> {
        let browser = Self {
            windows: Arc::new(WindowRegistry::new(windows)),
            tabs: Arc::new(TabRegistry::with_policy(tabs, config.creation_policy)),
        };
        browser.windows.attach()?;
        if let Err(err) = browser.tabs.attach() {
            browser.release();
            return Err(err.into());
        }

        if config.synchronize_on_connect {
            match browser.synchronize().await {
                Ok(summary) => info!(
                    windows = summary.windows,
                    tabs = summary.tabs,
                    "Browser registries synchronized"
                ),
                Err(err) => {
                    browser.release();
                    return Err(err.into());
                }
            }
        }
        Ok(browser)
    }

    /// Disconnect after a failed `connect`, keeping the original error.
    fn release(&self) {
        if let Err(err) = self.disconnect() {
            warn!(error = %err, "Failed to release listeners after connect error");
        }
    }

    pub fn windows(&self) -> &Arc<WindowRegistry> {
        &self.windows
    }

    pub fn tabs(&self) -> &Arc<TabRegistry> {
        &self.tabs
    }

    /// Enumerate both bindings concurrently and merge the results.
    pub async fn synchronize(&self) -> Result<SyncSummary, BindingError> {
        let (windows, tabs) = try_join(self.windows.synchronize(), self.tabs.synchronize()).await?;
        Ok(SyncSummary { windows, tabs })
    }

    /// Remove both registries' listeners from their bindings.
    pub fn disconnect(&self) -> Result<(), BindingError> {
        let windows = self.windows.detach();
        let tabs = self.tabs.detach();
        windows.and(tabs)
    }
}
