//! Tab records as mirrored from the host.

use crate::tab::frames::FrameTable;
use crate::tab::metadata::TabMetadata;
use crate::types::{TabId, WindowId};
use serde::{Deserialize, Serialize};

/// Loading state reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
    #[default]
    Unknown,
}

/// Registry view of one tab.
///
/// `url`, `title`, `status` and `incognito` come from the host; `frames` and
/// `metadata` are owned by the extension and never touched by host updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    pub tab_id: TabId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub incognito: bool,
    #[serde(default)]
    pub status: TabStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<FrameTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TabMetadata>,
}

impl TabRecord {
    pub fn new(tab_id: impl Into<TabId>, url: impl Into<String>) -> Self {
        Self {
            tab_id: tab_id.into(),
            url: url.into(),
            title: String::new(),
            incognito: false,
            status: TabStatus::Unknown,
            frames: None,
            metadata: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: TabStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_incognito(mut self, incognito: bool) -> Self {
        self.incognito = incognito;
        self
    }

    /// Copy the host-owned mutable fields of `incoming` onto this record.
    pub(crate) fn apply_host_update(&mut self, incoming: &TabRecord) {
        self.url.clone_from(&incoming.url);
        self.title.clone_from(&incoming.title);
        self.status = incoming.status;
    }
}

/// Parameters for opening a new tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabCreateParams {
    pub url: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub window_id: Option<WindowId>,
}

impl TabCreateParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            active: true,
            window_id: None,
        }
    }
}
