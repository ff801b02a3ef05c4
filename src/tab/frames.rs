//! Per-tab frame table: the last URL seen for each frame of a tab.

use crate::types::FrameId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Most recent navigation recorded for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame_id: FrameId,
    pub url: String,
    pub domain_name: Option<String>,
}

/// Frame id to frame record mapping for a single tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameTable(HashMap<FrameId, FrameRecord>);

impl FrameTable {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Insert or overwrite the record for `record.frame_id`
    pub fn record(&mut self, record: FrameRecord) {
        self.0.insert(record.frame_id, record);
    }

    pub fn get(&self, frame_id: FrameId) -> Option<&FrameRecord> {
        self.0.get(&frame_id)
    }

    pub fn main_frame(&self) -> Option<&FrameRecord> {
        self.get(FrameId::MAIN)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameRecord> {
        self.0.values()
    }
}
