//! Arbitrary interleavings of enumeration and lifecycle events, checked
//! against a reference model of the merge-if-absent / drop-if-absent rules.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tabsync::host::memory::MemoryTabs;
use tabsync::host::TabEvent;
use tabsync::tab::TabRecord;
use tabsync::{FrameId, TabId, TabRegistry};

#[derive(Debug, Clone)]
enum Op {
    Created(i64, u8),
    Updated(i64, u8),
    Removed(i64),
    Activated(i64),
    Enumerate(Vec<(i64, u8)>),
    RecordFrame(i64, i64, u8),
    ClearFrames(i64),
}

/// What the registry should hold for one tab
#[derive(Debug, Clone, PartialEq)]
struct ModelTab {
    url: String,
    frames: HashMap<i64, String>,
}

fn url(n: u8) -> String {
    format!("http://site{}.example/", n)
}

fn op() -> impl Strategy<Value = Op> {
    let id = 1i64..5;
    let page = 0u8..4;
    prop_oneof![
        (id.clone(), page.clone()).prop_map(|(i, p)| Op::Created(i, p)),
        (id.clone(), page.clone()).prop_map(|(i, p)| Op::Updated(i, p)),
        id.clone().prop_map(Op::Removed),
        id.clone().prop_map(Op::Activated),
        prop::collection::vec((id.clone(), page.clone()), 0..4).prop_map(Op::Enumerate),
        (id.clone(), 0i64..3, page).prop_map(|(i, f, p)| Op::RecordFrame(i, f, p)),
        id.prop_map(Op::ClearFrames),
    ]
}

fn apply_model(model: &mut HashMap<i64, ModelTab>, op: &Op) {
    match op {
        Op::Created(id, page) => {
            model.insert(
                *id,
                ModelTab {
                    url: url(*page),
                    frames: HashMap::new(),
                },
            );
        }
        Op::Updated(id, page) => {
            if let Some(tab) = model.get_mut(id) {
                tab.url = url(*page);
            }
        }
        Op::Removed(id) => {
            model.remove(id);
        }
        Op::Activated(_) => {}
        Op::Enumerate(items) => {
            for (id, page) in items {
                model.entry(*id).or_insert_with(|| ModelTab {
                    url: url(*page),
                    frames: HashMap::new(),
                });
            }
        }
        Op::RecordFrame(id, frame, page) => {
            if let Some(tab) = model.get_mut(id) {
                tab.frames.insert(*frame, url(*page));
            }
        }
        Op::ClearFrames(id) => {
            if let Some(tab) = model.get_mut(id) {
                tab.frames.clear();
            }
        }
    }
}

fn apply_registry(registry: &TabRegistry, op: &Op) {
    match op {
        Op::Created(id, page) => registry.handle_event(TabEvent::Created(TabRecord::new(*id, url(*page)))),
        Op::Updated(id, page) => registry.handle_event(TabEvent::Updated(TabRecord::new(*id, url(*page)))),
        Op::Removed(id) => registry.handle_event(TabEvent::Removed(TabId(*id))),
        Op::Activated(id) => registry.handle_event(TabEvent::Activated(TabId(*id))),
        Op::Enumerate(items) => {
            registry.reconcile(
                items
                    .iter()
                    .map(|(id, page)| TabRecord::new(*id, url(*page)))
                    .collect(),
            );
        }
        Op::RecordFrame(id, frame, page) => {
            registry.record_frame(TabId(*id), FrameId(*frame), &url(*page))
        }
        Op::ClearFrames(id) => registry.clear_frames(TabId(*id)),
    }
}

fn snapshot(registry: &TabRegistry) -> HashMap<i64, ModelTab> {
    registry
        .tab_ids()
        .into_iter()
        .filter_map(|id| registry.get(id))
        .map(|tab| {
            let frames = tab
                .frames
                .map(|table| {
                    table
                        .iter()
                        .map(|frame| (frame.frame_id.0, frame.url.clone()))
                        .collect()
                })
                .unwrap_or_default();
            (tab.tab_id.0, ModelTab { url: tab.url, frames })
        })
        .collect()
}

proptest! {
    #[test]
    fn registry_matches_reference_model(ops in prop::collection::vec(op(), 0..40)) {
        let registry = TabRegistry::new(Arc::new(MemoryTabs::new()));
        let mut model = HashMap::new();

        for op in &ops {
            apply_model(&mut model, op);
            apply_registry(&registry, op);
            prop_assert_eq!(snapshot(&registry), model.clone());
        }
    }

    #[test]
    fn repeated_enumeration_is_idempotent(
        ops in prop::collection::vec(op(), 0..20),
        items in prop::collection::vec((1i64..5, 0u8..4), 0..5),
    ) {
        let registry = TabRegistry::new(Arc::new(MemoryTabs::new()));
        for op in &ops {
            apply_registry(&registry, op);
        }

        let enumerate = Op::Enumerate(items);
        apply_registry(&registry, &enumerate);
        let once = snapshot(&registry);
        apply_registry(&registry, &enumerate);
        prop_assert_eq!(snapshot(&registry), once);
    }
}
