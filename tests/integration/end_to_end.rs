use serde_json::json;
use tabsync::host::TabEvent;
use tabsync::tab::{TabRecord, TabStatus};
use tabsync::{FrameId, TabId};

use crate::integration::test_utils::{Harness, Recorder};

#[tokio::test]
async fn tab_lifecycle_scenario() {
    // (1) binding reports no existing tabs
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    assert!(tabs.is_empty());
    let created = Recorder::on(tabs.on_created());
    let updated = Recorder::on(tabs.on_updated());

    // (2) creation event
    let announced = TabRecord::new(1, "http://a.com");
    harness.tabs.open(announced.clone());
    assert_eq!(tabs.get(TabId(1)), Some(announced.clone()));
    assert_eq!(created.all(), vec![announced]);

    // (3) frame recording
    tabs.record_frame(TabId(1), FrameId::MAIN, "http://a.com/page");
    let frame = tabs.get_frame(TabId(1), FrameId::MAIN).unwrap();
    assert_eq!(frame.domain_name.as_deref(), Some("a.com"));

    // (4) update event leaves frames untouched
    let frames_before = tabs.get(TabId(1)).unwrap().frames;
    harness.tabs.emit(TabEvent::Updated(
        TabRecord::new(1, "http://a.com/2").with_status(TabStatus::Complete),
    ));
    let tab = tabs.get(TabId(1)).unwrap();
    assert_eq!(tab.url, "http://a.com/2");
    assert_eq!(tab.status, TabStatus::Complete);
    assert_eq!(tab.frames, frames_before);
    assert_eq!(updated.len(), 1);

    // (5) removal is final; a later update is a no-op
    harness.tabs.close(TabId(1));
    assert!(tabs.get(TabId(1)).is_none());
    harness.tabs.emit(TabEvent::Updated(TabRecord::new(1, "http://a.com/3")));
    assert!(tabs.get(TabId(1)).is_none());
    assert_eq!(updated.len(), 1);
}

#[tokio::test]
async fn removal_is_final_for_every_query() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    harness.tabs.open(TabRecord::new(4, "http://gone.example"));
    harness.tabs.focus(TabId(4));
    tabs.record_frame(TabId(4), FrameId::MAIN, "http://gone.example/");
    tabs.update_metadata(TabId(4), [("marker", json!("x"))]);

    harness.tabs.emit(TabEvent::Removed(TabId(4)));

    assert!(tabs.get(TabId(4)).is_none());
    assert!(tabs.get_active().await.unwrap().is_none());
    assert!(tabs.main_frame(TabId(4)).is_none());
    assert!(tabs.get_metadata(TabId(4), "marker").is_none());

    // A fresh creation re-establishes the id without the old state.
    harness.tabs.emit(TabEvent::Created(TabRecord::new(4, "http://back.example")));
    let tab = tabs.get(TabId(4)).unwrap();
    assert_eq!(tab.url, "http://back.example");
    assert!(tab.frames.is_none());
    assert!(tab.metadata.is_none());
}

#[tokio::test]
async fn frame_tables_are_isolated_per_tab() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    harness.tabs.open(TabRecord::new(1, "http://a.com"));
    harness.tabs.open(TabRecord::new(2, "http://b.com"));

    tabs.record_frame(TabId(1), FrameId::MAIN, "http://a.com/");
    tabs.record_frame(TabId(2), FrameId::MAIN, "http://b.com/");
    tabs.record_frame(TabId(2), FrameId(7), "https://cdn.example/widget");

    tabs.record_frame(TabId(1), FrameId(7), "http://other.example/");
    assert_eq!(
        tabs.get_frame(TabId(2), FrameId(7)).unwrap().url,
        "https://cdn.example/widget"
    );

    tabs.clear_frames(TabId(1));
    assert!(tabs.main_frame(TabId(1)).is_none());
    assert_eq!(
        tabs.main_frame(TabId(2)).unwrap().domain_name.as_deref(),
        Some("b.com")
    );
    assert!(tabs.get_frame(TabId(2), FrameId(7)).is_some());
}

#[tokio::test]
async fn metadata_merges_key_by_key() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    harness.tabs.open(TabRecord::new(1, "http://a.com"));

    tabs.update_metadata(TabId(1), [("a", json!(1))]);
    tabs.update_metadata(TabId(1), [("b", json!(2))]);
    let metadata = tabs.get(TabId(1)).unwrap().metadata.unwrap();
    assert_eq!(serde_json::to_value(&metadata).unwrap(), json!({ "a": 1, "b": 2 }));

    tabs.update_metadata(TabId(1), [("a", json!(3))]);
    assert_eq!(tabs.get_metadata(TabId(1), "a"), Some(json!(3)));
    assert_eq!(tabs.get_metadata(TabId(1), "b"), Some(json!(2)));

    tabs.clear_metadata(TabId(1));
    assert!(tabs.get_metadata(TabId(1), "b").is_none());
    assert!(tabs.get(TabId(1)).unwrap().metadata.is_none());
}
