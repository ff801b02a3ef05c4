//! Orderings of enumeration results and lifecycle events for the same tab.

use serde_json::json;
use std::sync::Arc;
use tabsync::config::CreationPolicy;
use tabsync::host::TabEvent;
use tabsync::tab::{TabRecord, TabStatus};
use tabsync::{FrameId, TabId};

use crate::integration::test_utils::{Harness, Recorder};

#[tokio::test]
async fn events_for_unknown_ids_have_no_side_effects() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    let updated = Recorder::on(tabs.on_updated());
    let removed = Recorder::on(tabs.on_removed());
    let activated = Recorder::on(tabs.on_activated());

    harness.tabs.emit(TabEvent::Updated(TabRecord::new(9, "http://x.com")));
    harness.tabs.emit(TabEvent::Removed(TabId(9)));
    harness.tabs.emit(TabEvent::Activated(TabId(9)));

    assert!(updated.is_empty());
    assert!(removed.is_empty());
    assert!(activated.is_empty());
    assert!(tabs.is_empty());
}

#[tokio::test]
async fn enumeration_twice_equals_enumeration_once() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    harness.tabs.seed(TabRecord::new(1, "http://a.com"));
    harness.tabs.seed(TabRecord::new(2, "http://b.com").with_incognito(true));

    let first = tabs.get_all().await.unwrap();
    let state_once: Vec<_> = tabs.tab_ids().into_iter().map(|id| tabs.get(id)).collect();
    let second = tabs.get_all().await.unwrap();
    let state_twice: Vec<_> = tabs.tab_ids().into_iter().map(|id| tabs.get(id)).collect();

    assert_eq!(first, second);
    assert_eq!(state_once, state_twice);
    assert_eq!(tabs.len(), 2);
    assert!(tabs.is_incognito(TabId(2)));
}

#[tokio::test]
async fn stale_enumeration_after_events_keeps_event_state() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();

    // Host snapshot taken while the tab was still loading.
    let stale = TabRecord::new(1, "http://a.com").with_status(TabStatus::Loading);
    harness.tabs.open(stale.clone());
    harness
        .tabs
        .navigate(TabId(1), "http://a.com/done", TabStatus::Complete);
    tabs.record_frame(TabId(1), FrameId::MAIN, "http://a.com/done");

    let merged = tabs.reconcile(vec![stale]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].url, "http://a.com/done");
    assert_eq!(merged[0].status, TabStatus::Complete);
    assert!(merged[0].frames.is_some());
}

#[tokio::test]
async fn enumeration_then_events_converges() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    harness.tabs.seed(TabRecord::new(3, "http://pre.example"));

    // First appearance through enumeration counts as creation.
    let placeholder = tabs.get_all().await.unwrap();
    assert_eq!(placeholder.len(), 1);
    let updated = Recorder::on(tabs.on_updated());

    harness
        .tabs
        .navigate(TabId(3), "http://pre.example/next", TabStatus::Loading);
    assert_eq!(updated.len(), 1);
    assert_eq!(tabs.get(TabId(3)).unwrap().url, "http://pre.example/next");

    harness.tabs.close(TabId(3));
    assert!(tabs.get(TabId(3)).is_none());
    let after = tabs.get_all().await.unwrap();
    assert!(after.is_empty());
}

#[tokio::test]
async fn creation_replaces_enumeration_placeholder() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    tabs.reconcile(vec![TabRecord::new(5, "")]);
    tabs.update_metadata(TabId(5), [("seen", json!(true))]);
    let created = Recorder::on(tabs.on_created());

    let authoritative = TabRecord::new(5, "http://real.example").with_title("Real");
    harness.tabs.emit(TabEvent::Created(authoritative.clone()));

    assert_eq!(tabs.get(TabId(5)), Some(authoritative.clone()));
    assert_eq!(created.all(), vec![authoritative]);
}

#[tokio::test]
async fn redelivered_creation_keeps_state_under_preserve_policy() {
    let harness = Harness::with_policy(CreationPolicy::PreserveAuxiliary).await;
    let tabs = harness.browser.tabs();
    harness.tabs.open(TabRecord::new(5, "http://real.example"));
    tabs.update_metadata(TabId(5), [("seen", json!(true))]);
    tabs.record_frame(TabId(5), FrameId::MAIN, "http://real.example/");

    harness
        .tabs
        .emit(TabEvent::Created(TabRecord::new(5, "http://real.example")));

    assert_eq!(tabs.get_metadata(TabId(5), "seen"), Some(json!(true)));
    assert!(tabs.main_frame(TabId(5)).is_some());
}

#[tokio::test]
async fn subscriber_panic_does_not_corrupt_registry() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    tabs.on_created().subscribe(|_: &TabRecord| panic!("consumer bug"));
    let created = Recorder::on(tabs.on_created());

    harness.tabs.open(TabRecord::new(1, "http://a.com"));

    assert_eq!(created.len(), 1);
    assert!(tabs.get(TabId(1)).is_some());
    harness.tabs.close(TabId(1));
    assert!(tabs.is_empty());
}

#[tokio::test]
async fn creation_during_removal_broadcast_is_kept() {
    let harness = Harness::new().await;
    let tabs = harness.browser.tabs();
    harness.tabs.open(TabRecord::new(1, "http://a.com"));

    let host = Arc::clone(&harness.tabs);
    tabs.on_removed().subscribe(move |tab: &TabRecord| {
        if tab.url == "http://a.com" {
            host.emit(TabEvent::Created(TabRecord::new(1, "http://b.com")));
        }
    });
    let created = Recorder::on(tabs.on_created());

    harness.tabs.close(TabId(1));

    assert_eq!(
        tabs.get(TabId(1)).map(|tab| tab.url),
        Some("http://b.com".to_string())
    );
    assert_eq!(created.len(), 1);

    harness.tabs.emit(TabEvent::Removed(TabId(1)));
    assert!(tabs.is_empty());
}
