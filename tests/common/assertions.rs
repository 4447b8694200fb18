//! Custom assertions for integration tests

use quiet_hn::{Event, ParsedItem};
use tokio::sync::broadcast;

/// Ids of `stories`, in order
pub fn ids_of(stories: &[ParsedItem]) -> Vec<u64> {
    stories.iter().map(|s| s.id().get()).collect()
}

/// Assert that `stories` are exactly `expected`, in order
#[track_caller]
pub fn assert_story_ids(stories: &[ParsedItem], expected: &[u64]) {
    assert_eq!(
        ids_of(stories),
        expected,
        "story ids differ from expected rank order"
    );
}

/// Drain every event currently buffered in `rx`
pub fn drain_events(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
