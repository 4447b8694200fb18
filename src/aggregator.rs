//! Ordered concurrent story aggregation.
//!
//! [`Aggregator::fetch`] walks the ranked id list in windows. Every id in a
//! window is fetched by its own task; the tasks report back over an mpsc
//! channel to the calling task, which is the only writer of the accumulator.
//! Windows keep coming until enough valid stories have been collected or the
//! ids run out, and the result is rebuilt in rank order at the end, so the
//! order in which fetches complete never matters.
//!
//! A window normally ends when every task has reported. It ends early once
//! the leading, fully resolved part of the window already holds enough
//! stories: at that point the top-N cannot change, so the window's
//! cancellation token is fired and the remaining fetches are abandoned.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::ItemFetcher;
use crate::config::AggregateConfig;
use crate::error::{Error, Result};
use crate::item::ParsedItem;
use crate::types::{DiscardReason, Event, ItemId};

/// What a single fetch task reports. Each task sends exactly one.
#[derive(Debug)]
enum Outcome {
    /// A story with a link, ready for the page
    Valid(ParsedItem),
    /// Fetch failed, or the item is not a link story
    Invalid(DiscardReason),
    /// The window was cut short before the fetch finished
    Cancelled,
}

/// Per-window counters
#[derive(Debug, Default)]
struct WindowReport {
    accepted: usize,
    discarded: usize,
}

/// State owned by one `fetch` call, dropped when it returns
struct Accumulator {
    /// Valid stories keyed by id
    items: HashMap<ItemId, ParsedItem>,
    /// Ids whose outcome is known, valid or not
    resolved: HashSet<ItemId>,
}

/// Concurrent, rank-preserving story fetcher
pub struct Aggregator {
    fetcher: Arc<dyn ItemFetcher>,
    config: AggregateConfig,
    event_tx: broadcast::Sender<Event>,
}

impl Aggregator {
    /// Create an aggregator that fetches items through `fetcher`
    pub fn new(fetcher: Arc<dyn ItemFetcher>, config: AggregateConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity.max(1));
        Self {
            fetcher,
            config,
            event_tx,
        }
    }

    /// Subscribe to aggregation events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Aggregation settings in use
    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    fn emit(&self, event: Event) {
        // No subscribers is fine
        self.event_tx.send(event).ok();
    }

    /// Return the first `n` link stories among `ids`, in the order of `ids`.
    ///
    /// Ids are fetched concurrently, one window at a time. An id that appears
    /// more than once contributes at most one story. Failed fetches and
    /// non-story items are skipped silently.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientResults`] when `ids` holds fewer than `n` link
    /// stories. The error carries the stories that were found, still in rank
    /// order.
    pub async fn fetch(&self, ids: &[ItemId], n: usize) -> Result<Vec<ParsedItem>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let window = self.config.window_for(n);
        let mut acc = Accumulator {
            items: HashMap::new(),
            resolved: HashSet::new(),
        };

        let mut cursor = 0;
        let mut windows = 0;
        while acc.items.len() < n && cursor < ids.len() {
            let end = (cursor + window).min(ids.len());
            let report = self
                .run_window(&ids[cursor..end], cursor, n, &mut acc)
                .await;

            info!(
                start = cursor,
                end,
                accepted = report.accepted,
                discarded = report.discarded,
                total = acc.items.len(),
                requested = n,
                "Window complete"
            );
            self.emit(Event::WindowCompleted {
                start: cursor,
                end,
                accepted: report.accepted,
                discarded: report.discarded,
            });

            cursor = end;
            windows += 1;
        }

        let stories = assemble(ids, acc.items, n);

        self.emit(Event::AggregationFinished {
            requested: n,
            found: stories.len(),
            windows,
        });

        if stories.len() < n {
            warn!(
                requested = n,
                found = stories.len(),
                ids = ids.len(),
                "Ran out of ids before finding enough stories"
            );
            return Err(Error::InsufficientResults {
                requested: n,
                items: stories,
            });
        }
        Ok(stories)
    }

    /// Fetch one window and fold its outcomes into `acc`.
    ///
    /// `start` is the position of `window[0]` in the full id list. Ids already
    /// resolved by an earlier window, and repeats inside this window, are not
    /// fetched again.
    async fn run_window(
        &self,
        window: &[ItemId],
        start: usize,
        n: usize,
        acc: &mut Accumulator,
    ) -> WindowReport {
        let mut to_fetch = Vec::with_capacity(window.len());
        let mut seen = HashSet::with_capacity(window.len());
        for &id in window {
            if !acc.resolved.contains(&id) && seen.insert(id) {
                to_fetch.push(id);
            }
        }

        debug!(
            start,
            end = start + window.len(),
            spawned = to_fetch.len(),
            "Fetching window"
        );
        self.emit(Event::WindowStarted {
            start,
            end: start + window.len(),
            spawned: to_fetch.len(),
        });

        let token = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel::<(ItemId, Outcome)>(to_fetch.len().max(1));
        let mut tasks = JoinSet::new();
        for &id in &to_fetch {
            tasks.spawn(fetch_one(
                Arc::clone(&self.fetcher),
                id,
                token.clone(),
                tx.clone(),
            ));
        }
        // Only the tasks hold senders now, so `recv` ends if they all go away
        drop(tx);

        // Every story before the window is already resolved and counted
        let mut settled = acc.items.len();
        let mut counted: HashSet<ItemId> = HashSet::new();
        let mut accepted_here: HashSet<ItemId> = HashSet::new();
        let mut frontier = 0;
        let mut pending = to_fetch.len();
        let mut report = WindowReport::default();

        while pending > 0 {
            let Some((id, outcome)) = rx.recv().await else {
                warn!(pending, "Fetch tasks ended without reporting");
                break;
            };
            pending -= 1;

            match outcome {
                Outcome::Valid(item) => {
                    report.accepted += 1;
                    accepted_here.insert(id);
                    acc.items.insert(id, item);
                    acc.resolved.insert(id);
                }
                Outcome::Invalid(reason) => {
                    report.discarded += 1;
                    debug!(item_id = id.0, reason = ?reason, "Discarding item");
                    self.emit(Event::ItemDiscarded { id, reason });
                    acc.resolved.insert(id);
                }
                Outcome::Cancelled => continue,
            }

            while frontier < window.len() && acc.resolved.contains(&window[frontier]) {
                let id = window[frontier];
                if accepted_here.contains(&id) && counted.insert(id) {
                    settled += 1;
                }
                frontier += 1;
            }

            if settled >= n && pending > 0 {
                token.cancel();
                info!(
                    requested = n,
                    cancelled = pending,
                    "Top stories settled, cancelling remaining fetches"
                );
                self.emit(Event::TargetReached {
                    requested: n,
                    cancelled: pending,
                });
                break;
            }
        }

        // Stragglers have been told to stop; abort any that have not noticed yet
        tasks.abort_all();
        report
    }
}

/// Fetch, classify and report a single id. Sends exactly one outcome.
async fn fetch_one(
    fetcher: Arc<dyn ItemFetcher>,
    id: ItemId,
    token: CancellationToken,
    tx: mpsc::Sender<(ItemId, Outcome)>,
) {
    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => Outcome::Cancelled,
        result = fetcher.get_item(id) => classify(result),
    };
    // The receiver is gone once the window has what it needs
    tx.send((id, outcome)).await.ok();
}

fn classify(result: Result<crate::types::Item>) -> Outcome {
    match result {
        Ok(item) => {
            let parsed = ParsedItem::from_item(item);
            match parsed.discard_reason() {
                Some(reason) => Outcome::Invalid(reason),
                None => Outcome::Valid(parsed),
            }
        }
        Err(e) => Outcome::Invalid(DiscardReason::FetchFailed {
            error: e.to_string(),
        }),
    }
}

/// Rebuild rank order: walk `ids` and take accumulated stories until `n` are
/// collected or none are left. Taking each story out of the map as it is
/// emitted drops repeated ids.
fn assemble(ids: &[ItemId], mut items: HashMap<ItemId, ParsedItem>, n: usize) -> Vec<ParsedItem> {
    let mut stories = Vec::with_capacity(n.min(items.len()));
    for id in ids {
        if stories.len() >= n || items.is_empty() {
            break;
        }
        if let Some(item) = items.remove(id) {
            stories.push(item);
        }
    }
    stories
}
