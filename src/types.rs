//! Core types for quiet-hn

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a Hacker News item
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl PartialEq<u64> for ItemId {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Kind of a Hacker News item, as reported in its `type` field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    /// A submitted story (link or text post)
    Story,
    /// A comment on a story or another comment
    Comment,
    /// A job posting
    Job,
    /// A poll
    Poll,
    /// One option of a poll
    PollOpt,
    /// Any type the API adds later, or a missing type
    #[default]
    Unknown,
    /// Unrecognised type string, kept verbatim
    Other(String),
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "story" => ItemKind::Story,
            "comment" => ItemKind::Comment,
            "job" => ItemKind::Job,
            "poll" => ItemKind::Poll,
            "pollopt" => ItemKind::PollOpt,
            "" => ItemKind::Unknown,
            _ => ItemKind::Other(s),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        kind.as_str().to_string()
    }
}

impl ItemKind {
    /// Wire name of this kind
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Story => "story",
            ItemKind::Comment => "comment",
            ItemKind::Job => "job",
            ItemKind::Poll => "poll",
            ItemKind::PollOpt => "pollopt",
            ItemKind::Unknown => "",
            ItemKind::Other(s) => s,
        }
    }
}

/// A single item as returned by the Hacker News API.
///
/// Items can be stories, comments, jobs and a few rarer kinds. At most one of
/// `text` and `url` is set: link stories carry a `url`, text posts and
/// comments carry `text`. Every field except `id` may be absent from the
/// JSON document and defaults to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Username of the author
    #[serde(default)]
    pub by: String,

    /// Total comment count (stories and polls only)
    #[serde(default)]
    pub descendants: u32,

    /// Item id
    pub id: ItemId,

    /// Ids of direct child comments, in ranked display order
    #[serde(default)]
    pub kids: Vec<ItemId>,

    /// Story score
    #[serde(default)]
    pub score: i64,

    /// Creation time, Unix seconds
    #[serde(default)]
    pub time: i64,

    /// Title (stories, jobs, polls)
    #[serde(default)]
    pub title: String,

    /// Item kind
    #[serde(rename = "type", default)]
    pub kind: ItemKind,

    /// HTML body for text posts and comments
    #[serde(default)]
    pub text: String,

    /// Destination link for link stories
    #[serde(default)]
    pub url: String,
}

impl Item {
    /// Creation time as a UTC timestamp. `None` if `time` is missing (zero or
    /// negative) or out of range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        if self.time <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.time, 0)
    }
}

/// Why an item was left out of the result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// The item fetch failed (transport, status or decode error)
    FetchFailed {
        /// Error message from the fetcher
        error: String,
    },
    /// The item is not a story (job, comment, poll, ...)
    NotAStory {
        /// The kind that was reported
        kind: String,
    },
    /// The item is a story without a link (Ask HN, text posts)
    MissingLink,
}

/// Events emitted while aggregating stories.
///
/// Subscribe with [`crate::Aggregator::subscribe`]. Events are best-effort:
/// with no subscribers, or a lagging one, they are dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A window of ids is about to be fetched
    WindowStarted {
        /// Position of the first id in the window
        start: usize,
        /// Position one past the last id in the window
        end: usize,
        /// Number of fetch tasks spawned for the window
        spawned: usize,
    },

    /// An item was fetched (or failed to fetch) and left out
    ItemDiscarded {
        /// Item id
        id: ItemId,
        /// Why it was discarded
        reason: DiscardReason,
    },

    /// Every outcome of a window has been collected (or the window was cut short)
    WindowCompleted {
        /// Position of the first id in the window
        start: usize,
        /// Position one past the last id in the window
        end: usize,
        /// Valid items accepted from this window
        accepted: usize,
        /// Items discarded from this window
        discarded: usize,
    },

    /// The top-N became fixed before the window finished; remaining fetches were cancelled
    TargetReached {
        /// Number of stories requested
        requested: usize,
        /// Number of fetch tasks still outstanding when cancelled
        cancelled: usize,
    },

    /// The aggregation call returned
    AggregationFinished {
        /// Number of stories requested
        requested: usize,
        /// Number of stories found
        found: usize,
        /// Number of windows processed
        windows: usize,
    },
}
