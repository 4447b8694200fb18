//! Story filtering and enrichment.
//!
//! The ranked feed mixes stories, jobs and the occasional poll, and nothing in
//! it says which is which. Every id has to be fetched before it can be judged,
//! and only link stories make it onto the page.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{DiscardReason, Item, ItemId, ItemKind};

/// An [`Item`] plus the display host derived from its link
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedItem {
    /// The raw item
    #[serde(flatten)]
    pub item: Item,

    /// Host of `item.url` without a leading `www.` (empty if the link does not parse)
    pub host: String,
}

impl ParsedItem {
    /// Enrich a raw item with its display host. Pure, no I/O.
    pub fn from_item(item: Item) -> Self {
        let host = display_host(&item.url);
        Self { item, host }
    }

    /// Item id
    pub fn id(&self) -> ItemId {
        self.item.id
    }

    /// Whether this item belongs on the page: a story that links somewhere
    pub fn is_story_link(&self) -> bool {
        self.item.kind == ItemKind::Story && !self.item.url.is_empty()
    }

    /// The link, if it is safe to put in an `href`: an absolute http(s) URL
    pub fn web_link(&self) -> Option<&str> {
        is_web_link(&self.item.url).then_some(self.item.url.as_str())
    }

    /// Why this item would be discarded, or `None` if it is a story link
    pub fn discard_reason(&self) -> Option<DiscardReason> {
        if self.item.kind != ItemKind::Story {
            return Some(DiscardReason::NotAStory {
                kind: self.item.kind.as_str().to_string(),
            });
        }
        if self.item.url.is_empty() {
            return Some(DiscardReason::MissingLink);
        }
        None
    }
}

impl From<Item> for ParsedItem {
    fn from(item: Item) -> Self {
        Self::from_item(item)
    }
}

/// Whether `link` parses as an absolute `http` or `https` URL
pub fn is_web_link(link: &str) -> bool {
    Url::parse(link).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Host name of `link` with a leading `www.` stripped.
///
/// Returns an empty string when `link` is empty, does not parse, or has no host.
pub fn display_host(link: &str) -> String {
    if link.is_empty() {
        return String::new();
    }
    match Url::parse(link) {
        Ok(url) => url
            .host_str()
            .map(|h| h.strip_prefix("www.").unwrap_or(h).to_string())
            .unwrap_or_default(),
        Err(e) => {
            tracing::debug!(link = %link, error = %e, "Could not parse item link");
            String::new()
        }
    }
}
