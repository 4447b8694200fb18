//! Route handlers
//!
//! - [`stories`] - Front page and story list
//! - [`system`] - Health and events

use serde::{Deserialize, Serialize};

use crate::item::ParsedItem;

mod stories;
mod system;

pub use stories::*;
pub use system::*;

/// Body of `GET /api/stories`
#[derive(Debug, Serialize, Deserialize)]
pub struct StoriesResponse {
    /// Stories in rank order
    pub stories: Vec<ParsedItem>,
    /// Number of stories requested
    pub requested: usize,
    /// Whether `stories` holds the full requested count
    pub complete: bool,
    /// Time spent building the list, in milliseconds
    pub elapsed_ms: u64,
}
