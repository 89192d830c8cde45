//! Playlist and playback cursor.
//!
//! A playlist is an ordered, non-empty list of playable items with a
//! cursor. Navigation wraps circularly in both directions, so the session
//! never reaches an end-of-list state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A playable item as returned by the playlist service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// External video identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Thumbnail image URL
    pub thumbnail: String,
}

/// Ordered items plus the current position.
///
/// Construction rejects empty lists, so a held value always has a current
/// item. The set is replaced wholesale on every fetch, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    items: Vec<PlaylistItem>,
    cursor: usize,
}

impl Playlist {
    /// Build a playlist from fetched items, cursor at the first item.
    pub fn new(items: Vec<PlaylistItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::PlaylistFetch(
                "service returned no playable items".to_string(),
            ));
        }
        Ok(Playlist { items, cursor: 0 })
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Current cursor position, always in `[0, len-1]`
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All items in playback order
    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    /// The item under the cursor
    pub fn current(&self) -> &PlaylistItem {
        &self.items[self.cursor]
    }

    /// Advance to the next item, wrapping to the start after the last.
    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % self.items.len();
    }

    /// Step back to the previous item, wrapping to the end from the first.
    pub fn previous(&mut self) {
        self.cursor = (self.cursor + self.items.len() - 1) % self.items.len();
    }

    /// Jump directly to `index`.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::Validation(format!(
                "index {} out of range for {} items",
                index,
                self.items.len()
            )));
        }
        self.cursor = index;
        Ok(())
    }
}
