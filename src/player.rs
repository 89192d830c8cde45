//! Owned handle for the page-embedded video player.
//!
//! Only one player instance is live at a time. The service decides when
//! the page must tear the instance down and build a new one: exactly when
//! the active item's id changes. Cursor movements that land on the item
//! already loaded keep the existing instance.
//!
//! Each handle carries a generation token. The page tags its
//! ended-notifications with it, so a callback from a superseded player is
//! recognizable and dropped instead of advancing the cursor twice.

use uuid::Uuid;

/// Identity of one live embedded-player instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHandle {
    item_id: String,
    generation: Uuid,
}

impl PlayerHandle {
    /// New instance for `item_id` with a fresh generation.
    pub fn new(item_id: &str) -> Self {
        PlayerHandle {
            item_id: item_id.to_string(),
            generation: Uuid::new_v4(),
        }
    }

    /// The item this instance is showing
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Token identifying this instance
    pub fn generation(&self) -> Uuid {
        self.generation
    }
}

/// Change the page must apply to its player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerChange {
    /// Tear down the old instance (if any) and load this one
    Load(PlayerHandle),
    /// Tear down with nothing replacing it
    Unload,
}

/// Reconcile the held handle against the item that should be playing.
///
/// Returns the change to apply, or `None` when the live instance already
/// shows the right item.
pub fn reconcile(current: Option<&PlayerHandle>, active_item: Option<&str>) -> Option<PlayerChange> {
    match (current, active_item) {
        (None, None) => None,
        (Some(handle), Some(id)) if handle.item_id() == id => None,
        (_, Some(id)) => Some(PlayerChange::Load(PlayerHandle::new(id))),
        (Some(_), None) => Some(PlayerChange::Unload),
    }
}
