//! The Selection / Drag-Transfer Engine.
//!
//! Each container is a [`Table`] tagged with a [`Handle`]. A [`Browser`] holds
//! one table per handle, the link graph between them, and resolves drops:
//!
//! | origin → destination | effect |
//! |----------------------|--------|
//! | base → kit           | copy into the kit, bumping known quantities, then save the kit |
//! | base → inventory     | live add through the inventory's callback |
//! | kit → base           | remove from the kit, then save the kit |
//! | inventory → base     | live remove through the inventory's callback |
//!
//! Other pairs are ignored. Stale ids in a payload are skipped.

mod browser;
mod handle;
mod kit;
mod selection;
mod source;
mod view;

use std::rc::Rc;

use loadout_seeker::RecordKey;

pub use browser::{Browser, DropOutcome};
pub use handle::{DropAction, Handle};
pub use kit::{KitEntry, KitList};
pub use selection::{NavKey, Selection};
pub use source::{Item, LiveContainer};
pub use view::{Deferred, Table, TableState, TickOutcome};

/// Persists a kit's working list.
pub type SaveFn<R> = Rc<dyn Fn(&[KitEntry<R>])>;

/// Reads the current contents of a live container.
pub type FetchFn<R> = Rc<dyn Fn() -> Vec<Rc<R>>>;

/// Adds a record to, or removes it from, a live container.
pub type ItemFn<R> = Rc<dyn Fn(&R)>;

/// Supplies the keys of recently used records.
pub type RecentFn = Rc<dyn Fn() -> Vec<RecordKey>>;

/// Stable ids carried from a drag start to a drop.
///
/// The ids are only meaningful against the origin table's current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub ids: Vec<usize>,
    pub origin: Handle,
}
