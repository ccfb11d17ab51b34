//! Loadout - the filter, sort, search and drag-transfer engine behind an
//! in-application item browser.
//!
//! The host hands the engine already-materialized records (anything that
//! implements [`Record`](loadout_seeker::Record)) and a few callbacks. The
//! engine never paints and never touches the data source.
//!
//! - [`ViewConfig`]: the per-view JSON document (`FilterProperty`,
//!   `SortProperty`, `SearchProperty`)
//! - [`FilterEngine`]: the configured rule tree and its membership test
//! - [`Table`]: a refreshable snapshot of one container with stable ids,
//!   multi-selection and drag sources
//! - [`Browser`]: the linked set of containers and their drop semantics
//! - [`Preferences`] and [`ViewContext`]: per-view settings and host services
//!
//! # Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use loadout::{Browser, Handle, KitList, LoadPolicy, Table, ViewConfig};
//! use loadout_seeker::{PropertyBag, PropertyId};
//!
//! let config = ViewConfig::from_json(r#"{
//!     "FilterProperty": [],
//!     "SortProperty": ["name", "value"],
//!     "SearchProperty": ["name"]
//! }"#, LoadPolicy::Required).unwrap();
//!
//! let catalog = vec![
//!     Rc::new(PropertyBag::new("a").with(PropertyId::Name, "Apple")),
//!     Rc::new(PropertyBag::new("b").with(PropertyId::Name, "Bread")),
//! ];
//!
//! let mut browser = Browser::default();
//! browser.insert(Table::catalog(catalog).configure(&config, LoadPolicy::Required).unwrap());
//! browser.insert(Table::kit(KitList::new()));
//! browser.link(Handle::Base, Handle::Kit).unwrap();
//! browser.tick();
//!
//! let payload = browser.table(Handle::Base).unwrap().begin_drag(1).unwrap();
//! browser.drop_payload(&payload, Handle::Kit);
//!
//! let kit = browser.table(Handle::Kit).unwrap();
//! assert_eq!(kit.items()[0].record().get(PropertyId::Name), Some("Bread"));
//! ```

mod config;
mod context;
mod error;
mod filter;
mod preferences;
mod table;

pub use config::{FilterNodeConfig, LoadPolicy, RuleConfig, ViewConfig};
pub use context::{TranslateFn, ViewContext};
pub use error::{LoadoutError, Result, TransferError};
pub use filter::{Behavior, FilterEngine, FilterNode, FilterTree, NodeId, NodeKind, ViewMode};
pub use preferences::Preferences;
pub use table::{
    Browser, Deferred, DragPayload, DropAction, DropOutcome, FetchFn, Handle, Item, ItemFn,
    KitEntry, KitList, LiveContainer, NavKey, RecentFn, SaveFn, Selection, Table, TableState,
    TickOutcome,
};

/// Preference keys.
pub mod keys {
    pub use crate::preferences::{
        ITEM_HEIGHT, ITEM_SPACING, ITEM_WIDTH, LAST_SEARCH_KEY, LAST_SORT_KEY, LAST_TARGET,
        SHOW_ALTERNATE_ROW, SHOW_ICON,
    };
}
