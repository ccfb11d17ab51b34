//! Where a table's rows come from.

use std::fmt;
use std::rc::Rc;

use loadout_seeker::{PropertyId, Record, RecordKey};

use super::kit::{KitEntry, KitList};
use super::{FetchFn, ItemFn};

/// One row of a table: a shared record, plus the quantity when the row
/// belongs to a kit.
pub struct Item<R> {
    record: Rc<R>,
    quantity: Option<u32>,
}

impl<R> Item<R> {
    pub fn new(record: Rc<R>) -> Self {
        Item {
            record,
            quantity: None,
        }
    }

    pub fn record(&self) -> &Rc<R> {
        &self.record
    }

    /// Copies held, for kit rows.
    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }
}

impl<R> Clone for Item<R> {
    fn clone(&self) -> Self {
        Item {
            record: Rc::clone(&self.record),
            quantity: self.quantity,
        }
    }
}

impl<R> From<&KitEntry<R>> for Item<R> {
    fn from(entry: &KitEntry<R>) -> Self {
        Item {
            record: Rc::clone(entry.record()),
            quantity: Some(entry.quantity()),
        }
    }
}

/// Kit rows report their kit quantity; everything else reads through.
impl<R: Record> Record for Item<R> {
    fn key(&self) -> RecordKey {
        self.record.key()
    }

    fn get_property(&self, property: PropertyId, arg: Option<&str>) -> String {
        match (property, self.quantity) {
            (PropertyId::Quantity, Some(quantity)) => quantity.to_string(),
            _ => self.record.get_property(property, arg),
        }
    }
}

impl<R: Record> fmt::Debug for Item<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.record.key())
            .field("quantity", &self.quantity)
            .finish()
    }
}

/// A live external container, read and mutated only through callbacks.
pub struct LiveContainer<R> {
    fetch: FetchFn<R>,
    add: Option<ItemFn<R>>,
    remove: Option<ItemFn<R>>,
}

impl<R> LiveContainer<R> {
    pub fn new<F>(fetch: F) -> Self
    where
        F: Fn() -> Vec<Rc<R>> + 'static,
    {
        LiveContainer {
            fetch: Rc::new(fetch),
            add: None,
            remove: None,
        }
    }

    /// Callback that adds a record to the container.
    pub fn on_add<F>(mut self, add: F) -> Self
    where
        F: Fn(&R) + 'static,
    {
        self.add = Some(Rc::new(add));
        self
    }

    /// Callback that removes a record from the container.
    pub fn on_remove<F>(mut self, remove: F) -> Self
    where
        F: Fn(&R) + 'static,
    {
        self.remove = Some(Rc::new(remove));
        self
    }

    pub(crate) fn fetch(&self) -> Vec<Rc<R>> {
        (self.fetch)()
    }

    pub(crate) fn add(&self, record: &R) -> bool {
        match &self.add {
            Some(add) => {
                add(record);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&self, record: &R) -> bool {
        match &self.remove {
            Some(remove) => {
                remove(record);
                true
            }
            None => false,
        }
    }
}

/// The backing store of a table, one variant per container kind.
pub(crate) enum Source<R> {
    Catalog(Vec<Rc<R>>),
    Kit(KitList<R>),
    Live(LiveContainer<R>),
}

impl<R: Record> Source<R> {
    /// Materializes the unfiltered rows.
    pub(crate) fn rows(&self) -> Vec<Item<R>> {
        match self {
            Source::Catalog(records) => records.iter().cloned().map(Item::new).collect(),
            Source::Kit(kit) => kit.entries().iter().map(Item::from).collect(),
            Source::Live(live) => live.fetch().into_iter().map(Item::new).collect(),
        }
    }
}

impl<R: Record> fmt::Debug for Source<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Catalog(records) => write!(f, "Catalog({} records)", records.len()),
            Source::Kit(kit) => f.debug_tuple("Kit").field(kit).finish(),
            Source::Live(_) => f.write_str("Live"),
        }
    }
}
