//! A window's set of linked containers and the drops between them.
//!
//! The browser owns one [`Table`] per [`Handle`], routes drag payloads to
//! the transfer their `(origin, destination)` pair calls for, and keeps the
//! view's preferences current.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use loadout_seeker::{PropertyId, Record};

use crate::error::{Result, TransferError};
use crate::preferences::{Preferences, LAST_SEARCH_KEY, LAST_SORT_KEY, LAST_TARGET};

use super::handle::{DropAction, Handle};
use super::source::Source;
use super::view::{Table, TickOutcome};
use super::DragPayload;

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The transfer ran. `stale` counts payload ids that no longer resolved.
    Applied {
        action: DropAction,
        moved: usize,
        stale: usize,
    },
    /// Nothing happened.
    Rejected(TransferError),
}

impl DropOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DropOutcome::Applied { .. })
    }

    /// Records actually transferred.
    pub fn moved(&self) -> usize {
        match self {
            DropOutcome::Applied { moved, .. } => *moved,
            DropOutcome::Rejected(_) => 0,
        }
    }
}

/// The set of linked containers of one browser window.
pub struct Browser<R: Record> {
    tables: BTreeMap<Handle, Table<R>>,
    preferences: Preferences,
}

impl<R: Record> Default for Browser<R> {
    fn default() -> Self {
        Browser::new(Preferences::new())
    }
}

impl<R: Record> Browser<R> {
    pub fn new(preferences: Preferences) -> Self {
        Browser {
            tables: BTreeMap::new(),
            preferences,
        }
    }

    /// Registers a table under its handle, returning any table it replaces.
    ///
    /// The table picks up the last sort and search keys.
    pub fn insert(&mut self, mut table: Table<R>) -> Option<Table<R>> {
        table.apply_preferences(&self.preferences);
        self.tables.insert(table.handle(), table)
    }

    pub fn table(&self, handle: Handle) -> Option<&Table<R>> {
        self.tables.get(&handle)
    }

    pub fn table_mut(&mut self, handle: Handle) -> Option<&mut Table<R>> {
        self.tables.get_mut(&handle)
    }

    /// Lets `destination` accept drops from `origin`.
    pub fn link(
        &mut self,
        origin: Handle,
        destination: Handle,
    ) -> std::result::Result<(), TransferError> {
        if !self.tables.contains_key(&origin) {
            return Err(TransferError::MissingTable(origin));
        }
        let table = self
            .tables
            .get_mut(&destination)
            .ok_or(TransferError::MissingTable(destination))?;
        table.link_from(origin);
        Ok(())
    }

    /// Ticks every table.
    pub fn tick(&mut self) -> Vec<(Handle, TickOutcome)> {
        self.tables
            .iter_mut()
            .map(|(handle, table)| (*handle, table.tick()))
            .collect()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn last_target(&self) -> Handle {
        self.preferences.last_target()
    }

    /// Remembers the container "send selection" delivers to.
    pub fn set_last_target(&mut self, handle: Handle) -> Result<()> {
        self.preferences.set(LAST_TARGET, handle.as_str())
    }

    /// Changes the sort key of one table and remembers it.
    ///
    /// Returns `Ok(false)` if there is no such table or it does not offer
    /// `property`; nothing is written then.
    pub fn set_sort_property(&mut self, handle: Handle, property: PropertyId) -> Result<bool> {
        let accepted = self
            .tables
            .get_mut(&handle)
            .is_some_and(|table| table.set_sort_property(property));
        if accepted {
            self.preferences.set(LAST_SORT_KEY, property.as_str())?;
        }
        Ok(accepted)
    }

    /// Changes the search key of one table and remembers it.
    pub fn set_search_property(&mut self, handle: Handle, property: PropertyId) -> Result<bool> {
        let accepted = self
            .tables
            .get_mut(&handle)
            .is_some_and(|table| table.set_search_property(property));
        if accepted {
            self.preferences.set(LAST_SEARCH_KEY, property.as_str())?;
        }
        Ok(accepted)
    }

    /// Applies a drag payload to `destination`.
    ///
    /// Rejections and stale ids are logged, never fatal. Every table touched
    /// is refreshed before this returns.
    pub fn drop_payload(&mut self, payload: &DragPayload, destination: Handle) -> DropOutcome {
        match self.try_drop(payload, destination) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(error = %err, "drop ignored");
                DropOutcome::Rejected(err)
            }
        }
    }

    /// Sends the selection of `from` to the last target container.
    ///
    /// Returns `None` if nothing is selected.
    pub fn send_selection(&mut self, from: Handle) -> Option<DropOutcome> {
        let payload = match self.tables.get(&from) {
            Some(table) => table.selection_payload()?,
            None => return Some(DropOutcome::Rejected(TransferError::MissingTable(from))),
        };
        let destination = self.last_target();
        Some(self.drop_payload(&payload, destination))
    }

    fn try_drop(
        &mut self,
        payload: &DragPayload,
        destination: Handle,
    ) -> std::result::Result<DropOutcome, TransferError> {
        let origin = payload.origin;
        let target = self
            .tables
            .get(&destination)
            .ok_or(TransferError::MissingTable(destination))?;
        if !target.accepts(origin) {
            return Err(TransferError::NotLinked {
                origin,
                destination,
            });
        }
        let action = DropAction::resolve(origin, destination)?;

        let source = self
            .tables
            .get(&origin)
            .ok_or(TransferError::MissingTable(origin))?;
        let mut records = Vec::with_capacity(payload.ids.len());
        let mut stale = 0;
        for &id in &payload.ids {
            match source.item(id) {
                Some(item) => records.push(Rc::clone(item.record())),
                None => {
                    stale += 1;
                    let err = TransferError::StaleId {
                        id,
                        len: source.len(),
                    };
                    tracing::debug!(error = %err, "skipping drag id");
                }
            }
        }

        let moved = match action {
            DropAction::AddCopy => {
                self.with_table(destination, |table| add_copies(table, &records))
            }
            DropAction::AddLive => {
                self.with_table(destination, |table| add_live(table, &records))
            }
            DropAction::RemoveFromOrigin => {
                let moved = self.with_table(origin, |table| remove_from(table, &records));
                self.with_table(destination, |table| table.request_recent_reload());
                moved
            }
        };

        if action == DropAction::RemoveFromOrigin {
            self.with_table(origin, Table::refresh);
        }
        self.with_table(destination, Table::refresh);

        tracing::debug!(%origin, %destination, ?action, moved, stale, "drop applied");
        Ok(DropOutcome::Applied {
            action,
            moved,
            stale,
        })
    }

    fn with_table<T: Default>(
        &mut self,
        handle: Handle,
        f: impl FnOnce(&mut Table<R>) -> T,
    ) -> T {
        self.tables.get_mut(&handle).map(f).unwrap_or_default()
    }
}

fn add_copies<R: Record>(table: &mut Table<R>, records: &[Rc<R>]) -> usize {
    let Source::Kit(kit) = table.source_mut() else {
        return 0;
    };
    for record in records {
        kit.add(Rc::clone(record));
    }
    kit.save();
    records.len()
}

fn add_live<R: Record>(table: &mut Table<R>, records: &[Rc<R>]) -> usize {
    let Source::Live(live) = table.source() else {
        return 0;
    };
    records.iter().filter(|record| live.add(record)).count()
}

fn remove_from<R: Record>(table: &mut Table<R>, records: &[Rc<R>]) -> usize {
    match table.source_mut() {
        Source::Kit(kit) => {
            let removed = records
                .iter()
                .filter(|record| kit.remove(&record.key()).is_some())
                .count();
            kit.save();
            removed
        }
        Source::Live(live) => records.iter().filter(|record| live.remove(record)).count(),
        Source::Catalog(_) => 0,
    }
}

impl<R: Record> fmt::Debug for Browser<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("tables", &self.tables)
            .field("preferences", &self.preferences)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{KitList, LiveContainer, NavKey};
    use loadout_seeker::{PropertyBag, PropertyId, RecordKey};
    use std::cell::RefCell;

    fn bag(key: &str) -> Rc<PropertyBag> {
        Rc::new(PropertyBag::new(key).with(PropertyId::Name, key))
    }

    fn browser() -> (Browser<PropertyBag>, Rc<RefCell<Vec<String>>>) {
        let live = Rc::new(RefCell::new(Vec::<String>::new()));
        let fetch_from = Rc::clone(&live);
        let add_to = Rc::clone(&live);
        let remove_from = Rc::clone(&live);

        let inventory = LiveContainer::new(move || {
            fetch_from.borrow().iter().map(|key| bag(key)).collect()
        })
        .on_add(move |record: &PropertyBag| add_to.borrow_mut().push(record.key().0))
        .on_remove(move |record: &PropertyBag| {
            remove_from.borrow_mut().retain(|key| *key != record.key().0)
        });

        let mut browser = Browser::default();
        browser.insert(Table::catalog(vec![bag("a"), bag("b"), bag("c")]));
        browser.insert(Table::kit(KitList::new()));
        browser.insert(Table::inventory(inventory));
        for (origin, destination) in [
            (Handle::Base, Handle::Kit),
            (Handle::Base, Handle::Inventory),
            (Handle::Kit, Handle::Base),
            (Handle::Inventory, Handle::Base),
        ] {
            browser.link(origin, destination).unwrap();
        }
        browser.tick();
        (browser, live)
    }

    fn payload(origin: Handle, ids: &[usize]) -> DragPayload {
        DragPayload {
            ids: ids.to_vec(),
            origin,
        }
    }

    #[test]
    fn unlinked_drop_is_rejected() {
        let (mut browser, _) = browser();
        let outcome = browser.drop_payload(&payload(Handle::Kit, &[0]), Handle::Inventory);
        assert_eq!(
            outcome,
            DropOutcome::Rejected(TransferError::NotLinked {
                origin: Handle::Kit,
                destination: Handle::Inventory
            })
        );
    }

    #[test]
    fn stale_ids_are_skipped() {
        let (mut browser, _) = browser();
        let outcome = browser.drop_payload(&payload(Handle::Base, &[1, 7]), Handle::Kit);
        assert_eq!(
            outcome,
            DropOutcome::Applied {
                action: DropAction::AddCopy,
                moved: 1,
                stale: 1
            }
        );
        let kit = browser.table(Handle::Kit).unwrap();
        assert_eq!(kit.len(), 1);
        assert_eq!(kit.items()[0].key(), RecordKey::new("b"));
    }

    #[test]
    fn live_add_and_remove_go_through_callbacks() {
        let (mut browser, live) = browser();
        browser.drop_payload(&payload(Handle::Base, &[0, 2]), Handle::Inventory);
        assert_eq!(*live.borrow(), vec!["a", "c"]);
        assert_eq!(browser.table(Handle::Inventory).unwrap().len(), 2);

        let outcome = browser.drop_payload(&payload(Handle::Inventory, &[0]), Handle::Base);
        assert_eq!(outcome.moved(), 1);
        assert_eq!(*live.borrow(), vec!["c"]);
        assert_eq!(browser.table(Handle::Inventory).unwrap().len(), 1);
        assert_eq!(browser.table(Handle::Base).unwrap().len(), 3);
    }

    #[test]
    fn removal_schedules_recent_reload_on_catalog() {
        let (mut browser, _) = browser();
        browser.drop_payload(&payload(Handle::Base, &[0]), Handle::Kit);
        browser.drop_payload(&payload(Handle::Kit, &[0]), Handle::Base);
        let ticks = browser.tick();
        assert!(ticks.contains(&(
            Handle::Base,
            TickOutcome {
                refreshed: true,
                scroll_to: None
            }
        )));
    }

    #[test]
    fn drop_voids_pending_scroll_on_destination() {
        let (mut browser, _) = browser();
        browser.drop_payload(&payload(Handle::Base, &[0, 2]), Handle::Kit);
        browser.tick();

        let kit = browser.table_mut(Handle::Kit).unwrap();
        assert_eq!(kit.navigate(NavKey::End, false), Some(1));

        browser.drop_payload(&payload(Handle::Base, &[1]), Handle::Kit);
        let kit = browser.table_mut(Handle::Kit).unwrap();
        assert_eq!(kit.len(), 3);
        assert_eq!(kit.tick(), TickOutcome::default());
    }

    #[test]
    fn key_changes_are_remembered() {
        let (mut browser, _) = browser();
        assert!(browser
            .set_sort_property(Handle::Base, PropertyId::Value)
            .unwrap());
        assert!(browser
            .set_search_property(Handle::Kit, PropertyId::Category)
            .unwrap());
        assert_eq!(browser.preferences().last_sort_key(), "value");
        assert_eq!(browser.preferences().last_search_key(), "category");

        browser.insert(Table::kit(KitList::new()));
        let kit = browser.table(Handle::Kit).unwrap();
        assert_eq!(kit.sort().property(), PropertyId::Value);
        assert_eq!(kit.search().property(), PropertyId::Category);
    }

    #[test]
    fn send_selection_uses_last_target() {
        let (mut browser, live) = browser();
        assert!(browser.send_selection(Handle::Base).is_none());

        browser.table_mut(Handle::Base).unwrap().select_all();
        let outcome = browser.send_selection(Handle::Base).unwrap();
        assert_eq!(outcome.moved(), 3);
        assert_eq!(browser.table(Handle::Kit).unwrap().len(), 3);

        browser.set_last_target(Handle::Inventory).unwrap();
        browser.table_mut(Handle::Base).unwrap().select_one(1);
        browser.send_selection(Handle::Base);
        assert_eq!(*live.borrow(), vec!["b"]);
    }
}
