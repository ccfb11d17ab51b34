//! The kit container's private working list.

use std::fmt;
use std::rc::Rc;

use loadout_seeker::{Record, RecordKey};

use super::SaveFn;

/// One record in a kit, with how many copies it holds.
pub struct KitEntry<R> {
    record: Rc<R>,
    quantity: u32,
}

impl<R> KitEntry<R> {
    pub fn new(record: Rc<R>, quantity: u32) -> Self {
        KitEntry { record, quantity }
    }

    pub fn record(&self) -> &Rc<R> {
        &self.record
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl<R> Clone for KitEntry<R> {
    fn clone(&self) -> Self {
        KitEntry {
            record: Rc::clone(&self.record),
            quantity: self.quantity,
        }
    }
}

impl<R: Record> fmt::Debug for KitEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KitEntry")
            .field("key", &self.record.key())
            .field("quantity", &self.quantity)
            .finish()
    }
}

/// An ordered working list owned by a kit table.
///
/// Records are shared with the catalog; only the list and its quantities
/// belong to the kit.
pub struct KitList<R> {
    entries: Vec<KitEntry<R>>,
    save: Option<SaveFn<R>>,
}

impl<R> Default for KitList<R> {
    fn default() -> Self {
        KitList {
            entries: Vec::new(),
            save: None,
        }
    }
}

impl<R: Record> KitList<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a previously saved list.
    pub fn from_entries(entries: Vec<KitEntry<R>>) -> Self {
        KitList {
            entries,
            save: None,
        }
    }

    /// Installs the callback that persists the list.
    pub fn with_saver<F>(mut self, save: F) -> Self
    where
        F: Fn(&[KitEntry<R>]) + 'static,
    {
        self.save = Some(Rc::new(save));
        self
    }

    /// Adds one copy of `record`. Returns the record's new quantity.
    pub fn add(&mut self, record: Rc<R>) -> u32 {
        let key = record.key();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.record.key() == key) {
            entry.quantity += 1;
            return entry.quantity;
        }
        self.entries.push(KitEntry::new(record, 1));
        1
    }

    /// Removes the whole entry for `key`.
    pub fn remove(&mut self, key: &RecordKey) -> Option<KitEntry<R>> {
        let index = self.entries.iter().position(|e| &e.record.key() == key)?;
        Some(self.entries.remove(index))
    }

    /// Quantity held for `key`, zero if absent.
    pub fn quantity(&self, key: &RecordKey) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.record.key() == key)
            .map_or(0, KitEntry::quantity)
    }

    pub fn entries(&self) -> &[KitEntry<R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hands the list to the save callback, if any.
    pub fn save(&self) {
        match &self.save {
            Some(save) => {
                tracing::debug!(entries = self.entries.len(), "saving kit");
                save(&self.entries);
            }
            None => tracing::debug!("kit has no save callback"),
        }
    }
}

impl<R: Record> fmt::Debug for KitList<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KitList")
            .field("entries", &self.entries)
            .field("save", &self.save.is_some())
            .finish()
    }
}
