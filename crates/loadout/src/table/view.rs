//! A refreshable, selectable, drag-enabled view over one container.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use loadout_seeker::{PropertyId, Record, RecordKey, SearchBox, SortEngine};

use crate::config::{LoadPolicy, ViewConfig};
use crate::error::Result;
use crate::filter::FilterEngine;
use crate::preferences::Preferences;

use super::handle::Handle;
use super::kit::KitList;
use super::selection::{NavKey, Selection};
use super::source::{Item, LiveContainer, Source};
use super::{DragPayload, RecentFn};

const DEFAULT_PAGE_SIZE: usize = 10;

/// Work deferred to the next [`Table::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deferred {
    pub refresh: bool,
    pub reload_recent: bool,
    pub scroll_into_view: Option<usize>,
}

/// Whether a table has deferred work waiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableState {
    #[default]
    Clean,
    Pending(Deferred),
}

/// What a [`Table::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The item list was rebuilt. Stable ids from before the tick are void.
    pub refreshed: bool,
    /// The host should scroll this item into view.
    pub scroll_to: Option<usize>,
}

/// An ordered, filtered, sorted snapshot of one container's records.
///
/// Stable ids are positions in the current snapshot, `0..len`. They are
/// reassigned on every [`refresh`](Self::refresh) and must not be kept across
/// one.
pub struct Table<R: Record> {
    handle: Handle,
    source: Source<R>,
    items: Vec<Item<R>>,
    ids: HashMap<RecordKey, usize>,
    selection: Selection,
    filter: FilterEngine,
    sort: SortEngine,
    search: SearchBox,
    accepts: BTreeSet<Handle>,
    recent: Option<RecentFn>,
    state: TableState,
    page_size: usize,
}

impl<R: Record> Table<R> {
    fn with_source(handle: Handle, source: Source<R>) -> Self {
        Table {
            handle,
            source,
            items: Vec::new(),
            ids: HashMap::new(),
            selection: Selection::default(),
            filter: FilterEngine::new(),
            sort: SortEngine::default(),
            search: SearchBox::default(),
            accepts: BTreeSet::new(),
            recent: None,
            state: TableState::Pending(Deferred {
                refresh: true,
                ..Deferred::default()
            }),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// A read-only master catalog table.
    pub fn catalog(records: Vec<Rc<R>>) -> Self {
        Table::with_source(Handle::Base, Source::Catalog(records))
    }

    /// A kit table over its own working list.
    pub fn kit(list: KitList<R>) -> Self {
        Table::with_source(Handle::Kit, Source::Kit(list))
    }

    /// A table over a live external container.
    pub fn inventory(live: LiveContainer<R>) -> Self {
        Table::with_source(Handle::Inventory, Source::Live(live))
    }

    /// Loads filter, sort and search settings from a view configuration.
    pub fn configure(mut self, config: &ViewConfig, policy: LoadPolicy) -> Result<Self> {
        self.filter = FilterEngine::load(config, policy)?;
        self.sort = SortEngine::new(config.sort_properties(policy)?);
        self.search = SearchBox::new(config.search_properties(policy)?);
        self.request_refresh();
        Ok(self)
    }

    /// Restores the last sort and search keys. Keys the view does not offer
    /// are ignored.
    pub fn apply_preferences(&mut self, prefs: &Preferences) {
        if let Ok(property) = prefs.last_sort_key().parse::<PropertyId>() {
            self.set_sort_property(property);
        }
        if let Ok(property) = prefs.last_search_key().parse::<PropertyId>() {
            self.set_search_property(property);
        }
    }

    pub fn with_filter(mut self, filter: FilterEngine) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortEngine) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_search(mut self, search: SearchBox) -> Self {
        self.search = search;
        self
    }

    /// Installs the provider of the recently-used key list.
    ///
    /// The list is loaded on the next tick.
    pub fn with_recent<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> Vec<RecordKey> + 'static,
    {
        self.recent = Some(Rc::new(provider));
        self.request_recent_reload();
        self
    }

    /// Items moved by PageUp/PageDown.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    // ------------------------------------------------------------------
    // Refresh and deferred work
    // ------------------------------------------------------------------

    /// Rebuilds the snapshot: clears the selection, filters and searches the
    /// source, sorts, and assigns fresh stable ids.
    pub fn refresh(&mut self) {
        self.selection.clear();

        let mut items: Vec<Item<R>> = self
            .source
            .rows()
            .into_iter()
            .filter(|item| self.filter.should_show_item(item) && self.search.matches(item))
            .collect();
        self.sort.sort(&mut items);

        self.ids = items
            .iter()
            .enumerate()
            .map(|(id, item)| (item.key(), id))
            .collect();
        self.items = items;
        self.selection.reset(self.items.len());
        self.settle();
        tracing::debug!(table = %self.handle, items = self.items.len(), "table refreshed");
    }

    /// Drops deferred work made void by a refresh: the refresh itself and
    /// any scroll request, whose id named an item of the old snapshot.
    fn settle(&mut self) {
        if let TableState::Pending(mut work) = self.state {
            work.refresh = false;
            work.scroll_into_view = None;
            self.state = if work == Deferred::default() {
                TableState::Clean
            } else {
                TableState::Pending(work)
            };
        }
    }

    fn defer(&mut self, update: impl FnOnce(&mut Deferred)) {
        let mut work = match self.state {
            TableState::Pending(work) => work,
            TableState::Clean => Deferred::default(),
        };
        update(&mut work);
        self.state = TableState::Pending(work);
    }

    /// Schedules a refresh on the next tick.
    pub fn request_refresh(&mut self) {
        self.defer(|work| work.refresh = true);
    }

    /// Schedules a reload of the recently-used list on the next tick.
    pub fn request_recent_reload(&mut self) {
        self.defer(|work| work.reload_recent = true);
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    /// Runs deferred work.
    ///
    /// A changed search input or property triggers a refresh. A refresh
    /// voids any pending scroll request.
    pub fn tick(&mut self) -> TickOutcome {
        if self.search.reconcile() {
            self.request_refresh();
        }
        let TableState::Pending(work) = std::mem::take(&mut self.state) else {
            return TickOutcome::default();
        };

        if work.reload_recent {
            match &self.recent {
                Some(provider) => self.filter.set_recent(provider()),
                None => tracing::debug!(table = %self.handle, "no recent-list provider"),
            }
        }

        let refreshed = work.refresh || work.reload_recent;
        if refreshed {
            self.refresh();
        }
        let scroll_to = if refreshed {
            None
        } else {
            work.scroll_into_view.filter(|id| *id < self.items.len())
        };
        TickOutcome {
            refreshed,
            scroll_to,
        }
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[Item<R>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: usize) -> Option<&Item<R>> {
        self.items.get(id)
    }

    /// Current stable id of a record.
    pub fn stable_id(&self, key: &RecordKey) -> Option<usize> {
        self.ids.get(key).copied()
    }

    /// The kit's working list, for kit tables.
    pub fn kit_list(&self) -> Option<&KitList<R>> {
        match &self.source {
            Source::Kit(kit) => Some(kit),
            _ => None,
        }
    }

    pub(crate) fn source(&self) -> &Source<R> {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut Source<R> {
        &mut self.source
    }

    /// Replaces the catalog records. A no-op for other containers.
    pub fn set_catalog(&mut self, records: Vec<Rc<R>>) {
        if let Source::Catalog(current) = &mut self.source {
            *current = records;
            self.request_refresh();
        }
    }

    // ------------------------------------------------------------------
    // Engines
    // ------------------------------------------------------------------

    pub fn filter(&self) -> &FilterEngine {
        &self.filter
    }

    /// Selects or deselects a filter node and schedules a refresh.
    pub fn activate_filter(&mut self, id: &str, select: bool) -> Result<()> {
        self.filter.activate_node(id, select)?;
        self.request_refresh();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear_all();
        self.request_refresh();
    }

    pub fn sort(&self) -> &SortEngine {
        &self.sort
    }

    /// Changes the sort key. Returns `false` if the view does not offer it.
    pub fn set_sort_property(&mut self, property: PropertyId) -> bool {
        let previous = self.sort.property();
        let accepted = self.sort.set_property(property);
        if accepted && previous != property {
            self.request_refresh();
        }
        accepted
    }

    /// Changes the search key. Returns `false` if the view does not offer it.
    pub fn set_search_property(&mut self, property: PropertyId) -> bool {
        self.search.set_property(property)
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort.toggle_direction();
        self.request_refresh();
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    /// The search box. Input changes are picked up on the next tick.
    pub fn search_mut(&mut self) -> &mut SearchBox {
        &mut self.search
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_one(&mut self, id: usize) -> bool {
        self.selection.select_one(id)
    }

    pub fn toggle_selected(&mut self, id: usize) -> bool {
        self.selection.toggle(id)
    }

    pub fn extend_selection(&mut self, id: usize) -> bool {
        self.selection.extend_to(id)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Moves the preview pointer by keyboard and schedules scroll-into-view.
    pub fn navigate(&mut self, key: NavKey, extend: bool) -> Option<usize> {
        let target = self.selection.navigate(key, extend, self.page_size)?;
        self.defer(|work| work.scroll_into_view = Some(target));
        Some(target)
    }

    /// The item under the preview pointer.
    pub fn preview(&self) -> Option<&Item<R>> {
        self.selection.preview().and_then(|id| self.item(id))
    }

    /// Selected rows, in display order.
    pub fn selected_items(&self) -> Vec<&Item<R>> {
        self.selection
            .ids()
            .into_iter()
            .filter_map(|id| self.item(id))
            .collect()
    }

    // ------------------------------------------------------------------
    // Drag and drop
    // ------------------------------------------------------------------

    /// Starts a drag on `id`.
    ///
    /// An unselected item drags alone; a selected one drags the whole
    /// selection. Returns `None` for a stale id.
    pub fn begin_drag(&self, id: usize) -> Option<DragPayload> {
        if id >= self.items.len() {
            tracing::debug!(table = %self.handle, id, "drag on stale id");
            return None;
        }
        let ids = if self.selection.contains(id) {
            self.selection.ids()
        } else {
            vec![id]
        };
        Some(DragPayload {
            ids,
            origin: self.handle,
        })
    }

    /// Payload carrying the current selection, if any.
    pub fn selection_payload(&self) -> Option<DragPayload> {
        if self.selection.is_empty() {
            return None;
        }
        Some(DragPayload {
            ids: self.selection.ids(),
            origin: self.handle,
        })
    }

    /// Accepts drops from `origin`.
    pub fn link_from(&mut self, origin: Handle) {
        self.accepts.insert(origin);
    }

    pub fn accepts(&self, origin: Handle) -> bool {
        self.accepts.contains(&origin)
    }
}

impl<R: Record> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("handle", &self.handle)
            .field("source", &self.source)
            .field("items", &self.items.len())
            .field("selection", &self.selection)
            .field("sort", &self.sort.spec())
            .field("search", &self.search.input())
            .field("accepts", &self.accepts)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
