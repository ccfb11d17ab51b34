//! Multi-selection over a table's stable ids.

use std::collections::BTreeSet;

/// Keyboard movement within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// A set of stable ids plus the anchor for range extension and the preview
/// pointer to the most recently touched item.
///
/// Ids at or beyond the current item count are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<usize>,
    anchor: Option<usize>,
    preview: Option<usize>,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Selection {
            len,
            ..Selection::default()
        }
    }

    /// Empties the selection and rebinds it to `len` items.
    pub fn reset(&mut self, len: usize) {
        self.clear();
        self.len = len;
    }

    fn in_bounds(&self, id: usize) -> bool {
        if id < self.len {
            return true;
        }
        tracing::debug!(id, len = self.len, "ignoring stale selection id");
        false
    }

    /// Selects exactly `id`.
    pub fn select_one(&mut self, id: usize) -> bool {
        if !self.in_bounds(id) {
            return false;
        }
        self.ids.clear();
        self.ids.insert(id);
        self.anchor = Some(id);
        self.preview = Some(id);
        true
    }

    /// Adds or removes `id`, leaving the rest (ctrl-click).
    pub fn toggle(&mut self, id: usize) -> bool {
        if !self.in_bounds(id) {
            return false;
        }
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        self.anchor = Some(id);
        self.preview = Some(id);
        true
    }

    /// Selects the range from the anchor to `id` (shift-click).
    ///
    /// Without an anchor this is [`select_one`](Self::select_one).
    pub fn extend_to(&mut self, id: usize) -> bool {
        let Some(anchor) = self.anchor else {
            return self.select_one(id);
        };
        if !self.in_bounds(id) {
            return false;
        }
        self.ids = (anchor.min(id)..=anchor.max(id)).collect();
        self.preview = Some(id);
        true
    }

    pub fn select_all(&mut self) {
        self.ids = (0..self.len).collect();
        if self.anchor.is_none() && self.len > 0 {
            self.anchor = Some(0);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.anchor = None;
        self.preview = None;
    }

    /// Moves the preview pointer and selects the new item, extending from
    /// the anchor when `extend` is set. Returns the new preview id.
    pub fn navigate(&mut self, key: NavKey, extend: bool, page: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let last = self.len - 1;
        let page = page.max(1);
        let target = match (self.preview, key) {
            (_, NavKey::Home) => 0,
            (_, NavKey::End) => last,
            (None, NavKey::Down | NavKey::PageDown) => 0,
            (None, NavKey::Up | NavKey::PageUp) => last,
            (Some(current), NavKey::Up) => current.saturating_sub(1),
            (Some(current), NavKey::Down) => (current + 1).min(last),
            (Some(current), NavKey::PageUp) => current.saturating_sub(page),
            (Some(current), NavKey::PageDown) => (current + page).min(last),
        };
        if extend {
            self.extend_to(target);
        } else {
            self.select_one(target);
        }
        Some(target)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in ascending (display) order.
    pub fn ids(&self) -> Vec<usize> {
        self.ids.iter().copied().collect()
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn preview(&self) -> Option<usize> {
        self.preview
    }
}
