//! Stateful search box with autocomplete.
//!
//! [`SearchBox`] holds the live input buffer, the last committed value, the
//! compiled [`SearchQuery`], and a navigable list of autocomplete suggestions.
//!
//! ```text
//! keystroke ──► set_input ──► (query recompiled, buffer dirty)
//! Up / Down ──► cycle highlighted suggestion (wraps around)
//! Tab       ──► accept highlighted suggestion, commit
//! Enter     ──► commit live input
//! Escape    ──► revert to last committed value
//! ```

use std::collections::HashSet;

use crate::property::PropertyId;
use crate::record::Record;
use crate::search::{operand, operator_prefix, SearchQuery};

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKey {
    Up,
    Down,
    Tab,
    Enter,
    Escape,
}

/// Ranks autocomplete candidates against the operand of `input`.
///
/// Candidates containing the operand (case-insensitive) are ordered by the
/// position of the first occurrence, earliest first; ties keep candidate order.
/// Candidates without it are dropped, as are duplicates. An empty operand
/// yields no suggestions.
///
/// ```
/// use loadout_seeker::rank_candidates;
///
/// let ranked = rank_candidates("st", ["Iron Sword", "Steel Sword", "Ebony Staff", "Mace"]);
/// assert_eq!(ranked, vec!["Steel Sword", "Ebony Staff"]);
/// ```
pub fn rank_candidates<I, S>(input: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let needle = operand(input).to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut ranked: Vec<(usize, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let position = candidate.to_lowercase().find(&needle)?;
            seen.insert(candidate.to_string())
                .then(|| (position, candidate.to_string()))
        })
        .collect();
    ranked.sort_by_key(|(position, _)| *position);
    ranked.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Per-view search state.
#[derive(Debug, Clone)]
pub struct SearchBox {
    property: PropertyId,
    offered: Vec<PropertyId>,
    input: String,
    committed: String,
    query: SearchQuery,
    reconciled: (PropertyId, String),
    suggestions: Vec<String>,
    highlighted: Option<usize>,
}

impl Default for SearchBox {
    fn default() -> Self {
        SearchBox::new(Vec::new())
    }
}

impl SearchBox {
    /// Creates an empty search box offering the given properties.
    ///
    /// The initial search property is the first offered one, or `name`.
    pub fn new(offered: Vec<PropertyId>) -> Self {
        let property = offered.first().copied().unwrap_or(PropertyId::Name);
        SearchBox {
            property,
            offered,
            input: String::new(),
            committed: String::new(),
            query: SearchQuery::All,
            reconciled: (property, String::new()),
            suggestions: Vec::new(),
            highlighted: None,
        }
    }

    pub fn property(&self) -> PropertyId {
        self.property
    }

    /// Properties offered as search keys, in display order.
    pub fn offered(&self) -> &[PropertyId] {
        &self.offered
    }

    /// The live input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The last committed input.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The compiled query for the live input.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Selects the property searched.
    ///
    /// Returns `false` if the view offers a list of search keys and `property`
    /// is not in it.
    pub fn set_property(&mut self, property: PropertyId) -> bool {
        if !self.offered.is_empty() && !self.offered.contains(&property) {
            tracing::debug!(%property, "ignoring search property not offered by this view");
            return false;
        }
        self.property = property;
        true
    }

    /// Replaces the live input, as on a keystroke.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.query = SearchQuery::parse(&self.input);
        self.highlighted = None;
    }

    /// Commits the live input.
    pub fn commit(&mut self) {
        self.committed = self.input.clone();
        self.clear_suggestions();
    }

    /// Discards uncommitted input, restoring the last committed value.
    pub fn revert(&mut self) {
        let committed = self.committed.clone();
        self.set_input(committed);
        self.clear_suggestions();
    }

    /// Clears both buffers.
    pub fn clear(&mut self) {
        self.set_input(String::new());
        self.commit();
    }

    /// Returns `true` if the input or property changed since the last
    /// [`reconcile`](Self::reconcile).
    pub fn is_dirty(&self) -> bool {
        self.reconciled.0 != self.property || self.reconciled.1 != self.input
    }

    /// Marks the current input as seen. Returns `true` if it had changed.
    pub fn reconcile(&mut self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        self.reconciled = (self.property, self.input.clone());
        true
    }

    /// Tests a record against the live query on the selected property.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.query.matches(record, self.property)
    }

    /// Recomputes the suggestion list from `candidates`.
    pub fn autocomplete<I, S>(&mut self, candidates: I) -> &[String]
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.suggestions = rank_candidates(&self.input, candidates);
        self.highlighted = None;
        &self.suggestions
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// The currently highlighted suggestion.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }

    /// Moves the highlight down, wrapping to the top.
    pub fn highlight_next(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    /// Moves the highlight up, wrapping to the bottom.
    pub fn highlight_prev(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }

    /// Accepts the highlighted suggestion into the input and commits it.
    ///
    /// The operator typed before the operand is kept, so `==ste` completes to
    /// `==Steel`. A leading quote is closed. Returns `false` if nothing is
    /// highlighted.
    pub fn accept(&mut self) -> bool {
        let Some(candidate) = self.highlighted().map(str::to_string) else {
            return false;
        };
        let prefix = operator_prefix(&self.input);
        let completed = if prefix == "\"" {
            format!("\"{candidate}\"")
        } else {
            format!("{prefix}{candidate}")
        };
        self.set_input(completed);
        self.commit();
        true
    }

    /// Dispatches a navigation key.
    pub fn handle_key(&mut self, key: SearchKey) {
        match key {
            SearchKey::Up => self.highlight_prev(),
            SearchKey::Down => self.highlight_next(),
            SearchKey::Tab => {
                self.accept();
            }
            SearchKey::Enter => self.commit(),
            SearchKey::Escape => self.revert(),
        }
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PropertyBag;

    const NAMES: [&str; 5] = [
        "Iron Sword",
        "Steel Sword",
        "Steel Plate",
        "Ebony Staff",
        "Mace",
    ];

    #[test]
    fn ranking_by_position() {
        assert_eq!(
            rank_candidates("st", NAMES),
            vec!["Steel Sword", "Steel Plate", "Ebony Staff"]
        );
        assert_eq!(rank_candidates("sword", NAMES), vec!["Iron Sword", "Steel Sword"]);
        assert!(rank_candidates("zzz", NAMES).is_empty());
        assert!(rank_candidates("", NAMES).is_empty());
    }

    #[test]
    fn ranking_uses_operand_and_dedupes() {
        assert_eq!(
            rank_candidates("==mac", ["Mace", "Mace", "Macabre Mask"]),
            vec!["Mace", "Macabre Mask"]
        );
    }

    #[test]
    fn navigation_wraps() {
        let mut search = SearchBox::new(vec![PropertyId::Name]);
        search.set_input("st");
        assert_eq!(search.autocomplete(NAMES).len(), 3);
        assert_eq!(search.highlighted(), None);

        search.handle_key(SearchKey::Down);
        assert_eq!(search.highlighted(), Some("Steel Sword"));
        search.handle_key(SearchKey::Down);
        search.handle_key(SearchKey::Down);
        assert_eq!(search.highlighted(), Some("Ebony Staff"));
        search.handle_key(SearchKey::Down);
        assert_eq!(search.highlighted(), Some("Steel Sword"));
        search.handle_key(SearchKey::Up);
        assert_eq!(search.highlighted(), Some("Ebony Staff"));
    }

    #[test]
    fn up_from_nothing_selects_last() {
        let mut search = SearchBox::default();
        search.set_input("st");
        search.autocomplete(NAMES);
        search.highlight_prev();
        assert_eq!(search.highlighted(), Some("Ebony Staff"));
    }

    #[test]
    fn navigation_on_empty_list() {
        let mut search = SearchBox::default();
        search.highlight_next();
        assert_eq!(search.highlighted_index(), None);
        assert!(!search.accept());
    }

    #[test]
    fn tab_accepts_and_commits() {
        let mut search = SearchBox::default();
        search.set_input("==ste");
        search.autocomplete(NAMES);
        search.handle_key(SearchKey::Down);
        search.handle_key(SearchKey::Tab);

        assert_eq!(search.input(), "==Steel Sword");
        assert_eq!(search.committed(), "==Steel Sword");
        assert!(search.suggestions().is_empty());
    }

    #[test]
    fn tab_closes_quotes() {
        let mut search = SearchBox::default();
        search.set_input("\"mac");
        search.autocomplete(NAMES);
        search.highlight_next();
        assert!(search.accept());
        assert_eq!(search.input(), "\"Mace\"");
    }

    #[test]
    fn escape_reverts_to_committed() {
        let mut search = SearchBox::default();
        search.set_input("iron");
        search.handle_key(SearchKey::Enter);
        search.set_input("ironx");
        search.handle_key(SearchKey::Escape);

        assert_eq!(search.input(), "iron");
        let iron = PropertyBag::new("i").with(PropertyId::Name, "Iron Sword");
        assert!(search.matches(&iron));
    }

    #[test]
    fn dirty_tracking() {
        let mut search = SearchBox::new(vec![PropertyId::Name, PropertyId::Category]);
        assert!(!search.is_dirty());

        search.set_input("a");
        assert!(search.is_dirty());
        assert!(search.reconcile());
        assert!(!search.reconcile());

        // Typing back to the same text is not a change
        search.set_input("ab");
        search.set_input("a");
        assert!(!search.reconcile());

        assert!(search.set_property(PropertyId::Category));
        assert!(search.reconcile());
        assert!(!search.set_property(PropertyId::Weight));
    }

    #[test]
    fn matches_selected_property() {
        let mut search = SearchBox::new(vec![PropertyId::Name, PropertyId::Damage]);
        let axe = PropertyBag::new("axe")
            .with(PropertyId::Name, "War Axe")
            .with(PropertyId::Damage, "12");

        search.set_input(">10");
        assert!(!search.matches(&axe));
        search.set_property(PropertyId::Damage);
        assert!(search.matches(&axe));

        search.clear();
        assert!(search.matches(&PropertyBag::new("nothing")));
    }
}
