//! The sort engine.
//!
//! Provides [`Dir`] for sort direction, [`SortSpec`] for the current sort key,
//! and [`SortEngine`], the comparator factory used by tables.
//!
//! # Ordering
//!
//! Records whose value for the sort property is empty, a literal `"0"`, or
//! unparsable for a numeric property always sort after every record with a
//! value. This holds in both directions; the direction only reverses the order
//! among records that have a value.

use std::cmp::Ordering;

use crate::property::{PropertyId, PropertyKind};
use crate::record::Record;
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns the opposite direction.
    pub fn flipped(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The property and direction records are currently sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub property: PropertyId,
    pub dir: Dir,
}

impl SortSpec {
    pub fn asc(property: PropertyId) -> Self {
        SortSpec {
            property,
            dir: Dir::Asc,
        }
    }

    pub fn desc(property: PropertyId) -> Self {
        SortSpec {
            property,
            dir: Dir::Desc,
        }
    }

    /// Returns `true` if the direction is ascending.
    pub fn ascending(&self) -> bool {
        self.dir.is_asc()
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::asc(PropertyId::Name)
    }
}

/// Comparable reading of a property string. `None` sinks to the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Number(Number),
    Text(&'a str),
}

fn sort_key(kind: PropertyKind, raw: &str) -> Option<SortKey<'_>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "0" {
        return None;
    }
    match Value::parse(kind, raw) {
        Value::Number(n) => Some(SortKey::Number(n)),
        Value::Text(s) => Some(SortKey::Text(s)),
        Value::None => None,
    }
}

/// Compares two raw property strings of the given kind under a direction.
///
/// This is a total order: missing values are equal to each other and greater
/// than every present value, independent of `dir`.
pub fn compare_raw(kind: PropertyKind, a: &str, b: &str, dir: Dir) -> Ordering {
    match (sort_key(kind, a), sort_key(kind, b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => dir.apply(compare_keys(a, b)),
    }
}

fn compare_keys(a: SortKey<'_>, b: SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Number(a), SortKey::Number(b)) => a.compare(b),
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        // A single kind never yields both; keep the order total anyway.
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

/// Comparator factory keyed by the current [`SortSpec`].
///
/// The engine remembers which properties the view offers as sort keys and the
/// currently selected spec, which persists until changed by the user.
///
/// # Example
///
/// ```
/// use loadout_seeker::{PropertyBag, PropertyId, SortEngine};
///
/// let mut items = vec![
///     PropertyBag::new("a").with(PropertyId::Damage, "7"),
///     PropertyBag::new("b"),
///     PropertyBag::new("c").with(PropertyId::Damage, "12"),
/// ];
///
/// let mut engine = SortEngine::new(vec![PropertyId::Name, PropertyId::Damage]);
/// engine.set_property(PropertyId::Damage);
/// engine.toggle_direction();
/// engine.sort(&mut items);
///
/// let keys: Vec<_> = items.iter().map(|i| i.get(PropertyId::Damage)).collect();
/// assert_eq!(keys, vec![Some("12"), Some("7"), None]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    spec: SortSpec,
    offered: Vec<PropertyId>,
}

impl SortEngine {
    /// Creates an engine offering the given properties.
    ///
    /// The initial sort key is the first offered property, ascending.
    pub fn new(offered: Vec<PropertyId>) -> Self {
        let spec = offered
            .first()
            .map(|p| SortSpec::asc(*p))
            .unwrap_or_default();
        SortEngine { spec, offered }
    }

    /// Replaces the current spec, for example with a persisted preference.
    pub fn with_spec(mut self, spec: SortSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn spec(&self) -> SortSpec {
        self.spec
    }

    pub fn property(&self) -> PropertyId {
        self.spec.property
    }

    pub fn dir(&self) -> Dir {
        self.spec.dir
    }

    /// Properties offered as sort keys, in display order.
    pub fn offered(&self) -> &[PropertyId] {
        &self.offered
    }

    /// Selects the sort property.
    ///
    /// Returns `false` and leaves the spec unchanged if the view offers a list
    /// of sort keys and `property` is not in it. The direction is kept.
    pub fn set_property(&mut self, property: PropertyId) -> bool {
        if !self.offered.is_empty() && !self.offered.contains(&property) {
            tracing::debug!(%property, "ignoring sort property not offered by this view");
            return false;
        }
        self.spec.property = property;
        true
    }

    /// Flips the sort direction.
    pub fn toggle_direction(&mut self) {
        self.spec.dir = self.spec.dir.flipped();
    }

    /// Orders two records under the current spec.
    pub fn ordering<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        let property = self.spec.property;
        let raw_a = a.get_property(property, None);
        let raw_b = b.get_property(property, None);
        compare_raw(property.kind(), &raw_a, &raw_b, self.spec.dir)
    }

    /// Strict-weak "a before b" under the current spec.
    pub fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> bool {
        self.ordering(a, b) == Ordering::Less
    }

    /// Stable-sorts records in place under the current spec.
    ///
    /// Each record's property is read once.
    pub fn sort<R: Record>(&self, items: &mut Vec<R>) {
        let property = self.spec.property;
        let kind = property.kind();
        let dir = self.spec.dir;

        let mut keyed: Vec<(String, R)> = items
            .drain(..)
            .map(|item| (item.get_property(property, None), item))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare_raw(kind, a, b, dir));
        items.extend(keyed.into_iter().map(|(_, item)| item));
    }
}
