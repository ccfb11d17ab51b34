//! Seeker - typed record properties, rules, sorting, and search for the loadout browser.
//!
//! Records are opaque, read-only property bags that hand out every value as a
//! string. This crate interprets those strings by property kind and provides
//! the three record-level engines the browser is built on:
//!
//! - [`Rule`]: a single property/operator/value predicate, used by filter nodes
//! - [`SortEngine`]: a type-aware comparator where empty values always sink last
//! - [`SearchQuery`] and [`SearchBox`]: an operator-based query language with
//!   autocomplete navigation
//!
//! # Quick Start
//!
//! ```rust
//! use loadout_seeker::{Op, PropertyBag, PropertyId, Rule, SearchBox, SortEngine};
//!
//! let mut items = vec![
//!     PropertyBag::new("1").with(PropertyId::Name, "Iron Sword").with(PropertyId::Damage, "7"),
//!     PropertyBag::new("2").with(PropertyId::Name, "Steel Sword").with(PropertyId::Damage, "11"),
//!     PropertyBag::new("3").with(PropertyId::Name, "Steel Plate"),
//! ];
//!
//! let rule = Rule::new(PropertyId::Name, Op::Contains, "sword");
//! let mut search = SearchBox::new(vec![PropertyId::Name]);
//! search.set_input("steel");
//!
//! items.retain(|item| rule.matches(item) && search.matches(item));
//!
//! let mut sort = SortEngine::new(vec![PropertyId::Damage]);
//! sort.toggle_direction();
//! sort.sort(&mut items);
//!
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].get(PropertyId::Name), Some("Steel Sword"));
//! ```
//!
//! # Value Kinds
//!
//! | Kind | Reading | Examples |
//! |------|---------|----------|
//! | Bool | `"true"` / `"false"` as 1 / 0 | `equipped`, `stolen` |
//! | Integer | whole number | `damage`, `value` |
//! | Float | decimal number | `weight`, `speed` |
//! | Text | case-sensitive string order | `name`, `category` |
//!
//! An empty string means the record does not support the property. It never
//! matches a non-empty rule or query and always sorts last.

mod error;
mod op;
mod property;
mod record;
mod rule;
mod search;
mod search_box;
mod sort;
mod value;

// Re-export public API
pub use error::{Result, SeekerError};
pub use op::Op;
pub use property::{PropertyId, PropertyKind};
pub use record::{PropertyBag, Record, RecordKey};
pub use rule::Rule;
pub use search::{operand, operator_prefix, SearchQuery};
pub use search_box::{rank_candidates, SearchBox, SearchKey};
pub use sort::{compare_raw, Dir, SortEngine, SortSpec};
pub use value::{parse_bool, Number, Value};
