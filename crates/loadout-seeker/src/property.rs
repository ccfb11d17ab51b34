//! The closed set of record properties.
//!
//! Every queryable, sortable, or filterable attribute of a record is named by a
//! [`PropertyId`]. Each property has a [`PropertyKind`] that decides how its
//! string value is interpreted when comparing.

use std::str::FromStr;

use crate::error::SeekerError;

/// Semantic kind of a property value.
///
/// Records always hand out strings; the kind tells the engine how to read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Serialized as `"true"` / `"false"`, compared as 1 / 0.
    Bool,
    /// Whole numbers.
    Integer,
    /// Decimal numbers.
    Float,
    /// Identifiers, names, categories. Compared as strings.
    Text,
}

impl PropertyKind {
    /// Returns `true` for kinds compared numerically.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            PropertyKind::Bool | PropertyKind::Integer | PropertyKind::Float
        )
    }
}

/// Identifies one attribute of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyId {
    Id,
    Name,
    Category,
    Subcategory,
    Description,
    Source,
    Weight,
    Value,
    Damage,
    Armor,
    Speed,
    Quantity,
    Level,
    Charge,
    Stackable,
    Equipped,
    Favorite,
    Stolen,
    Quest,
}

impl PropertyId {
    /// Every property, in declaration order.
    pub const ALL: &'static [PropertyId] = &[
        PropertyId::Id,
        PropertyId::Name,
        PropertyId::Category,
        PropertyId::Subcategory,
        PropertyId::Description,
        PropertyId::Source,
        PropertyId::Weight,
        PropertyId::Value,
        PropertyId::Damage,
        PropertyId::Armor,
        PropertyId::Speed,
        PropertyId::Quantity,
        PropertyId::Level,
        PropertyId::Charge,
        PropertyId::Stackable,
        PropertyId::Equipped,
        PropertyId::Favorite,
        PropertyId::Stolen,
        PropertyId::Quest,
    ];

    /// Returns the semantic kind of this property.
    pub fn kind(self) -> PropertyKind {
        match self {
            PropertyId::Id
            | PropertyId::Name
            | PropertyId::Category
            | PropertyId::Subcategory
            | PropertyId::Description
            | PropertyId::Source => PropertyKind::Text,
            PropertyId::Value
            | PropertyId::Damage
            | PropertyId::Armor
            | PropertyId::Quantity
            | PropertyId::Level => PropertyKind::Integer,
            PropertyId::Weight | PropertyId::Speed | PropertyId::Charge => PropertyKind::Float,
            PropertyId::Stackable
            | PropertyId::Equipped
            | PropertyId::Favorite
            | PropertyId::Stolen
            | PropertyId::Quest => PropertyKind::Bool,
        }
    }

    /// Returns the configuration name of this property.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyId::Id => "id",
            PropertyId::Name => "name",
            PropertyId::Category => "category",
            PropertyId::Subcategory => "subcategory",
            PropertyId::Description => "description",
            PropertyId::Source => "source",
            PropertyId::Weight => "weight",
            PropertyId::Value => "value",
            PropertyId::Damage => "damage",
            PropertyId::Armor => "armor",
            PropertyId::Speed => "speed",
            PropertyId::Quantity => "quantity",
            PropertyId::Level => "level",
            PropertyId::Charge => "charge",
            PropertyId::Stackable => "stackable",
            PropertyId::Equipped => "equipped",
            PropertyId::Favorite => "favorite",
            PropertyId::Stolen => "stolen",
            PropertyId::Quest => "quest",
        }
    }

    /// Translation key for the property's column or menu label.
    pub fn label_key(self) -> String {
        format!("property.{}", self.as_str())
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PropertyId {
    type Err = SeekerError;

    /// Parses a property name. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PropertyId::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SeekerError::UnknownProperty(s.to_string()))
    }
}
