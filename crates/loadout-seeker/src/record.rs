//! The record contract.
//!
//! The engine never owns or mutates records. It reads them through the
//! [`Record`] trait, which hosts implement over whatever their data source is.

use std::collections::HashMap;
use std::fmt;

use crate::property::PropertyId;

/// Opaque identity of a record, assigned by the data source.
///
/// Two handles with the same key refer to the same underlying item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(pub String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        RecordKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        RecordKey(s.to_string())
    }
}

/// A read-only item that can be filtered, sorted, and searched.
///
/// # Manual Implementation
///
/// ```
/// use loadout_seeker::{PropertyId, Record, RecordKey};
///
/// struct Sword {
///     form_id: u32,
///     name: String,
///     damage: u16,
/// }
///
/// impl Record for Sword {
///     fn key(&self) -> RecordKey {
///         RecordKey(format!("{:08X}", self.form_id))
///     }
///
///     fn get_property(&self, property: PropertyId, _arg: Option<&str>) -> String {
///         match property {
///             PropertyId::Name => self.name.clone(),
///             PropertyId::Damage => self.damage.to_string(),
///             PropertyId::Category => "weapon".to_string(),
///             _ => String::new(),
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the identity of this record.
    fn key(&self) -> RecordKey;

    /// Returns the value of a property as a string.
    ///
    /// Unsupported properties return an empty string. `arg` carries an
    /// optional property-specific argument supplied by a rule.
    fn get_property(&self, property: PropertyId, arg: Option<&str>) -> String;
}

impl<R: Record + ?Sized> Record for std::rc::Rc<R> {
    fn key(&self) -> RecordKey {
        (**self).key()
    }

    fn get_property(&self, property: PropertyId, arg: Option<&str>) -> String {
        (**self).get_property(property, arg)
    }
}

/// A record backed by a plain property map.
///
/// Useful for hosts that materialize records from serialized data, and in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    key: String,
    values: HashMap<PropertyId, String>,
}

impl PropertyBag {
    pub fn new(key: impl Into<String>) -> Self {
        PropertyBag {
            key: key.into(),
            values: HashMap::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, property: PropertyId, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: PropertyId, value: impl Into<String>) {
        self.values.insert(property, value.into());
    }

    pub fn get(&self, property: PropertyId) -> Option<&str> {
        self.values.get(&property).map(String::as_str)
    }
}

impl Record for PropertyBag {
    fn key(&self) -> RecordKey {
        RecordKey(self.key.clone())
    }

    fn get_property(&self, property: PropertyId, _arg: Option<&str>) -> String {
        self.get(property).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn property_bag_accessor() {
        let bag = PropertyBag::new("0001")
            .with(PropertyId::Name, "Iron Sword")
            .with(PropertyId::Damage, "7");

        assert_eq!(bag.key(), RecordKey::new("0001"));
        assert_eq!(bag.get_property(PropertyId::Name, None), "Iron Sword");
        assert_eq!(bag.get_property(PropertyId::Damage, None), "7");
        assert_eq!(bag.get_property(PropertyId::Weight, None), "");
    }

    #[test]
    fn rc_forwards() {
        let bag = Rc::new(PropertyBag::new("a").with(PropertyId::Name, "Apple"));
        assert_eq!(bag.key().as_str(), "a");
        assert_eq!(Record::get_property(&bag, PropertyId::Name, None), "Apple");
    }
}
