//! JSON view configuration.
//!
//! Each logical view is configured by one JSON document with three independent
//! top-level arrays:
//!
//! ```json
//! {
//!   "FilterProperty": [
//!     { "id": "all", "displayName": "All", "alternateDisplayName": "Recent" },
//!     {
//!       "id": "weapons",
//!       "displayName": "Weapons",
//!       "behavior": "MultiSelect",
//!       "rule": { "property": "category", "operator": "Equals", "value": "weapon" },
//!       "children": [
//!         { "id": "heavy", "displayName": "Heavy",
//!           "rule": { "property": "weight", "operator": "GreaterThan", "value": "15" } }
//!       ]
//!     }
//!   ],
//!   "SortProperty": ["name", "weight", "value"],
//!   "SearchProperty": ["name", "category"]
//! }
//! ```
//!
//! Any array may be absent. Whether absence is an error is decided by the
//! [`LoadPolicy`] of the engine that reads the section.

use std::path::Path;

use loadout_seeker::{Op, PropertyId, Rule};
use serde::{Deserialize, Serialize};

use crate::error::{LoadoutError, Result};
use crate::filter::Behavior;

/// Whether a missing or malformed configuration is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadPolicy {
    /// Missing or malformed input fails with a configuration error.
    #[default]
    Required,
    /// Missing or malformed input yields an empty (no-op) configuration.
    AllowEmpty,
}

impl LoadPolicy {
    /// Applies the policy to a load result: under `AllowEmpty` errors are
    /// logged and replaced by the default value.
    pub fn degrade<T: Default>(self, what: &str, result: Result<T>) -> Result<T> {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (LoadPolicy::AllowEmpty, Err(err)) => {
                tracing::warn!(section = what, error = %err, "using empty configuration");
                Ok(T::default())
            }
            (LoadPolicy::Required, Err(err)) => {
                tracing::warn!(section = what, error = %err, "configuration load failed");
                Err(err)
            }
        }
    }
}

/// The per-view configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(
        rename = "FilterProperty",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub filter: Option<Vec<FilterNodeConfig>>,

    #[serde(
        rename = "SortProperty",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sort: Option<Vec<String>>,

    #[serde(
        rename = "SearchProperty",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub search: Option<Vec<String>>,
}

/// One filter node as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterNodeConfig {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<Behavior>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FilterNodeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_tag: Option<i64>,
    /// Display name of the other state of the view toggle node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_display_name: Option<String>,
}

/// A rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Property name. Empty for the identity rule.
    #[serde(default)]
    pub property: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
}

fn default_operator() -> String {
    Op::Equals.as_str().to_string()
}

impl RuleConfig {
    /// Parses the configured names into a [`Rule`].
    pub fn to_rule(&self) -> Result<Rule> {
        let op: Op = self.operator.parse()?;
        if self.property.trim().is_empty() {
            return Ok(Rule {
                op,
                ..Rule::identity()
            });
        }
        let property: PropertyId = self.property.parse()?;
        Ok(Rule {
            property: Some(property),
            op,
            value: self.value.clone(),
            arg: self.arg.clone(),
        })
    }
}

impl From<&Rule> for RuleConfig {
    fn from(rule: &Rule) -> Self {
        RuleConfig {
            property: rule
                .property
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            operator: rule.op.as_str().to_string(),
            value: rule.value.clone(),
            arg: rule.arg.clone(),
        }
    }
}

impl ViewConfig {
    /// Parses a configuration document.
    ///
    /// Blank input counts as missing.
    pub fn from_json(text: &str, policy: LoadPolicy) -> Result<ViewConfig> {
        let parsed = if text.trim().is_empty() {
            Err(LoadoutError::configuration("configuration document is empty"))
        } else {
            serde_json::from_str(text).map_err(LoadoutError::from)
        };
        policy.degrade("document", parsed)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>, policy: LoadPolicy) -> Result<ViewConfig> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => ViewConfig::from_json(&text, policy),
            Err(err) => {
                tracing::debug!(path = %path.display(), "configuration file unreadable");
                policy.degrade("document", Err(err.into()))
            }
        }
    }

    /// Serializes the document, preserving node and property order.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses the `SortProperty` section.
    pub fn sort_properties(&self, policy: LoadPolicy) -> Result<Vec<PropertyId>> {
        policy.degrade(
            "SortProperty",
            parse_properties("SortProperty", self.sort.as_deref()),
        )
    }

    /// Parses the `SearchProperty` section.
    pub fn search_properties(&self, policy: LoadPolicy) -> Result<Vec<PropertyId>> {
        policy.degrade(
            "SearchProperty",
            parse_properties("SearchProperty", self.search.as_deref()),
        )
    }
}

fn parse_properties(section: &str, names: Option<&[String]>) -> Result<Vec<PropertyId>> {
    let names = names.ok_or_else(|| {
        LoadoutError::configuration(format!("missing '{section}' array"))
    })?;
    names
        .iter()
        .map(|name| name.parse::<PropertyId>().map_err(LoadoutError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "FilterProperty": [
            { "id": "weapons", "displayName": "Weapons",
              "rule": { "property": "category", "operator": "Equals", "value": "weapon" } }
        ],
        "SortProperty": ["name", "Weight"],
        "SearchProperty": ["name"]
    }"#;

    #[test]
    fn parses_all_sections() {
        let config = ViewConfig::from_json(DOC, LoadPolicy::Required).unwrap();
        assert_eq!(config.filter.as_ref().unwrap().len(), 1);
        assert_eq!(
            config.sort_properties(LoadPolicy::Required).unwrap(),
            vec![PropertyId::Name, PropertyId::Weight]
        );
        assert_eq!(
            config.search_properties(LoadPolicy::Required).unwrap(),
            vec![PropertyId::Name]
        );
    }

    #[test]
    fn empty_document_depends_on_policy() {
        assert!(matches!(
            ViewConfig::from_json("  ", LoadPolicy::Required),
            Err(LoadoutError::Configuration(_))
        ));
        assert_eq!(
            ViewConfig::from_json("", LoadPolicy::AllowEmpty).unwrap(),
            ViewConfig::default()
        );
    }

    #[test]
    fn malformed_document_depends_on_policy() {
        assert!(matches!(
            ViewConfig::from_json("{ \"FilterProperty\": [", LoadPolicy::Required),
            Err(LoadoutError::Json(_))
        ));
        assert_eq!(
            ViewConfig::from_json("{ nope", LoadPolicy::AllowEmpty).unwrap(),
            ViewConfig::default()
        );
    }

    #[test]
    fn missing_section() {
        let config = ViewConfig::from_json("{}", LoadPolicy::Required).unwrap();
        assert!(config.sort_properties(LoadPolicy::Required).is_err());
        assert!(config
            .sort_properties(LoadPolicy::AllowEmpty)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_property_is_a_configuration_failure() {
        let config = ViewConfig {
            sort: Some(vec!["colour".to_string()]),
            ..ViewConfig::default()
        };
        assert!(matches!(
            config.sort_properties(LoadPolicy::Required),
            Err(LoadoutError::Query(_))
        ));
    }

    #[test]
    fn rule_config_conversion() {
        let config = RuleConfig {
            property: "damage".to_string(),
            operator: ">=".to_string(),
            value: "10".to_string(),
            arg: None,
        };
        let rule = config.to_rule().unwrap();
        assert_eq!(rule, Rule::new(PropertyId::Damage, Op::GreaterOrEqual, "10"));
        assert_eq!(RuleConfig::from(&rule).operator, "GreaterOrEqual");

        let identity: RuleConfig = serde_json::from_str(r#"{ "property": "" }"#).unwrap();
        assert!(identity.to_rule().unwrap().is_identity());
    }

    #[test]
    fn serializes_with_original_keys() {
        let config = ViewConfig::from_json(DOC, LoadPolicy::Required).unwrap();
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"FilterProperty\""));
        assert!(json.contains("\"displayName\": \"Weapons\""));
        assert_eq!(
            ViewConfig::from_json(&json, LoadPolicy::Required).unwrap(),
            config
        );
    }
}
