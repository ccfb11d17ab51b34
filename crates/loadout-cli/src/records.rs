//! Record and kit files.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use loadout::KitEntry;
use loadout_seeker::{PropertyBag, PropertyId, Record, RecordKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reads a JSON array of objects into property bags.
///
/// Fields that are not property names are skipped with a warning.
pub fn load_records(path: &Path) -> Result<Vec<Rc<PropertyBag>>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<Map<String, Value>> = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| to_bag(index, &row).map(Rc::new))
        .collect()
}

fn to_bag(index: usize, row: &Map<String, Value>) -> Result<PropertyBag> {
    let key = match row.get("key") {
        Some(Value::Null) | None => bail!("record {index} has no \"key\""),
        Some(value) => scalar(value),
    };
    let mut bag = PropertyBag::new(key);
    for (name, value) in row {
        if name == "key" {
            continue;
        }
        match name.parse::<PropertyId>() {
            Ok(property) => bag.set(property, scalar(value)),
            Err(err) => tracing::warn!(record = index, error = %err, "skipping field"),
        }
    }
    Ok(bag)
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitRow {
    pub key: String,
    pub quantity: u32,
}

/// Reads a kit file, resolving keys against the catalog.
///
/// A missing file is an empty kit. Keys not in the catalog are dropped.
pub fn load_kit(path: &Path, catalog: &[Rc<PropertyBag>]) -> Result<Vec<KitEntry<PropertyBag>>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<KitRow> = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let key = RecordKey::new(row.key);
        match catalog.iter().find(|record| record.key() == key) {
            Some(record) => entries.push(KitEntry::new(Rc::clone(record), row.quantity)),
            None => tracing::warn!(%key, "kit entry not in catalog"),
        }
    }
    Ok(entries)
}

/// Writes kit entries as `[{ "key", "quantity" }]`.
pub fn save_kit(path: &Path, entries: &[KitEntry<PropertyBag>]) -> Result<()> {
    let rows: Vec<KitRow> = entries
        .iter()
        .map(|entry| KitRow {
            key: entry.record().key().0,
            quantity: entry.quantity(),
        })
        .collect();
    fs::write(path, serde_json::to_string_pretty(&rows)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
