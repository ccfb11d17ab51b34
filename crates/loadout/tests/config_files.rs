//! Loading views and preferences from disk.

use std::fs;

use loadout::{
    keys, Browser, FilterEngine, Handle, LoadPolicy, LoadoutError, Preferences, Table, ViewConfig,
    ViewMode,
};
use loadout_seeker::{PropertyBag, PropertyId};

const VIEW: &str = r#"{
    "FilterProperty": [
        { "id": "all", "displayName": "All", "alternateDisplayName": "Recent" },
        {
            "id": "weapons",
            "displayName": "Weapons",
            "behavior": "SingleSelect",
            "colorTag": 3,
            "rule": { "property": "category", "operator": "Equals", "value": "weapon" },
            "children": [
                { "id": "swords", "displayName": "Swords",
                  "rule": { "property": "subcategory", "operator": "Contains", "value": "sword" } },
                { "id": "bows", "displayName": "Bows",
                  "rule": { "property": "subcategory", "operator": "==", "value": "bow" } }
            ]
        }
    ],
    "SortProperty": ["name", "damage", "weight"],
    "SearchProperty": ["name", "category"]
}"#;

#[test]
fn view_file_loads_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weapons.json");
    fs::write(&path, VIEW).unwrap();

    let config = ViewConfig::from_path(&path, LoadPolicy::Required).unwrap();
    let filter = FilterEngine::load(&config, LoadPolicy::Required).unwrap();

    let ids: Vec<_> = filter.all_nodes().iter().map(|n| n.id().to_string()).collect();
    assert_eq!(ids, vec!["all", "weapons", "swords", "bows"]);
    assert_eq!(filter.node("weapons").unwrap().color_tag(), Some(3));
    assert_eq!(filter.view_mode(), ViewMode::All);
    assert_eq!(
        config.sort_properties(LoadPolicy::Required).unwrap(),
        vec![PropertyId::Name, PropertyId::Damage, PropertyId::Weight]
    );
}

#[test]
fn saved_view_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weapons.json");

    let config = ViewConfig::from_json(VIEW, LoadPolicy::Required).unwrap();
    let filter = FilterEngine::load(&config, LoadPolicy::Required).unwrap();
    let saved = ViewConfig {
        filter: Some(filter.to_config()),
        ..config.clone()
    };
    fs::write(&path, saved.to_json_pretty().unwrap()).unwrap();

    let reloaded = ViewConfig::from_path(&path, LoadPolicy::Required).unwrap();
    let again = FilterEngine::load(&reloaded, LoadPolicy::Required).unwrap();
    assert_eq!(again.tree(), filter.tree());
    assert_eq!(reloaded.sort, config.sort);
    assert_eq!(reloaded.search, config.search);
}

#[test]
fn missing_view_file_depends_on_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(
        ViewConfig::from_path(&path, LoadPolicy::Required),
        Err(LoadoutError::Io(_))
    ));
    let empty = ViewConfig::from_path(&path, LoadPolicy::AllowEmpty).unwrap();
    let filter = FilterEngine::load(&empty, LoadPolicy::AllowEmpty).unwrap();
    assert!(filter.is_pass_through());
    assert!(filter.all_nodes().is_empty());
}

#[test]
fn unknown_operator_fails_required_load() {
    let bad = VIEW.replace("\"==\"", "\"~=\"");
    let config = ViewConfig::from_json(&bad, LoadPolicy::Required).unwrap();
    assert!(matches!(
        FilterEngine::load(&config, LoadPolicy::Required),
        Err(LoadoutError::Query(_))
    ));
    assert!(FilterEngine::load(&config, LoadPolicy::AllowEmpty)
        .unwrap()
        .all_nodes()
        .is_empty());
}

#[test]
fn preferences_persist_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weapons.prefs.json");

    {
        let mut prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.item_width(), 256);
        prefs.set(keys::ITEM_WIDTH, 320).unwrap();
        prefs.set(keys::LAST_SORT_KEY, "damage").unwrap();
        prefs.set(keys::SHOW_ALTERNATE_ROW, false).unwrap();
    }

    let prefs = Preferences::load(&path).unwrap();
    assert_eq!(prefs.item_width(), 320);
    assert_eq!(prefs.last_sort_key(), "damage");
    assert!(!prefs.show_alternate_row());
    assert_eq!(prefs.item_spacing(), 2);
    assert_eq!(prefs.last_target(), Handle::Kit);
}

#[test]
fn sort_and_search_key_changes_reach_the_preferences_file() {
    let dir = tempfile::tempdir().unwrap();
    let view = dir.path().join("weapons.json");
    let prefs_path = dir.path().join("prefs").join("weapons.json");
    fs::write(&view, VIEW).unwrap();
    let config = ViewConfig::from_path(&view, LoadPolicy::Required).unwrap();

    let mut browser: Browser<PropertyBag> = Browser::new(Preferences::load(&prefs_path).unwrap());
    browser.insert(
        Table::catalog(Vec::new())
            .configure(&config, LoadPolicy::Required)
            .unwrap(),
    );
    assert!(browser.set_sort_property(Handle::Base, PropertyId::Damage).unwrap());
    assert!(browser.set_search_property(Handle::Base, PropertyId::Category).unwrap());
    // Not offered by the view: nothing is written.
    assert!(!browser.set_sort_property(Handle::Base, PropertyId::Value).unwrap());

    let saved = Preferences::load(&prefs_path).unwrap();
    assert_eq!(saved.last_sort_key(), "damage");
    assert_eq!(saved.last_search_key(), "category");

    let mut reopened: Browser<PropertyBag> = Browser::new(saved);
    reopened.insert(
        Table::catalog(Vec::new())
            .configure(&config, LoadPolicy::Required)
            .unwrap(),
    );
    let table = reopened.table(Handle::Base).unwrap();
    assert_eq!(table.sort().property(), PropertyId::Damage);
    assert_eq!(table.search().property(), PropertyId::Category);
}
