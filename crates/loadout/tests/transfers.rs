//! Drag-and-drop scenarios across linked containers.

use std::cell::RefCell;
use std::rc::Rc;

use loadout::{
    Browser, DropAction, DropOutcome, Handle, KitEntry, KitList, LoadPolicy, Table, ViewConfig,
};
use loadout_seeker::{PropertyBag, PropertyId, Record, RecordKey};

// ============================================================================
// Fixtures
// ============================================================================

type Saved = Rc<RefCell<Vec<Vec<(String, u32)>>>>;

fn record(key: &str, name: &str) -> Rc<PropertyBag> {
    Rc::new(
        PropertyBag::new(key)
            .with(PropertyId::Name, name)
            .with(PropertyId::Category, "Misc"),
    )
}

fn config() -> ViewConfig {
    ViewConfig::from_json(
        r#"{ "FilterProperty": [], "SortProperty": ["name"], "SearchProperty": ["name"] }"#,
        LoadPolicy::Required,
    )
    .unwrap()
}

/// Catalog {A, B, C}; kit starts with {A: 1, C: 1}.
fn setup() -> (Browser<PropertyBag>, Saved, Vec<Rc<PropertyBag>>) {
    let catalog = vec![record("A", "Amulet"), record("B", "Boots"), record("C", "Cloak")];

    let saved: Saved = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&saved);
    let kit = KitList::from_entries(vec![
        KitEntry::new(Rc::clone(&catalog[0]), 1),
        KitEntry::new(Rc::clone(&catalog[2]), 1),
    ])
    .with_saver(move |entries: &[KitEntry<PropertyBag>]| {
        sink.borrow_mut().push(
            entries
                .iter()
                .map(|e| (e.record().key().0, e.quantity()))
                .collect(),
        );
    });

    let mut browser = Browser::default();
    browser.insert(
        Table::catalog(catalog.clone())
            .configure(&config(), LoadPolicy::Required)
            .unwrap(),
    );
    browser.insert(
        Table::kit(kit)
            .configure(&config(), LoadPolicy::Required)
            .unwrap(),
    );
    browser.link(Handle::Base, Handle::Kit).unwrap();
    browser.link(Handle::Kit, Handle::Base).unwrap();
    browser.tick();

    (browser, saved, catalog)
}

fn kit_contents(browser: &Browser<PropertyBag>) -> Vec<(String, u32)> {
    browser
        .table(Handle::Kit)
        .unwrap()
        .kit_list()
        .unwrap()
        .entries()
        .iter()
        .map(|e| (e.record().key().0, e.quantity()))
        .collect()
}

fn id_of(browser: &Browser<PropertyBag>, handle: Handle, key: &str) -> usize {
    browser
        .table(handle)
        .unwrap()
        .stable_id(&RecordKey::new(key))
        .unwrap()
}

// ============================================================================
// Base → Kit
// ============================================================================

#[test]
fn copying_selection_into_kit_bumps_existing_quantity() {
    let (mut browser, saved, _) = setup();

    let a = id_of(&browser, Handle::Base, "A");
    let b = id_of(&browser, Handle::Base, "B");
    let base = browser.table_mut(Handle::Base).unwrap();
    base.select_one(a);
    base.toggle_selected(b);
    let payload = base.begin_drag(a).unwrap();
    assert_eq!(payload.ids, vec![a, b]);

    let outcome = browser.drop_payload(&payload, Handle::Kit);
    assert_eq!(
        outcome,
        DropOutcome::Applied {
            action: DropAction::AddCopy,
            moved: 2,
            stale: 0
        }
    );

    assert_eq!(
        kit_contents(&browser),
        vec![
            ("A".to_string(), 2),
            ("C".to_string(), 1),
            ("B".to_string(), 1)
        ]
    );

    // The catalog itself is untouched.
    let base = browser.table(Handle::Base).unwrap();
    assert_eq!(base.len(), 3);
    let keys: Vec<_> = base.items().iter().map(|item| item.key().0).collect();
    assert_eq!(keys, vec!["A", "B", "C"]);

    // The kit table shows kit quantities and was saved.
    let kit = browser.table(Handle::Kit).unwrap();
    let amulet = kit.item(id_of(&browser, Handle::Kit, "A")).unwrap();
    assert_eq!(amulet.get_property(PropertyId::Quantity, None), "2");
    assert_eq!(saved.borrow().len(), 1);
}

// ============================================================================
// Kit → Base
// ============================================================================

#[test]
fn dropping_kit_item_on_catalog_removes_it_from_kit() {
    let (mut browser, saved, catalog) = setup();

    let c = id_of(&browser, Handle::Kit, "C");
    let payload = browser.table(Handle::Kit).unwrap().begin_drag(c).unwrap();
    let outcome = browser.drop_payload(&payload, Handle::Base);
    assert_eq!(outcome.moved(), 1);

    assert_eq!(kit_contents(&browser), vec![("A".to_string(), 1)]);
    assert_eq!(browser.table(Handle::Kit).unwrap().len(), 1);
    assert_eq!(browser.table(Handle::Base).unwrap().len(), catalog.len());

    // The save persisted the list without C.
    assert_eq!(saved.borrow().last().unwrap(), &vec![("A".to_string(), 1)]);
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn payload_from_before_a_refresh_skips_vanished_items() {
    let (mut browser, _, _) = setup();

    let payload = {
        let kit = browser.table_mut(Handle::Kit).unwrap();
        kit.select_all();
        kit.begin_drag(0).unwrap()
    };
    assert_eq!(payload.ids, vec![0, 1]);

    // The kit shrinks between drag start and drop.
    let kit = browser.table_mut(Handle::Kit).unwrap();
    kit.search_mut().set_input("amulet");
    kit.tick();
    assert_eq!(kit.len(), 1);

    let outcome = browser.drop_payload(&payload, Handle::Base);
    assert_eq!(
        outcome,
        DropOutcome::Applied {
            action: DropAction::RemoveFromOrigin,
            moved: 1,
            stale: 1
        }
    );
    assert_eq!(kit_contents(&browser), vec![("C".to_string(), 1)]);
}

#[test]
fn drop_on_missing_container_is_ignored() {
    let (mut browser, _, _) = setup();
    let payload = browser.table(Handle::Base).unwrap().begin_drag(0).unwrap();
    let outcome = browser.drop_payload(&payload, Handle::Inventory);
    assert!(!outcome.is_applied());
    assert_eq!(kit_contents(&browser).len(), 2);
}

#[test]
fn same_container_drop_is_ignored() {
    let (mut browser, saved, _) = setup();
    browser.link(Handle::Kit, Handle::Kit).unwrap();
    let payload = browser.table(Handle::Kit).unwrap().begin_drag(0).unwrap();
    assert!(!browser.drop_payload(&payload, Handle::Kit).is_applied());
    assert!(saved.borrow().is_empty());
}
