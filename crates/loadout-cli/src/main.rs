use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use loadout::{
    Browser, DragPayload, FilterEngine, FilterNode, Handle, KitList, LoadPolicy, Table, ViewConfig,
    ViewContext,
};
use loadout_seeker::{PropertyBag, PropertyId, Record, RecordKey};
use tracing_subscriber::EnvFilter;

mod args;
mod records;

use args::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.view {
        Some(path) => ViewConfig::from_path(path, LoadPolicy::Required)
            .with_context(|| format!("loading view {}", path.display()))?,
        None => ViewConfig::default(),
    };
    let policy = if cli.view.is_some() {
        LoadPolicy::Required
    } else {
        LoadPolicy::AllowEmpty
    };
    let ctx = ViewContext::new().with_translator(column_label);

    match cli.command {
        Commands::List {
            records,
            filters,
            search,
            search_property,
            sort,
            desc,
            recent,
        } => {
            let catalog = records::load_records(&records)?;
            let mut table = Table::catalog(catalog).configure(&config, policy)?;
            if !recent.is_empty() {
                table = table.with_recent(move || {
                    recent.iter().map(|key| RecordKey::new(key.as_str())).collect()
                });
            }
            for id in &filters {
                table.activate_filter(id, true)?;
            }
            if let Some(name) = sort {
                let property: PropertyId = name.parse()?;
                if !table.set_sort_property(property) {
                    anyhow::bail!("view does not offer sorting by {property}");
                }
            }
            if desc {
                table.toggle_sort_direction();
            }
            if let Some(name) = search_property {
                let property: PropertyId = name.parse()?;
                if !table.set_search_property(property) {
                    anyhow::bail!("view does not offer searching by {property}");
                }
            }
            if let Some(input) = search {
                table.search_mut().set_input(input);
                table.search_mut().commit();
            }
            table.tick();
            print_table(&table, &ctx);
        }
        Commands::Nodes => {
            let filter = FilterEngine::load(&config, policy)?;
            for node in filter.all_nodes() {
                print_node(&filter, node, &ctx);
            }
        }
        Commands::Complete {
            records,
            input,
            search_property,
        } => {
            let catalog = records::load_records(&records)?;
            let mut table = Table::catalog(catalog).configure(&config, policy)?;
            if let Some(name) = search_property {
                table.set_search_property(name.parse()?);
            }
            table.tick();
            let property = table.search().property();
            let candidates: Vec<String> = table
                .items()
                .iter()
                .map(|item| item.get_property(property, None))
                .collect();
            let search = table.search_mut();
            search.set_input(input);
            for suggestion in search.autocomplete(&candidates) {
                println!("{suggestion}");
            }
        }
        Commands::Kit {
            records,
            kit,
            add,
            remove,
        } => run_kit(&records, &kit, &add, &remove, &ctx)?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `property.weight` → `WEIGHT`; `filter.all` → `ALL`.
fn column_label(key: &str) -> String {
    key.rsplit('.').next().unwrap_or(key).to_uppercase()
}

fn columns(table: &Table<PropertyBag>) -> Vec<PropertyId> {
    let mut columns = vec![PropertyId::Name];
    for property in table.sort().offered().iter().chain(table.search().offered()) {
        if !columns.contains(property) {
            columns.push(*property);
        }
    }
    columns
}

fn print_table(table: &Table<PropertyBag>, ctx: &ViewContext) {
    let columns = columns(table);
    let header: Vec<String> = columns.iter().map(|p| ctx.property_label(*p)).collect();
    println!("{:>4}  {:<10}  {}", "ID", "KEY", header.join("\t"));
    for (id, item) in table.items().iter().enumerate() {
        let values: Vec<String> = columns
            .iter()
            .map(|property| item.get_property(*property, None))
            .collect();
        println!("{id:>4}  {:<10}  {}", item.key().as_str(), values.join("\t"));
    }
    println!(
        "{} items, sorted by {} {}",
        table.len(),
        table.sort().property(),
        table.sort().dir()
    );
}

fn print_node(filter: &FilterEngine, node: &FilterNode, ctx: &ViewContext) {
    let depth = filter.tree().ancestors(node_id(filter, node)).len();
    let marker = if node.is_selected() { "*" } else { " " };
    let rule = node
        .rule()
        .filter(|rule| !rule.is_identity())
        .map(|rule| {
            let property = rule.property.map(PropertyId::as_str).unwrap_or_default();
            format!("  [{property} {} {:?}]", rule.op, rule.value)
        })
        .unwrap_or_default();
    println!(
        "{marker} {}{} ({}){rule}",
        "  ".repeat(depth),
        filter.display_name(node, ctx),
        node.id()
    );
}

fn node_id(filter: &FilterEngine, node: &FilterNode) -> loadout::NodeId {
    filter.tree().find(node.id()).unwrap_or(loadout::FilterTree::ROOT)
}

fn run_kit(
    records_path: &Path,
    kit_path: &Path,
    add: &[String],
    remove: &[String],
    ctx: &ViewContext,
) -> Result<()> {
    let catalog = records::load_records(records_path)?;
    let entries = records::load_kit(kit_path, &catalog)?;

    let save_path = kit_path.to_path_buf();
    let kit = KitList::from_entries(entries).with_saver(move |entries| {
        if let Err(err) = records::save_kit(&save_path, entries) {
            tracing::warn!(error = %err, "failed to save kit");
        }
    });

    let mut browser = Browser::default();
    browser.insert(Table::catalog(catalog));
    browser.insert(Table::kit(kit));
    browser.link(Handle::Base, Handle::Kit)?;
    browser.link(Handle::Kit, Handle::Base)?;
    browser.tick();

    transfer(&mut browser, Handle::Base, Handle::Kit, add);
    transfer(&mut browser, Handle::Kit, Handle::Base, remove);

    let Some(kit) = browser.table(Handle::Kit) else {
        return Ok(());
    };
    println!(
        "{:>4}  {:<10}  {:<24}  QTY",
        "ID",
        "KEY",
        ctx.property_label(PropertyId::Name)
    );
    for (id, item) in kit.items().iter().enumerate() {
        println!(
            "{id:>4}  {:<10}  {:<24}  {}",
            item.key().as_str(),
            item.get_property(PropertyId::Name, None),
            item.quantity().unwrap_or(1)
        );
    }
    Ok(())
}

/// Drops the records named by `keys` from the `from` table onto `to`.
fn transfer(browser: &mut Browser<PropertyBag>, from: Handle, to: Handle, keys: &[String]) {
    let Some(payload) = browser.table(from).and_then(|table| payload_for(table, keys)) else {
        return;
    };
    let outcome = browser.drop_payload(&payload, to);
    tracing::info!(?outcome, %from, %to, "transfer");
}

/// A payload carrying each named record once, in display order.
fn payload_for(table: &Table<PropertyBag>, keys: &[String]) -> Option<DragPayload> {
    let mut ids = BTreeSet::new();
    for key in keys {
        match table.stable_id(&RecordKey::new(key.as_str())) {
            Some(id) => {
                ids.insert(id);
            }
            None => tracing::warn!(key = key.as_str(), table = %table.handle(), "no such record"),
        }
    }
    if ids.is_empty() {
        return None;
    }
    Some(DragPayload {
        ids: ids.into_iter().collect(),
        origin: table.handle(),
    })
}
