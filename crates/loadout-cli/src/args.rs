use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "loadout")]
#[command(about = "Filter, sort and search item records; manage a kit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// View configuration (FilterProperty, SortProperty, SearchProperty)
    #[arg(long, global = true)]
    pub view: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the records that pass the filters and search, sorted
    #[command(alias = "ls")]
    List {
        /// JSON array of record objects, each with a "key"
        records: PathBuf,

        /// Filter node ids to select, in order
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Search input, e.g. `steel`, `">10"`, `"==Iron Dagger"`, `%^dae`
        #[arg(short, long)]
        search: Option<String>,

        /// Property searched
        #[arg(long)]
        search_property: Option<String>,

        /// Property sorted by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Keys treated as recently used
        #[arg(long)]
        recent: Vec<String>,
    },

    /// Print the filter tree
    Nodes,

    /// Suggest completions for a search input
    Complete {
        /// JSON array of record objects, each with a "key"
        records: PathBuf,

        /// Partial search input
        input: String,

        /// Property completed
        #[arg(long)]
        search_property: Option<String>,
    },

    /// Move records into or out of a kit file
    Kit {
        /// JSON array of record objects, each with a "key"
        records: PathBuf,

        /// Kit file; created if missing
        kit: PathBuf,

        /// Keys to copy from the catalog into the kit
        #[arg(short, long)]
        add: Vec<String>,

        /// Keys to remove from the kit
        #[arg(short, long)]
        remove: Vec<String>,
    },
}
