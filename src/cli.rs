//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for the explorer using the
//! `clap` crate, plus helpers that turn parsed flags into view inputs.
//!
//! # Commands
//!
//! - **browse**: Interactive terminal UI (default)
//! - **list**: Print the filtered, sorted destinations as cards or map markers
//! - **show**: Print the detail view of one destination
//! - **favorite**: Toggle a destination's favorite flag
//! - **favorites**: List favorited destinations
//! - **categories**: List the categories present in the dataset
//! - **clean**: Prepare a raw CSV or spreadsheet export for publishing
//! - **setup** / **config**: Manage configuration
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use explorer::cli::{Cli, Commands};
//! use explorer::query::SortKey;
//!
//! let cli = Cli::parse_from(["explorer", "list", "-c", "Nature", "--sort", "rating"]);
//! if let Some(Commands::List { query, .. }) = cli.command {
//!     assert_eq!(query.sort, Some(SortKey::Rating));
//! }
//! ```

use crate::models::DestinationId;
use crate::query::{CategoryFilter, FilterCriteria, SortKey};
use crate::view::PresentationMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Filter and sort flags shared by the listing commands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Case-insensitive text matched against name, district, category and description
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Only show this category ("All" shows every category)
    #[arg(short = 'c', long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Sort order (defaults to the configured sort)
    #[arg(long = "sort", value_enum, value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Only show favorites
    #[arg(short = 'f', long = "favorites-only")]
    pub favorites_only: bool,
}

impl QueryArgs {
    /// Filter criteria described by the flags
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::builder()
            .search(self.search.clone().unwrap_or_default())
            .category(
                self.category
                    .as_deref()
                    .map_or(CategoryFilter::All, CategoryFilter::from),
            )
            .favorites_only(self.favorites_only)
            .build()
    }

    /// Sort key from the flags, else the given default
    #[must_use]
    pub fn sort_or(&self, default: SortKey) -> SortKey {
        self.sort.unwrap_or(default)
    }
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the path of the configuration file
    Path,
}

#[derive(Parser, Debug)]
#[command(name = "explorer")]
#[command(about = "Browse destinations across Uttarakhand", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Load destinations from a local .json or .csv file
    #[arg(long = "source-file", global = true, value_name = "PATH")]
    pub source_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive destination browser (default)
    #[command(visible_alias = "b")]
    Browse {
        #[command(flatten)]
        query: QueryArgs,

        /// Start in this presentation
        #[arg(long = "view", value_enum, default_value_t = PresentationMode::Grid)]
        view: PresentationMode,
    },

    /// List destinations
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Print cards (grid) or coordinates per marker (map)
        #[arg(long = "view", value_enum, default_value_t = PresentationMode::Grid)]
        view: PresentationMode,
    },

    /// Show details of one destination
    Show {
        /// Destination id
        id: DestinationId,
    },

    /// Add or remove a destination from favorites
    #[command(visible_alias = "fav")]
    Favorite {
        /// Destination id
        id: DestinationId,
    },

    /// List favorite destinations
    Favorites {
        /// Sort order (defaults to the configured sort)
        #[arg(long = "sort", value_enum, value_name = "KEY")]
        sort: Option<SortKey>,
    },

    /// List the categories present in the dataset
    Categories,

    /// Clean a raw export into a publishable dataset
    Clean {
        /// Raw export (.csv, .xlsx or .xls)
        input: PathBuf,

        /// Where to write the cleaned dataset (.csv or .json)
        #[arg(short = 'o', long = "output", value_name = "PATH")]
        output: Option<PathBuf>,

        /// Upsert the cleaned records into the configured table
        #[arg(long = "upload")]
        upload: bool,
    },

    /// Run the interactive configuration wizard
    Setup,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Commands {
    /// Whether the command reads from or writes to the hosted table
    #[must_use]
    pub const fn uses_endpoint(&self) -> bool {
        match self {
            Self::Clean { upload, .. } => *upload,
            Self::Setup | Self::Config(_) => false,
            _ => true,
        }
    }
}

impl Cli {
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether first-time setup is worth running before this invocation
    ///
    /// A `--source-file` override makes the hosted endpoint irrelevant.
    #[must_use]
    pub fn needs_endpoint(&self) -> bool {
        self.source_file.is_none() && self.get_command().uses_endpoint()
    }

    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            query: QueryArgs::default(),
            view: PresentationMode::Grid,
        })
    }
}
