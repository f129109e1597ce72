//! Explorer CLI application entry point
//!
//! Browse destinations across Uttarakhand from the terminal. The default
//! command opens the interactive browser; the other commands print the same
//! filtered, sorted views for scripting.
//!
//! # Usage
//!
//! ```bash
//! # Interactive browser (default command)
//! explorer
//! explorer browse --view map
//!
//! # Print nature spots ordered by rating
//! explorer list -c Nature --sort rating
//!
//! # Toggle a favorite, then list favorites
//! explorer favorite 12
//! explorer favorites
//!
//! # Use a local export instead of the hosted table
//! explorer --source-file destinations.json list
//!
//! # Clean a raw export and publish it
//! explorer clean raw.csv -o cleaned.json --upload
//! ```
//!
//! # Configuration
//!
//! On first run the explorer prompts for the hosted database, unless the
//! command works offline (`--source-file`, `clean` without `--upload`). Configuration is
//! stored in the user's config directory
//! (`~/.config/uttarakhand-explorer/config.toml` on Linux).

use colored::Colorize;
use explorer::{
    ExplorerError,
    cli::{Cli, Commands, QueryArgs},
    commands,
    config::{ExplorerConfig, first_time_setup},
    logging::{self, LogTarget},
    view::PresentationMode,
};
use std::process::ExitCode;

type Result<T> = std::result::Result<T, ExplorerError>;

fn load_config(cli: &Cli) -> Result<ExplorerConfig> {
    let config = match &cli.config {
        Some(path) => ExplorerConfig::load_from(path)?,
        None => {
            let path = ExplorerConfig::config_path()?;
            ExplorerConfig::load_or_setup_at(&path, cli.needs_endpoint())?
        }
    };
    Ok(match &cli.source_file {
        Some(path) => config.with_source_file(path),
        None => config,
    })
}

async fn run(cli: Cli) -> Result<()> {
    let command = cli.get_command();

    if matches!(command, Commands::Setup) {
        logging::init(cli.verbose, cli.quiet, &LogTarget::Stderr)?;
        let config = first_time_setup()?;
        if !cli.quiet {
            println!("Saved configuration (default sort: {})", config.default_sort.label());
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    let quiet = cli.quiet || config.quiet;

    let target = if matches!(command, Commands::Browse { .. }) {
        LogTarget::File(ExplorerConfig::log_path())
    } else {
        LogTarget::Stderr
    };
    logging::init(cli.verbose, quiet, &target)?;

    match &command {
        Commands::Browse { query, view } => commands::browse(&config, query, *view).await?,
        Commands::List { query, view } => commands::list(&config, query, *view, quiet).await?,
        Commands::Show { id } => commands::show(&config, *id, quiet).await?,
        Commands::Favorite { id } => commands::favorite(&config, *id, quiet).await?,
        Commands::Favorites { sort } => {
            let query = QueryArgs {
                sort: *sort,
                favorites_only: true,
                ..QueryArgs::default()
            };
            commands::list(&config, &query, PresentationMode::Grid, quiet).await?;
        }
        Commands::Categories => commands::categories(&config, quiet).await?,
        Commands::Clean {
            input,
            output,
            upload,
        } => commands::clean(&config, input, output.as_deref(), *upload, quiet).await?,
        Commands::Config(sub) => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => ExplorerConfig::config_path()?,
            };
            commands::config(&config, &path, sub)?;
        }
        Commands::Setup => unreachable!("setup handled before loading config"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
