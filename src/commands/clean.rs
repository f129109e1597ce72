//! Clean command - prepare a raw export and optionally publish it

use crate::config::ExplorerConfig;
use crate::dataset::RestSource;
use crate::dataset::clean::{Cleaner, write_report};
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the clean command
///
/// Without `--output` or `--upload` the cleaned dataset is printed as JSON.
///
/// # Errors
///
/// Returns `ExplorerError` if the input cannot be cleaned, the output cannot
/// be written, or the upload fails.
pub async fn execute(
    config: &ExplorerConfig,
    input: &Path,
    output: Option<&Path>,
    upload: bool,
    quiet: bool,
) -> Result<()> {
    let report = Cleaner::new()?.clean_file(input)?;

    if !quiet {
        eprintln!(
            "Cleaned {} of {} rows from {}",
            report.cleaned_rows().to_string().green(),
            report.original_rows,
            input.display()
        );
        match report.median_rating {
            Some(median) => eprintln!("Missing ratings filled with median {median:.2}"),
            None => eprintln!("{}", "No valid ratings; missing ratings set to 0".yellow()),
        }
    }

    if let Some(path) = output {
        write_report(&report, path)?;
        if !quiet {
            eprintln!("Wrote {}", path.display());
        }
    }

    if upload {
        let source = RestSource::new(&config.source.rest_config()?)?;
        let count = source.upsert(&report.records).await?;
        if !quiet {
            eprintln!("Uploaded {count} records to {}", source.endpoint());
        }
    }

    if output.is_none() && !upload {
        let json = serde_json::to_string_pretty(&report.destinations())
            .map_err(crate::dataset::CleanError::from)?;
        println!("{json}");
    }
    Ok(())
}
