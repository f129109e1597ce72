//! Diagnostic logging
//!
//! Installs a `tracing` subscriber with a compact symbol-prefixed format:
//!
//! ```text
//! [+] Loaded destinations source=file data.json count=42
//! [*] Ignoring unreadable favorites key=uttarakhand-favorites
//! ```
//!
//! `RUST_LOG` wins when set; otherwise the level follows `-q` / `-v`.

use colored::{ColoredString, Colorize};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, MakeWriter};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::registry::LookupSpan;

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to a file; used while the terminal UI owns the screen
    File(PathBuf),
}

/// Event formatter printing a level symbol followed by the fields
pub struct ExplorerFormatter;

impl<S, N> FormatEvent<S, N> for ExplorerFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        if writer.has_ansi_escapes() {
            write!(writer, "{} ", color_func(symbol.into()))?;
        } else {
            write!(writer, "{symbol} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Filter directive for the given flags
///
/// Dependencies stay at `warn`; only this crate gets louder with `-v`.
#[must_use]
pub fn directive(verbosity: u8, quiet: bool) -> String {
    if quiet {
        return "error".to_string();
    }
    let level = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,explorer={level}")
}

/// Subscriber writing formatted events to `writer`
///
/// `ansi` must be chosen before the custom formatter is attached.
fn subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .event_format(ExplorerFormatter)
        .with_writer(writer)
        .finish()
}

/// Install the global subscriber
///
/// Does nothing if a subscriber is already installed.
///
/// # Errors
///
/// Returns `io::Error` if the log file or its directory cannot be created.
pub fn init(verbosity: u8, quiet: bool, target: &LogTarget) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbosity, quiet)));

    let result = match target {
        LogTarget::Stderr => subscriber(filter, io::stderr, true).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            subscriber(filter, Mutex::new(file), false).try_init()
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Keeping existing subscriber");
    }
    Ok(())
}
