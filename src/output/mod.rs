//! Output formatting for CLI display
//!
//! This module provides utilities for formatting destinations in the CLI:
//! grid cards, map marker listings, the detail view and notices.

use crate::models::Destination;
use crate::view::{Notice, NoticeLevel};
use colored::Colorize;

/// Marker shown next to favorited destinations
pub const FAVORITE_MARK: &str = "♥";

/// Longest description excerpt shown on a card
const CARD_DESCRIPTION_WIDTH: usize = 72;

/// Shorten text to at most `width` characters, ending with `…` when cut
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Rating with one decimal, e.g. `★ 4.8`
#[must_use]
pub fn rating(value: f64) -> String {
    format!("★ {value:.1}")
}

/// Coordinates as `lat, lon` with four decimals
#[must_use]
pub fn coordinates(dest: &Destination) -> Option<String> {
    dest.coordinates()
        .map(|(lat, lon)| format!("{lat:.4}, {lon:.4}"))
}

fn favorite_suffix(is_favorite: bool) -> String {
    if is_favorite {
        format!(" {}", FAVORITE_MARK.red())
    } else {
        String::new()
    }
}

/// Format a destination as a grid card
///
/// In quiet mode only `id<TAB>name` is printed.
#[must_use]
pub fn card(dest: &Destination, is_favorite: bool, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", dest.id, dest.name);
    }

    let mut lines = vec![format!(
        "  {} {}{}",
        format!("#{}", dest.id).dimmed(),
        dest.name.bold(),
        favorite_suffix(is_favorite)
    )];
    lines.push(format!(
        "    {} · {}  {}",
        dest.district.cyan(),
        dest.category.magenta(),
        rating(dest.rating).yellow()
    ));
    if !dest.description.is_empty() {
        lines.push(format!(
            "    {}",
            truncate(&dest.description, CARD_DESCRIPTION_WIDTH)
        ));
    }
    lines.join("\n")
}

/// Format a destination as one map marker line
#[must_use]
pub fn marker(dest: &Destination, is_favorite: bool, quiet: bool) -> String {
    let location = coordinates(dest);
    if quiet {
        return format!(
            "{}\t{}\t{}",
            dest.id,
            dest.name,
            location.unwrap_or_default()
        );
    }

    let location = location.map_or_else(
        || "(no location)".dimmed().to_string(),
        |l| format!("({l})").green().to_string(),
    );
    format!(
        "  {} {} {}{}",
        "📍".normal(),
        dest.name.bold(),
        location,
        favorite_suffix(is_favorite)
    )
}

/// Format the full detail view of one destination
#[must_use]
pub fn detail(dest: &Destination, is_favorite: bool) -> String {
    let not_set = || "-".dimmed().to_string();

    let mut lines = vec![
        format!("{}{}", dest.name.bold().underline(), favorite_suffix(is_favorite)),
        String::new(),
        format!("  {:<12} {}", "District:".bold(), dest.district),
        format!("  {:<12} {}", "Category:".bold(), dest.category),
        format!("  {:<12} {}", "Rating:".bold(), rating(dest.rating).yellow()),
        format!(
            "  {:<12} {}",
            "Best time:".bold(),
            dest.best_time_to_visit.clone().unwrap_or_else(not_set)
        ),
        format!(
            "  {:<12} {}",
            "Location:".bold(),
            coordinates(dest).unwrap_or_else(not_set)
        ),
    ];
    if let Some(image) = &dest.image {
        lines.push(format!("  {:<12} {}", "Image:".bold(), image));
    }
    if !dest.description.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {}", dest.description));
    }
    lines.join("\n")
}

/// Color a notice by its level
#[must_use]
pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("{} {}", "✓".green().bold(), notice.message.green()),
        NoticeLevel::Error => format!("{} {}", "✗".red().bold(), notice.message.red()),
    }
}

/// Format a category entry, marking the active one
#[must_use]
pub fn category(name: &str, active: bool, quiet: bool) -> String {
    if quiet {
        name.to_string()
    } else if active {
        format!("  {} {}", "•".green(), name.green().bold())
    } else {
        format!("    {name}")
    }
}
