//! Shared presentation helpers.

use owo_colors::OwoColorize;

/// Bold, underlined section title.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Human-readable byte count: `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Up to `limit` lines of `items`, then a "... and N more" line.
pub fn bounded_list(items: &[String], limit: usize) -> String {
    let mut out = String::new();
    for item in items.iter().take(limit) {
        out.push_str(&format!("  - {}\n", item));
    }
    if items.len() > limit {
        out.push_str(&format!("  ... and {} more\n", items.len() - limit));
    }
    out
}
