//! Statistics and analysis presentation.

use super::shared::{bounded_list, format_bytes, format_section_heading};
use crate::analysis::ProjectAnalysis;
use crate::store::ConfigStats;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

const LIST_LIMIT: usize = 10;

pub fn format_stats_text(stats: &ConfigStats) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Projects".to_string(), stats.total_projects.to_string()]);
    table.add_row(vec!["History entries".to_string(), stats.total_history_entries.to_string()]);
    table.add_row(vec!["MCP servers".to_string(), stats.total_mcp_servers.to_string()]);
    table.add_row(vec!["Document size".to_string(), format_bytes(stats.config_size)]);
    table.add_row(vec!["Startups".to_string(), stats.num_startups.to_string()]);
    let optional = [
        ("First start", &stats.first_start_time),
        ("Account", &stats.user_email),
        ("Organization", &stats.organization),
    ];
    for (label, value) in optional {
        table.add_row(vec![
            label.to_string(),
            value.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    format!("{}\n\n{}", format_section_heading("Statistics"), table)
}

pub fn format_analysis_text(report: &ProjectAnalysis) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Project analysis"));

    if !report.missing_directories.is_empty() {
        out.push_str(&format!(
            "Missing directories ({}):\n{}\n",
            report.missing_directories.len(),
            bounded_list(&report.missing_directories, LIST_LIMIT)
        ));
    }
    if !report.unused.is_empty() {
        out.push_str(&format!(
            "Unused projects, no history ({}):\n{}\n",
            report.unused.len(),
            bounded_list(&report.unused, LIST_LIMIT)
        ));
    }
    if !report.large_history.is_empty() {
        let lines: Vec<String> = report
            .large_history
            .iter()
            .map(|l| format!("{} ({} entries)", l.path, l.history_count))
            .collect();
        out.push_str(&format!(
            "Large history, over {} entries ({}):\n{}\n",
            report.large_history_threshold,
            lines.len(),
            bounded_list(&lines, LIST_LIMIT)
        ));
    }
    if !report.untrusted.is_empty() {
        out.push_str(&format!(
            "Trust not accepted ({}):\n{}\n",
            report.untrusted.len(),
            bounded_list(&report.untrusted, LIST_LIMIT)
        ));
    }
    if report.is_healthy() {
        out.push_str("No issues found.\n\n");
    }

    out.push_str(&format!(
        "Total: {} project(s), {} history entries, ~{}",
        report.total_projects,
        report.total_history_entries,
        format_bytes(report.estimated_bytes as u64)
    ));
    out
}
