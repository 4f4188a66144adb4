//! Backup presentation.

use super::shared::{format_bytes, format_section_heading};
use crate::backup::BackupInfo;
use crate::cli::output::to_pretty_json;
use crate::error::ApiError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_backup_list_text(backups: &[BackupInfo]) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Backups"));
    if backups.is_empty() {
        out.push_str("No backups found.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Created (UTC)", "Size"]);
    for backup in backups {
        let created = backup
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![backup.name.clone(), created, format_bytes(backup.size)]);
    }
    out.push_str(&format!("{}\n\nTotal: {} backup(s)", table, backups.len()));
    out
}

pub fn format_backup_list_json(backups: &[BackupInfo]) -> Result<String, ApiError> {
    to_pretty_json(backups)
}
