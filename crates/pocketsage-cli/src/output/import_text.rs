use pocketsage_core::import::ImportOutcome;

use super::format::key_value_rows;

pub fn render_import(outcome: &ImportOutcome) -> String {
    let mut lines = Vec::new();

    if outcome.dry_run {
        lines.push("Validation passed. No rows were written.".to_string());
    } else {
        lines.push("Import committed.".to_string());
    }
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(key_value_rows(
        &[
            ("Rows parsed", outcome.rows_parsed.to_string()),
            ("Inserted", outcome.inserted.to_string()),
            ("Skipped", outcome.skipped.to_string()),
        ],
        2,
    ));

    if !outcome.issues.is_empty() {
        lines.push(String::new());
        lines.push("Issues:".to_string());
        for issue in &outcome.issues {
            lines.push(format!("  - {issue}"));
        }
    }

    lines.push(String::new());
    if outcome.dry_run {
        lines.push("Next: rerun without --dry-run to commit the import.".to_string());
    } else {
        lines.push("Next: try `pocketsage summary` or `pocketsage ask \"what did I spend last month?\"`.".to_string());
    }

    lines.join("\n")
}
