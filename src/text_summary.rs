//! Text table builder for CLI output.
//!
//! This module formats the fetched record set as human-readable lines for
//! text mode.

use crate::model::Hurricane;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text table from the fetched record set.
pub(crate) fn build_text_summary(records: &[Hurricane]) -> TextSummary {
    let mut lines = Vec::new();

    if records.is_empty() {
        lines.push("No hurricanes found".to_string());
        return TextSummary { lines };
    }

    lines.push(format!(
        "All hurricanes that have made landfall in Florida since 1900 ({} records)",
        records.len()
    ));

    let name_width = records
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Name".len());
    let date_width = records
        .iter()
        .map(|r| r.date_display().len())
        .max()
        .unwrap_or(0)
        .max("Date".len());

    lines.push(format!(
        "{:<name_width$}  {:>date_width$}  {:>4}",
        "Name", "Date", "Wind"
    ));
    for r in records {
        lines.push(format!(
            "{:<name_width$}  {:>date_width$}  {:>4}",
            r.name,
            r.date_display(),
            r.wind
        ));
    }

    TextSummary { lines }
}
