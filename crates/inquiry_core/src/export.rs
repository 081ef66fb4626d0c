use chrono::NaiveDate;

use crate::InquiryRecord;

pub const CSV_HEADER: &str = "Email,Category,Response";

/// Renders results as CSV: every field quoted, inner quotes doubled, rows
/// joined by `\n` without a trailing newline.
pub fn results_to_csv(records: &[InquiryRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in records {
        lines.push(format!(
            "{},{},{}",
            quote_field(&record.email),
            quote_field(&record.category),
            quote_field(&record.response)
        ));
    }
    lines.join("\n")
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("inquiry-results-{}.csv", date.format("%Y-%m-%d"))
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
