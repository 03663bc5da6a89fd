/*!
 * Tabular report writing.
 *
 * Emits the finalized rows as a CSV file: one row per input paragraph, with
 * the original text, the grammar-check result, and one column per
 * supplementary check named by its requirement text. Failure markers appear
 * in cells whose checks could not be completed.
 */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::pipeline::ResultRow;

/// Derive the default output path from the input document path
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    input.with_file_name(format!("{}_grammar_check.csv", stem))
}

/// Write rows as CSV to the given path.
///
/// The supplementary columns come from the configured check list, not from
/// the rows, so a partial run still gets a full header.
pub fn write_csv_report(
    path: &Path,
    rows: &[ResultRow],
    supplementary_names: &[String],
) -> Result<()> {
    let content = render_csv(rows, supplementary_names);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    info!("Report written to {} ({} rows)", path.display(), rows.len());
    Ok(())
}

/// Render rows into CSV text with RFC 4180 quoting
pub fn render_csv(rows: &[ResultRow], supplementary_names: &[String]) -> String {
    let mut out = String::new();

    let mut header = vec!["paragraph".to_string(), "original_text".to_string()];
    header.push("grammar_check".to_string());
    header.extend(supplementary_names.iter().cloned());
    push_record(&mut out, &header);

    for row in rows {
        let mut record = vec![
            row.paragraph_index.to_string(),
            row.original_text.clone(),
            row.grammar.render(),
        ];
        for name in supplementary_names {
            let cell = row
                .supplementary
                .iter()
                .find(|(check_name, _)| check_name == name)
                .map(|(_, outcome)| outcome.render())
                .unwrap_or_default();
            record.push(cell);
        }
        push_record(&mut out, &record);
    }

    out
}

fn push_record(out: &mut String, fields: &[String]) {
    let line = fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
