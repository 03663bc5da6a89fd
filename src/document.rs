/*!
 * Document handling and paragraph extraction.
 *
 * Reads a UTF-8 text or markdown document and splits it into an ordered
 * sequence of non-empty paragraphs. The check pipeline depends on documents
 * only through this sequence.
 */

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;

/// One unit of source text, identified by position in the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Stable position used for output ordering
    pub index: usize,
    /// The paragraph text, never empty or whitespace-only
    pub text: String,
}

/// Read a document file and extract its paragraphs.
///
/// Returns an error when the file cannot be read or contains no usable
/// paragraphs, since a run without input is meaningless.
pub fn extract_paragraphs_from_file(path: impl AsRef<Path>) -> Result<Vec<Paragraph>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;

    let paragraphs = split_paragraphs(&content);
    if paragraphs.is_empty() {
        return Err(anyhow!(
            "No non-empty paragraphs found in {}",
            path.display()
        ));
    }

    info!(
        "Read document {} with {} paragraphs",
        path.display(),
        paragraphs.len()
    );
    Ok(paragraphs)
}

/// Split raw text into paragraphs on blank lines.
///
/// Consecutive non-blank lines belong to one paragraph and are joined with a
/// single space. Empty and whitespace-only blocks are dropped, so indices are
/// contiguous over the surviving paragraphs.
pub fn split_paragraphs(content: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    let flush = |lines: &mut Vec<&str>, paragraphs: &mut Vec<Paragraph>| {
        if !lines.is_empty() {
            let text = lines.join(" ");
            lines.clear();
            if !text.trim().is_empty() {
                paragraphs.push(Paragraph {
                    index: paragraphs.len(),
                    text,
                });
            }
        }
    };

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut current, &mut paragraphs);
        } else {
            current.push(trimmed);
        }
    }
    flush(&mut current, &mut paragraphs);

    paragraphs
}
