//! Readable report rendering.

use std::fmt::Write;

use crate::model::Report;

/// Render a report as a readable text block.
pub fn to_text(report: &Report) -> String {
    let mut out = String::new();
    let meta = &report.metadata;

    let _ = writeln!(out, "Title: {}", report.title);
    let _ = writeln!(out, "Language: {}", meta.language);
    let _ = writeln!(
        out,
        "Characters: {} | Words: {} | Lines: {}",
        meta.character_count, meta.word_count, meta.line_count
    );
    let _ = writeln!(out, "Starts with: {}", meta.starts_with);
    let _ = writeln!(out, "Ends with: {}", meta.ends_with);

    if !report.key_sentences.is_empty() {
        out.push_str("\nKey sentences:\n");
        for (i, sentence) in report.key_sentences.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, sentence);
        }
    }

    if !report.named_entities.is_empty() {
        out.push_str("\nNamed entities:\n");
        for entity in &report.named_entities {
            let _ = writeln!(out, "  - {} ({})", entity.text, entity.label);
        }
    }

    let _ = writeln!(out, "\nSummary:\n{}", report.summary);

    if !report.debug_log.is_empty() {
        out.push_str("\nDebug log:\n");
        for line in &report.debug_log {
            let _ = writeln!(out, "  {}", line);
        }
    }

    out.trim_end().to_string()
}
