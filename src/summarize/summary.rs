//! Readable summary composition.

use std::fmt::Write;

use crate::model::{distinct_texts, NamedEntity};

/// Inputs to the summary template.
#[derive(Debug, Clone, Copy)]
pub struct SummaryParts<'a> {
    pub title: &'a str,
    pub language: &'a str,
    pub word_count: usize,
    pub line_count: usize,
    pub key_sentences: &'a [String],
    pub entities: &'a [NamedEntity],
}

/// Compose the summary paragraph.
///
/// Entity texts are listed once each, in order of first mention. The
/// entity sentence is omitted when there are none.
pub fn compose_summary(parts: &SummaryParts<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "This document, titled \"{}\", is written in {}.",
        parts.title, parts.language
    );
    let _ = writeln!(
        out,
        "It contains approximately {} words and spans {} lines.",
        parts.word_count, parts.line_count
    );
    out.push_str("Some important sentences include:\n\n");

    for sentence in parts.key_sentences {
        let _ = writeln!(out, "- {}", sentence);
    }

    let distinct = distinct_texts(parts.entities);
    if !distinct.is_empty() {
        let _ = write!(
            out,
            "\nIt mentions key entities like: {}",
            distinct.join(", ")
        );
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityLabel;

    #[test]
    fn test_summary_with_entities() {
        let sentences = vec!["First key sentence here".to_string()];
        let entities = vec![
            NamedEntity::new("Acme Corp", EntityLabel::Org),
            NamedEntity::new("Paris", EntityLabel::Gpe),
            NamedEntity::new("Acme Corp", EntityLabel::Org),
        ];
        let summary = compose_summary(&SummaryParts {
            title: "Annual Report",
            language: "en",
            word_count: 120,
            line_count: 8,
            key_sentences: &sentences,
            entities: &entities,
        });

        assert_eq!(
            summary,
            "This document, titled \"Annual Report\", is written in en.\n\
             It contains approximately 120 words and spans 8 lines.\n\
             Some important sentences include:\n\n\
             - First key sentence here\n\n\
             It mentions key entities like: Acme Corp, Paris"
        );
    }

    #[test]
    fn test_summary_without_entities_or_sentences() {
        let summary = compose_summary(&SummaryParts {
            title: "Unknown Title",
            language: "Unknown",
            word_count: 2,
            line_count: 1,
            key_sentences: &[],
            entities: &[],
        });

        assert!(summary.ends_with("Some important sentences include:"));
        assert!(!summary.contains("entities"));
    }
}
