//! Metadata derived from extracted text.
//!
//! The [`Summarizer`] computes counts, guesses a title, ranks key sentences,
//! keeps recognized entities and composes a readable summary.
//!
//! # Example
//!
//! ```
//! use docmeta::summarize::{RuleBasedRecognizer, Summarizer, WhatlangDetector};
//!
//! let detector = WhatlangDetector::new();
//! let recognizer = RuleBasedRecognizer::new();
//! let summarizer = Summarizer::new(&detector, &recognizer);
//!
//! let report = summarizer.summarize("QUARTERLY NOTES\nShort body.", Vec::new());
//! assert_eq!(report.title, "QUARTERLY NOTES");
//! ```

mod entities;
mod language;
mod sentences;
mod stats;
mod summary;
mod title;

pub use entities::{filter_entities, EntityRecognizer, RecognizedEntity, RuleBasedRecognizer};
pub use language::{
    detect_language, iso639_1, LanguageDetector, LanguageError, WhatlangDetector,
    LANGUAGE_MIN_CHARS,
};
pub use sentences::{common_words, key_sentences, score_sentence, RankingOptions};
pub use stats::{leading_preview, trailing_preview, TextCounts, PREVIEW_CHARS};
pub use summary::{compose_summary, SummaryParts};
pub use title::{guess_title, is_title, is_upper, TITLE_MAX_WORDS, UNKNOWN_TITLE};

use crate::model::{Metadata, Report, UNKNOWN_LANGUAGE};

/// Summarizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Key sentence ranking
    pub ranking: RankingOptions,
    /// Language detection needs more trimmed characters than this
    pub min_language_chars: usize,
    /// Longest line, in words, considered as a title
    pub title_max_words: usize,
    /// Length of the leading and trailing previews
    pub preview_chars: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            ranking: RankingOptions::default(),
            min_language_chars: LANGUAGE_MIN_CHARS,
            title_max_words: TITLE_MAX_WORDS,
            preview_chars: PREVIEW_CHARS,
        }
    }
}

impl SummaryOptions {
    /// Set the number of key sentences.
    pub fn with_sentence_count(mut self, count: usize) -> Self {
        self.ranking.sentence_count = count;
        self
    }

    /// Set the ranking parameters.
    pub fn with_ranking(mut self, ranking: RankingOptions) -> Self {
        self.ranking = ranking;
        self
    }
}

/// Builds reports from text using borrowed recognizers.
pub struct Summarizer<'a> {
    detector: &'a dyn LanguageDetector,
    recognizer: &'a dyn EntityRecognizer,
    options: SummaryOptions,
}

impl<'a> Summarizer<'a> {
    /// Create a summarizer with default options.
    pub fn new(detector: &'a dyn LanguageDetector, recognizer: &'a dyn EntityRecognizer) -> Self {
        Self {
            detector,
            recognizer,
            options: SummaryOptions::default(),
        }
    }

    /// Set summarizer options.
    pub fn with_options(mut self, options: SummaryOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Language code for the text, or `"Unknown"`.
    pub fn language(&self, text: &str) -> String {
        match detect_language(self.detector, text, self.options.min_language_chars) {
            Ok(code) => code,
            Err(e) => {
                log::debug!("Language detection skipped: {}", e);
                UNKNOWN_LANGUAGE.to_string()
            }
        }
    }

    /// Counts, previews and language of the text.
    pub fn metadata(&self, text: &str) -> Metadata {
        let counts = TextCounts::of(text);
        Metadata {
            character_count: counts.characters,
            word_count: counts.words,
            line_count: counts.lines,
            starts_with: leading_preview(text, self.options.preview_chars),
            ends_with: trailing_preview(text, self.options.preview_chars),
            language: self.language(text),
        }
    }

    /// Build the full report for `text`, carrying the extraction log.
    pub fn summarize(&self, text: &str, debug_log: Vec<String>) -> Report {
        let metadata = self.metadata(text);
        let title = guess_title(text, self.options.title_max_words);
        let key_sentences = key_sentences(text, &self.options.ranking);
        let named_entities = filter_entities(self.recognizer.recognize(text));

        let summary = compose_summary(&SummaryParts {
            title: &title,
            language: &metadata.language,
            word_count: metadata.word_count,
            line_count: metadata.line_count,
            key_sentences: &key_sentences,
            entities: &named_entities,
        });

        log::debug!(
            "Summarized {} characters: {} key sentences, {} entities",
            metadata.character_count,
            key_sentences.len(),
            named_entities.len()
        );

        Report {
            title,
            metadata,
            key_sentences,
            named_entities,
            summary,
            debug_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityLabel;

    struct Fixed;

    impl LanguageDetector for Fixed {
        fn detect(&self, _text: &str) -> Result<String, LanguageError> {
            Ok("en".to_string())
        }
    }

    struct Failing;

    impl LanguageDetector for Failing {
        fn detect(&self, _text: &str) -> Result<String, LanguageError> {
            Err(LanguageError::NoFeatures)
        }
    }

    struct Canned;

    impl EntityRecognizer for Canned {
        fn recognize(&self, _text: &str) -> Vec<RecognizedEntity> {
            vec![
                RecognizedEntity::new("Alice", "PERSON", 0, 5),
                RecognizedEntity::new("10%", "PERCENT", 6, 9),
                RecognizedEntity::new("Acme", "ORG", 10, 14),
            ]
        }
    }

    #[test]
    fn test_short_text_language_unknown() {
        let report = Summarizer::new(&Fixed, &Canned).summarize("tiny note", vec![]);
        assert_eq!(report.metadata.language, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_detector_error_maps_to_unknown() {
        let text = "This text is long enough to be detected by anything.";
        let report = Summarizer::new(&Failing, &Canned).summarize(text, vec![]);
        assert_eq!(report.metadata.language, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_report_fields() {
        let text = "Project Overview\nThe project ships a parser for documents. \
                    It also ships a summarizer for documents.";
        let log = vec!["Page 1: Text extracted natively".to_string()];
        let report = Summarizer::new(&Fixed, &Canned).summarize(text, log.clone());

        assert_eq!(report.title, "Project Overview");
        assert_eq!(report.metadata.language, "en");
        assert_eq!(report.metadata.character_count, text.chars().count());
        assert_eq!(report.metadata.line_count, 2);
        assert_eq!(report.key_sentences.len(), 2);
        assert_eq!(
            report.named_entities.iter().map(|e| e.label).collect::<Vec<_>>(),
            vec![EntityLabel::Person, EntityLabel::Org]
        );
        assert!(report.summary.ends_with("It mentions key entities like: Alice, Acme"));
        assert_eq!(report.debug_log, log);
    }

    #[test]
    fn test_sentence_count_option() {
        let text = "One sentence that is long enough. Two sentence that is long enough. \
                    Three sentence that is long enough.";
        let report = Summarizer::new(&Fixed, &Canned)
            .with_options(SummaryOptions::default().with_sentence_count(1))
            .summarize(text, vec![]);
        assert_eq!(report.key_sentences.len(), 1);
    }
}
