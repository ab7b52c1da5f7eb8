//! Metadata and report types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language value used when detection is skipped or fails.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Counts and previews derived from extracted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of characters (Unicode scalar values)
    pub character_count: usize,

    /// Number of whitespace-delimited tokens
    pub word_count: usize,

    /// Number of lines
    pub line_count: usize,

    /// Leading preview, ellipsized when truncated
    pub starts_with: String,

    /// Trailing preview, ellipsized when truncated
    pub ends_with: String,

    /// Detected language code or "Unknown"
    pub language: String,
}

/// Entity categories kept in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// People, including fictional
    Person,
    /// Companies, agencies, institutions
    Org,
    /// Countries, cities, states
    Gpe,
    /// Absolute or relative dates
    Date,
    /// Named events (wars, sports events, conferences)
    Event,
}

impl EntityLabel {
    /// All labels kept in reports.
    pub const ALL: [EntityLabel; 5] = [
        EntityLabel::Person,
        EntityLabel::Org,
        EntityLabel::Gpe,
        EntityLabel::Date,
        EntityLabel::Event,
    ];

    /// Label as written by recognizers.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Date => "DATE",
            EntityLabel::Event => "EVENT",
        }
    }
}

impl FromStr for EntityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("Label not kept: {}", s))
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entity kept in a report.
///
/// Serialized as a `[text, label]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, EntityLabel)", into = "(String, EntityLabel)")]
pub struct NamedEntity {
    /// Entity surface text
    pub text: String,

    /// Entity category
    pub label: EntityLabel,
}

impl NamedEntity {
    /// Create a new named entity.
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

impl From<(String, EntityLabel)> for NamedEntity {
    fn from((text, label): (String, EntityLabel)) -> Self {
        Self { text, label }
    }
}

impl From<NamedEntity> for (String, EntityLabel) {
    fn from(entity: NamedEntity) -> Self {
        (entity.text, entity.label)
    }
}

/// The exported analysis of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Guessed title
    pub title: String,

    /// Counts, previews and language
    pub metadata: Metadata,

    /// Highest scoring sentences, best first
    pub key_sentences: Vec<String>,

    /// Entities with kept labels, in text order
    pub named_entities: Vec<NamedEntity>,

    /// Readable summary
    pub summary: String,

    /// Extraction diagnostics
    pub debug_log: Vec<String>,
}

impl Report {
    /// Distinct entity texts in first-occurrence order.
    pub fn distinct_entity_texts(&self) -> Vec<&str> {
        distinct_texts(&self.named_entities)
    }
}

/// Distinct entity texts in first-occurrence order.
pub fn distinct_texts(entities: &[NamedEntity]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for entity in entities {
        if !seen.contains(&entity.text.as_str()) {
            seen.push(&entity.text);
        }
    }
    seen
}
