//! Named entity recognition and filtering.
//!
//! Recognizers may emit any label; only those in [`EntityLabel`] reach a
//! report.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{EntityLabel, NamedEntity};

/// A span reported by a recognizer, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedEntity {
    pub text: String,
    /// Recognizer label, e.g. `ORG` or `MONEY`
    pub label: String,
    /// Byte offset in the source text.
    pub start: usize,
    pub end: usize,
}

impl RecognizedEntity {
    /// Create a new recognized span.
    pub fn new(text: impl Into<String>, label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start,
            end,
        }
    }
}

/// Finds named entities in text.
pub trait EntityRecognizer {
    /// Entities in text order.
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity>;
}

/// Keep entities whose label is reported, preserving order and duplicates.
pub fn filter_entities(entities: Vec<RecognizedEntity>) -> Vec<NamedEntity> {
    entities
        .into_iter()
        .filter_map(|e| {
            let label = e.label.parse::<EntityLabel>().ok()?;
            Some(NamedEntity::new(e.text, label))
        })
        .collect()
}

// --- Compiled regexes ---

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December";

static EVENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:World War (?:II|I|One|Two)|(?:Summer |Winter )?Olympics|World Cup|Super Bowl|(?:[A-Z][a-z]+ )+(?:Conference|Summit|Festival|Championship|Expo)(?: \d{4})?)\b",
    )
    .unwrap()
});

static ORG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:[A-Z][A-Za-z&]+ )+(?:Inc|Corp|Corporation|Ltd|LLC|Company|Group|University|Institute|Bank|Foundation|Agency|Association|Ministry)\b",
    )
    .unwrap()
});

// Group 1 is the name without the honorific.
static PERSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof|Sir)\.? ([A-Z][a-z]+(?: [A-Z][a-z]+)?)").unwrap()
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:(?:{m}) \d{{1,2}}(?:, \d{{4}})?|\d{{1,2}} (?:{m})(?: \d{{4}})?|(?:{m}) \d{{4}}|\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}/\d{{1,2}}/\d{{2,4}})\b",
        m = MONTHS
    ))
    .unwrap()
});

static MONEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$\x{20AC}\x{00A3}]\s?\d[\d,]*(?:\.\d+)?(?: (?:million|billion|thousand))?")
        .unwrap()
});

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?: ?%| percent)").unwrap()
});

static GPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:United States|United Kingdom|New Delhi|New York|San Francisco|India|China|Japan|Germany|France|Canada|Australia|Brazil|Russia|Italy|Spain|Mexico|London|Paris|Tokyo|Delhi|Mumbai|Berlin|Beijing|California|Texas)\b",
    )
    .unwrap()
});

/// Pattern and gazetteer recognizer that needs no external model.
///
/// Earlier patterns win when spans overlap. Besides the report labels it
/// emits `MONEY` and `PERCENT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedRecognizer;

impl RuleBasedRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        let mut entities = Vec::new();

        add_non_overlapping(&mut entities, text, &EVENT_RE, "EVENT");
        add_non_overlapping(&mut entities, text, &ORG_RE, "ORG");
        add_person_names(&mut entities, text);
        add_non_overlapping(&mut entities, text, &DATE_RE, "DATE");
        add_non_overlapping(&mut entities, text, &MONEY_RE, "MONEY");
        add_non_overlapping(&mut entities, text, &PERCENT_RE, "PERCENT");
        add_non_overlapping(&mut entities, text, &GPE_RE, "GPE");

        entities.sort_by_key(|e| e.start);
        entities
    }
}

fn overlaps(entities: &[RecognizedEntity], start: usize, end: usize) -> bool {
    entities.iter().any(|e| start < e.end && end > e.start)
}

fn add_non_overlapping(entities: &mut Vec<RecognizedEntity>, text: &str, re: &Regex, label: &str) {
    for m in re.find_iter(text) {
        if !overlaps(entities, m.start(), m.end()) {
            entities.push(RecognizedEntity::new(m.as_str(), label, m.start(), m.end()));
        }
    }
}

fn add_person_names(entities: &mut Vec<RecognizedEntity>, text: &str) {
    for caps in PERSON_RE.captures_iter(text) {
        if let Some(name) = caps.get(1) {
            if !overlaps(entities, name.start(), name.end()) {
                entities.push(RecognizedEntity::new(
                    name.as_str(),
                    "PERSON",
                    name.start(),
                    name.end(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(text: &str) -> Vec<(String, String)> {
        RuleBasedRecognizer::new()
            .recognize(text)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    #[test]
    fn recognizes_org_and_date() {
        let found = labelled("Shares of Acme Corp rose on March 3, 2024.");
        assert_eq!(
            found,
            vec![
                ("Acme Corp".to_string(), "ORG".to_string()),
                ("March 3, 2024".to_string(), "DATE".to_string()),
            ]
        );
    }

    #[test]
    fn person_drops_honorific() {
        let found = labelled("The keynote was given by Dr. Jane Smith yesterday.");
        assert_eq!(found, vec![("Jane Smith".to_string(), "PERSON".to_string())]);
    }

    #[test]
    fn recognizes_places_and_events() {
        let found = labelled("India hosted the World Cup in Mumbai.");
        let labels: Vec<&str> = found.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["GPE", "EVENT", "GPE"]);
    }

    #[test]
    fn emits_money_and_percent() {
        let found = labelled("Revenue reached $5 million, a 12% rise.");
        assert_eq!(
            found,
            vec![
                ("$5 million".to_string(), "MONEY".to_string()),
                ("12%".to_string(), "PERCENT".to_string()),
            ]
        );
    }

    #[test]
    fn iso_date() {
        let found = labelled("Filed on 2023-11-05 by the clerk.");
        assert_eq!(found, vec![("2023-11-05".to_string(), "DATE".to_string())]);
    }

    #[test]
    fn filter_drops_unknown_labels() {
        let raw = vec![
            RecognizedEntity::new("Acme Corp", "ORG", 0, 9),
            RecognizedEntity::new("$5", "MONEY", 10, 12),
            RecognizedEntity::new("Acme Corp", "ORG", 20, 29),
            RecognizedEntity::new("Paris", "LOC", 30, 35),
            RecognizedEntity::new("Monday", "DATE", 36, 42),
        ];
        let kept = filter_entities(raw);
        assert_eq!(
            kept,
            vec![
                NamedEntity::new("Acme Corp", EntityLabel::Org),
                NamedEntity::new("Acme Corp", EntityLabel::Org),
                NamedEntity::new("Monday", EntityLabel::Date),
            ]
        );
    }

    #[test]
    fn filter_is_case_sensitive() {
        let kept = filter_entities(vec![RecognizedEntity::new("Bob", "person", 0, 3)]);
        assert!(kept.is_empty());
    }
}
