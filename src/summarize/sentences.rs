//! Key sentence ranking.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Ranking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    /// Sentences returned
    pub sentence_count: usize,
    /// Candidates must be longer than this many characters after trimming
    pub min_sentence_chars: usize,
    /// Size of the frequent-word vocabulary
    pub common_words: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            sentence_count: 5,
            min_sentence_chars: 20,
            common_words: 50,
        }
    }
}

/// The `limit` most frequent case-folded words.
///
/// Words with equal counts keep the order of their first occurrence.
pub fn common_words(text: &str, limit: usize) -> HashSet<String> {
    let lowered = text.to_lowercase();

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, m) in WORD_RE.find_iter(&lowered).enumerate() {
        counts.entry(m.as_str()).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Number of words in `sentence` that belong to `common`.
pub fn score_sentence(sentence: &str, common: &HashSet<String>) -> usize {
    let lowered = sentence.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .filter(|m| common.contains(m.as_str()))
        .count()
}

/// Rank period-delimited sentences by their count of frequent words.
///
/// Sentences with equal scores keep their original order.
pub fn key_sentences(text: &str, options: &RankingOptions) -> Vec<String> {
    let candidates: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > options.min_sentence_chars)
        .collect();

    if candidates.is_empty() {
        return Vec::new();
    }

    let common = common_words(text, options.common_words);

    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .map(|sentence| (score_sentence(sentence, &common), sentence))
        .collect();
    // sort_by is stable: ties stay in document order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(options.sentence_count)
        .map(|(_, sentence)| sentence.to_string())
        .collect()
}
