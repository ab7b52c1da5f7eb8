//! Language detection.

use thiserror::Error;

/// Text must be longer than this (trimmed, in characters) to be detected.
pub const LANGUAGE_MIN_CHARS: usize = 20;

/// Reasons a language could not be reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// Too little text to attempt detection.
    #[error("text too short for language detection ({0} characters)")]
    TooShort(usize),

    /// The detector found no usable features.
    #[error("no features in text")]
    NoFeatures,

    /// The detector's best guess was below its confidence bar.
    #[error("detection not reliable (best guess: {0})")]
    Unreliable(String),
}

/// Identifies the language of a text.
pub trait LanguageDetector {
    /// Return a language code for the text.
    fn detect(&self, text: &str) -> Result<String, LanguageError>;
}

/// [`LanguageDetector`] backed by `whatlang`.
///
/// Reports two-letter ISO 639-1 codes (`en`, `hi`); languages without one
/// keep whatlang's three-letter code.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector {
    require_reliable: bool,
}

impl WhatlangDetector {
    /// Create a detector that reports its best guess.
    pub const fn new() -> Self {
        Self {
            require_reliable: false,
        }
    }

    /// Reject guesses whatlang does not consider reliable.
    pub fn reliable_only(mut self) -> Self {
        self.require_reliable = true;
        self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String, LanguageError> {
        let info = whatlang::detect(text).ok_or(LanguageError::NoFeatures)?;
        let code = iso639_1(info.lang().code()).to_string();

        if self.require_reliable && !info.is_reliable() {
            return Err(LanguageError::Unreliable(code));
        }

        Ok(code)
    }
}

/// Map an ISO 639-3 code to its ISO 639-1 equivalent, if there is one.
pub fn iso639_1(code: &str) -> &str {
    match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        other => other,
    }
}

/// Detect the language of `text` when it is long enough.
pub fn detect_language(
    detector: &dyn LanguageDetector,
    text: &str,
    min_chars: usize,
) -> Result<String, LanguageError> {
    let length = text.trim().chars().count();
    if length <= min_chars {
        return Err(LanguageError::TooShort(length));
    }
    detector.detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(&'static str);

    impl LanguageDetector for Always {
        fn detect(&self, _text: &str) -> Result<String, LanguageError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_short_text_is_not_detected() {
        let result = detect_language(&Always("en"), "   twenty characters   ", 20);
        assert_eq!(result, Err(LanguageError::TooShort(17)));
    }

    #[test]
    fn test_boundary_is_strict() {
        let twenty = "a".repeat(20);
        assert!(detect_language(&Always("en"), &twenty, 20).is_err());
        let twenty_one = "a".repeat(21);
        assert_eq!(detect_language(&Always("en"), &twenty_one, 20).unwrap(), "en");
    }

    #[test]
    fn test_whatlang_english() {
        let text = "The quick brown fox jumps over the lazy dog while the farmer \
                    watches from the porch and drinks his morning coffee.";
        assert_eq!(WhatlangDetector::new().detect(text).unwrap(), "en");
    }

    #[test]
    fn test_two_letter_codes() {
        assert_eq!(iso639_1("eng"), "en");
        assert_eq!(iso639_1("hin"), "hi");
        assert_eq!(iso639_1("cmn"), "zh");
        assert_eq!(iso639_1("pes"), "fa");
        // No two-letter code exists
        assert_eq!(iso639_1("xyz"), "xyz");
    }

    #[test]
    fn test_whatlang_no_features() {
        let result = WhatlangDetector::new().detect("1234567890 !!! 0987654321 ???");
        assert_eq!(result, Err(LanguageError::NoFeatures));
    }
}
