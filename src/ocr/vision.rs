//! Google Cloud Vision OCR provider.
//!
//! Speaks the `images:annotate` REST endpoint with blocking HTTP. Each page
//! is sent with document text detection first; if that yields no text the
//! same image is sent again with plain text detection.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::{preprocess, OcrEngine, OcrError, DEFAULT_LANGUAGE_HINTS};

/// Public annotate endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// How requests are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionCredentials {
    /// API key, sent as the `key` query parameter
    ApiKey(String),
    /// OAuth access token, sent as a bearer token
    AccessToken(String),
}

/// Vision feature requested for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// Dense text (paragraphs, pages)
    DocumentText,
    /// Sparse text (signs, labels)
    Text,
}

impl DetectionMode {
    fn feature_type(&self) -> &'static str {
        match self {
            DetectionMode::DocumentText => "DOCUMENT_TEXT_DETECTION",
            DetectionMode::Text => "TEXT_DETECTION",
        }
    }
}

/// Configuration for [`GoogleVisionOcr`].
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Annotate endpoint URL
    pub endpoint: String,

    /// Request credentials
    pub credentials: VisionCredentials,

    /// Language hints biasing recognition
    pub language_hints: Vec<String>,
}

impl VisionConfig {
    /// Create a configuration with the default endpoint and hints.
    pub fn new(credentials: VisionCredentials) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials,
            language_hints: DEFAULT_LANGUAGE_HINTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Override the endpoint (e.g., a regional endpoint or a proxy).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the language hints.
    pub fn with_language_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.language_hints = hints.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Serialize)]
struct BatchAnnotateRequest<'a> {
    requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageRequest<'a> {
    image: ImageContent<'a>,
    features: [Feature; 1],
    image_context: ImageContext<'a>,
}

#[derive(Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageContext<'a> {
    language_hints: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
struct BatchAnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateImageResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Default, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct Status {
    #[serde(default)]
    message: String,
}

impl AnnotateImageResponse {
    fn text(&self) -> &str {
        self.full_text_annotation
            .as_ref()
            .map(|a| a.text.as_str())
            .unwrap_or_default()
    }

    fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .map(|s| s.message.as_str())
            .filter(|m| !m.is_empty())
    }
}

/// Run document detection, fall back to text detection when it finds
/// nothing, and turn a provider error on the final response into
/// [`OcrError::Provider`].
pub(crate) fn resolve_text<F>(
    primary: AnnotateImageResponse,
    fallback: F,
) -> Result<String, OcrError>
where
    F: FnOnce() -> Result<AnnotateImageResponse, OcrError>,
{
    let response = if primary.text().is_empty() {
        fallback()?
    } else {
        primary
    };

    if let Some(message) = response.error_message() {
        return Err(OcrError::Provider(message.to_string()));
    }

    Ok(response.text().trim().to_string())
}

/// [`OcrEngine`] backed by Google Cloud Vision.
pub struct GoogleVisionOcr {
    client: reqwest::blocking::Client,
    config: VisionConfig,
}

impl GoogleVisionOcr {
    /// Create a client. No request timeout is applied.
    pub fn new(config: VisionConfig) -> Result<Self, OcrError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| OcrError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Current configuration.
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    fn annotate(&self, content: &str, mode: DetectionMode) -> Result<AnnotateImageResponse, OcrError> {
        let body = BatchAnnotateRequest {
            requests: [AnnotateImageRequest {
                image: ImageContent { content },
                features: [Feature {
                    kind: mode.feature_type(),
                }],
                image_context: ImageContext {
                    language_hints: &self.config.language_hints,
                },
            }],
        };

        let request = self.client.post(&self.config.endpoint).json(&body);
        let request = match &self.config.credentials {
            VisionCredentials::ApiKey(key) => request.query(&[("key", key)]),
            VisionCredentials::AccessToken(token) => request.bearer_auth(token),
        };

        let response = request
            .send()
            .map_err(|e| OcrError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::Http {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let batch: BatchAnnotateResponse = response
            .json()
            .map_err(|e| OcrError::Transport(e.to_string()))?;

        Ok(batch.responses.into_iter().next().unwrap_or_default())
    }
}

impl OcrEngine for GoogleVisionOcr {
    fn name(&self) -> &str {
        "google-vision"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let png = preprocess(image)?;
        let content = STANDARD.encode(png);

        log::debug!(
            "Submitting {}x{} page image to Vision ({} bytes base64)",
            image.width(),
            image.height(),
            content.len()
        );

        let primary = self.annotate(&content, DetectionMode::DocumentText)?;
        resolve_text(primary, || {
            log::debug!("Document detection returned no text, retrying with text detection");
            self.annotate(&content, DetectionMode::Text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> AnnotateImageResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_primary_text_skips_fallback() {
        let primary = response(r#"{"fullTextAnnotation": {"text": "  Invoice 42\n"}}"#);
        let text = resolve_text(primary, || panic!("fallback must not run")).unwrap();
        assert_eq!(text, "Invoice 42");
    }

    #[test]
    fn test_empty_primary_uses_fallback() {
        let primary = response("{}");
        let text = resolve_text(primary, || {
            Ok(response(r#"{"fullTextAnnotation": {"text": "STOP"}}"#))
        })
        .unwrap();
        assert_eq!(text, "STOP");
    }

    #[test]
    fn test_provider_error_is_raised() {
        let primary = response(r#"{"error": {"code": 3, "message": "Bad image data."}}"#);
        let err = resolve_text(primary, || {
            Ok(response(r#"{"error": {"code": 3, "message": "Bad image data."}}"#))
        })
        .unwrap_err();
        assert_eq!(err, OcrError::Provider("Bad image data.".to_string()));
    }

    #[test]
    fn test_no_text_anywhere_is_empty_not_error() {
        let text = resolve_text(response("{}"), || Ok(response("{}"))).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_request_shape() {
        let hints = vec!["en".to_string(), "hi".to_string()];
        let body = BatchAnnotateRequest {
            requests: [AnnotateImageRequest {
                image: ImageContent { content: "AAAA" },
                features: [Feature {
                    kind: DetectionMode::DocumentText.feature_type(),
                }],
                image_context: ImageContext {
                    language_hints: &hints,
                },
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["requests"][0]["image"]["content"], "AAAA");
        assert_eq!(
            json["requests"][0]["features"][0]["type"],
            "DOCUMENT_TEXT_DETECTION"
        );
        assert_eq!(json["requests"][0]["imageContext"]["languageHints"][1], "hi");
    }

    #[test]
    fn test_config_builder() {
        let config = VisionConfig::new(VisionCredentials::ApiKey("k".to_string()))
            .with_endpoint("http://localhost:9000/annotate")
            .with_language_hints(["fr", "de", "en"]);
        assert_eq!(config.endpoint, "http://localhost:9000/annotate");
        assert_eq!(config.language_hints, vec!["fr", "de", "en"]);
    }
}
