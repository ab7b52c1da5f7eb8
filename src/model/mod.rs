//! Data model shared by extraction and summarization.
//!
//! Inputs ([`Document`]) flow through extraction into an
//! [`ExtractionOutcome`], which the summarizer turns into a [`Report`].

mod document;
mod page;
mod report;

pub use document::{Document, ExtractionOutcome, MediaType, MIME_DOCX, MIME_PDF, MIME_TEXT};
pub use page::{ExtractionMethod, PageResult};
pub use report::{
    distinct_texts, EntityLabel, Metadata, NamedEntity, Report, UNKNOWN_LANGUAGE,
};
