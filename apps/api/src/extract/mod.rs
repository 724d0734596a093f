//! PDF → record extraction.
//!
//! Sends an uploaded filing PDF to the Gemini API and parses the reply into
//! a [`ProjectRecord`] the form can present for review. Extraction is a
//! preview: nothing is validated here, absent data simply stays null.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};
use crate::models::record::ProjectRecord;

/// Pluggable extraction seam. Handlers depend on this trait so tests can
/// stub the model call.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// `pdf_base64` is the bare base64 payload, without a data-URI prefix.
    async fn extract(&self, pdf_base64: &str) -> Result<ProjectRecord, LlmError>;
}

/// Production extractor backed by the injected Gemini client.
pub struct GeminiExtractor {
    llm: LlmClient,
}

impl GeminiExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Extractor for GeminiExtractor {
    async fn extract(&self, pdf_base64: &str) -> Result<ProjectRecord, LlmError> {
        self.llm
            .generate_json_from_pdf(pdf_base64, &prompts::extraction_prompt())
            .await
    }
}

/// Accepts both a bare base64 payload and a full
/// `data:application/pdf;base64,...` URI, returning the payload portion.
pub fn strip_data_uri_prefix(pdf_base64: &str) -> &str {
    match pdf_base64.split_once(',') {
        Some((prefix, payload)) if prefix.eq_ignore_ascii_case("data:application/pdf;base64") => {
            payload
        }
        _ => pdf_base64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_uri_prefix_removes_pdf_prefix() {
        assert_eq!(
            strip_data_uri_prefix("data:application/pdf;base64,AAAA"),
            "AAAA"
        );
        assert_eq!(
            strip_data_uri_prefix("DATA:APPLICATION/PDF;BASE64,AAAA"),
            "AAAA"
        );
    }

    #[test]
    fn test_strip_data_uri_prefix_keeps_bare_payload() {
        assert_eq!(strip_data_uri_prefix("AAAA"), "AAAA");
    }

    #[test]
    fn test_strip_data_uri_prefix_ignores_other_mime_types() {
        assert_eq!(
            strip_data_uri_prefix("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }
}
