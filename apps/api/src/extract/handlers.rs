use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::strip_data_uri_prefix;
use crate::models::record::ProjectRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    pub pdf_base64: String,
}

/// POST /api/v1/extract
///
/// Body: `{ "pdfBase64": "..." }` — tolerates a `data:application/pdf;base64,`
/// prefix, since browsers hand the file over as a data URI.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ProjectRecord>, AppError> {
    let payload = strip_data_uri_prefix(req.pdf_base64.trim());
    if payload.is_empty() {
        return Err(AppError::Validation(
            "No se ha proporcionado el contenido del PDF.".to_string(),
        ));
    }
    extract_record(&state, payload).await
}

/// POST /api/v1/extract/upload
///
/// Multipart variant: the PDF arrives as a `file` part and is base64-encoded
/// server-side.
pub async fn handle_extract_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProjectRecord>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        info!("Received PDF upload ({} bytes)", bytes.len());
        let pdf_base64 = BASE64.encode(&bytes);
        return extract_record(&state, &pdf_base64).await;
    }
    Err(AppError::Validation(
        "Missing 'file' part in multipart body".to_string(),
    ))
}

async fn extract_record(state: &AppState, pdf_base64: &str) -> Result<Json<ProjectRecord>, AppError> {
    let record = state
        .extractor
        .extract(pdf_base64)
        .await
        .map_err(|e| AppError::Llm(format!("PDF extraction failed: {e}")))?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::extract::Extractor;
    use crate::llm_client::LlmError;
    use crate::models::record::Solicitante;

    struct StubExtractor {
        fail: bool,
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        async fn extract(&self, pdf_base64: &str) -> Result<ProjectRecord, LlmError> {
            if self.fail {
                return Err(LlmError::EmptyContent);
            }
            // Echo the payload length so tests can observe what arrived.
            Ok(ProjectRecord {
                datos_solicitante: Solicitante {
                    nombre_razon_social: Some(format!("payload:{}", pdf_base64.len())),
                    ..Default::default()
                },
                ..Default::default()
            })
        }
    }

    fn stub_state(fail: bool) -> AppState {
        AppState {
            extractor: Arc::new(StubExtractor { fail }),
        }
    }

    #[tokio::test]
    async fn test_extract_passes_bare_payload_through() {
        let response = handle_extract(
            State(stub_state(false)),
            Json(ExtractRequest {
                pdf_base64: "AAAA".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(
            response.datos_solicitante.nombre_razon_social.as_deref(),
            Some("payload:4")
        );
    }

    #[tokio::test]
    async fn test_extract_strips_data_uri_prefix() {
        let response = handle_extract(
            State(stub_state(false)),
            Json(ExtractRequest {
                pdf_base64: "data:application/pdf;base64,AAAA".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(
            response.datos_solicitante.nombre_razon_social.as_deref(),
            Some("payload:4")
        );
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_payload() {
        let err = handle_extract(
            State(stub_state(false)),
            Json(ExtractRequest {
                pdf_base64: "  ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_extract_maps_model_failure_to_llm_error() {
        let err = handle_extract(
            State(stub_state(true)),
            Json(ExtractRequest {
                pdf_base64: "AAAA".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
