use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::export::document::{export_xml_base64, DATA_URI_PREFIX, EXPORT_FILE_NAME};
use crate::models::record::ProjectRecord;
use crate::validation::validate_record;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub filename: &'static str,
    pub xml_base64: String,
    /// Ready-made `data:` URI so the front-end can trigger the download with
    /// a plain anchor click.
    pub data_uri: String,
}

/// POST /api/v1/export
///
/// Validates the record with the same predicate checks the form runs, then
/// serializes. A failed validation returns 422 carrying the full report so
/// the client can highlight the offending fields.
pub async fn handle_export(
    Json(record): Json<ProjectRecord>,
) -> Result<Json<ExportResponse>, AppError> {
    let report = validate_record(&record);
    if !report.passed {
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&report).unwrap_or_default(),
        ));
    }

    let xml_base64 = export_xml_base64(&record);
    let data_uri = format!("{DATA_URI_PREFIX}{xml_base64}");
    Ok(Json(ExportResponse {
        filename: EXPORT_FILE_NAME,
        xml_base64,
        data_uri,
    }))
}
