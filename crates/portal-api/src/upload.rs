//! # Bulk CSV Upload
//!
//! Facilities, vaccinators, and enrollments are registered in bulk from a
//! CSV file posted as the multipart field `file`. The first line is the
//! header; each following line is one record.
//!
//! Every row is processed independently: row conversion, validation, and
//! the registry call. A failing row is reported in the summary and never
//! stops the rows after it.

use axum::extract::Multipart;
use portal_core::RegistryRecord;
use portal_registry_client::RegistryClient;
use portal_schema::{FromRow, Row, Schema, Validate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;

/// Name of the multipart field carrying the CSV file.
pub const FILE_FIELD: &str = "file";

/// Outcome of a bulk upload.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct UploadSummary {
    /// Rows forwarded to the registry.
    pub accepted: usize,
    pub rejected: Vec<RejectedRow>,
}

/// A row that was not registered, with every reason found.
#[derive(Debug, Serialize, ToSchema)]
pub struct RejectedRow {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub errors: Vec<String>,
}

/// Read the `file` field of a multipart request.
pub async fn read_file(mut multipart: Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(AppError::BadRequest(format!(
        "multipart field `{FILE_FIELD}` is required"
    )))
}

/// Split CSV bytes into rows keyed by header.
///
/// A structurally broken file (ragged rows, invalid UTF-8) fails as a whole;
/// nothing is forwarded.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<Row>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| AppError::BadRequest(format!("invalid CSV header: {e}")))?
        .clone();

    reader
        .records()
        .enumerate()
        .map(|(i, record)| -> Result<Row, AppError> {
            let record =
                record.map_err(|e| AppError::BadRequest(format!("invalid CSV row {}: {e}", i + 1)))?;
            Ok(Row::new(i + 1, headers.iter().zip(record.iter())))
        })
        .collect()
}

/// Convert, validate, and register each row as an `R`.
pub async fn register_rows<R>(
    registry: &RegistryClient,
    token: &BearerToken,
    metrics: &ApiMetrics,
    rows: Vec<Row>,
) -> UploadSummary
where
    R: FromRow + Schema + RegistryRecord,
{
    let mut summary = UploadSummary::default();

    for row in rows {
        let number = row.number();
        match register_row::<R>(registry, token, &row).await {
            Ok(()) => summary.accepted += 1,
            Err(errors) => {
                tracing::warn!(
                    entity = R::ENTITY_TYPE,
                    row = number,
                    errors = errors.len(),
                    "row rejected"
                );
                summary.rejected.push(RejectedRow { row: number, errors });
            }
        }
    }

    metrics.record_rejected(summary.rejected.len());
    tracing::info!(
        entity = R::ENTITY_TYPE,
        accepted = summary.accepted,
        rejected = summary.rejected.len(),
        "upload processed"
    );
    summary
}

async fn register_row<R>(
    registry: &RegistryClient,
    token: &BearerToken,
    row: &Row,
) -> Result<(), Vec<String>>
where
    R: FromRow + Schema + RegistryRecord,
{
    let record = R::from_row(row).map_err(|e| vec![e.to_string()])?;

    record.validate().map_err(|err| {
        err.violations()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    })?;

    let attributes = portal_core::to_attributes(&record).map_err(|e| vec![e.to_string()])?;

    registry
        .create_record(R::ENTITY_TYPE, &attributes, token.as_str())
        .await
        .map_err(|e| {
            tracing::error!(entity = R::ENTITY_TYPE, row = row.number(), error = %e, "registry create failed");
            vec!["registry rejected the record".to_string()]
        })?;

    Ok(())
}
