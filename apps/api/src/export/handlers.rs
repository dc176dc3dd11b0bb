use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{export, ExportFormat};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/export/:format
///
/// Downloads the finished report as `pdf`, `html` or `markdown`.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format
        .parse()
        .map_err(|e: crate::export::ExportError| AppError::Validation(e.to_string()))?;

    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    let document = session.report_document()?;
    let exported = export(&document, format)?;

    let disposition = HeaderValue::from_str(&content_disposition(&exported.filename))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(exported.content_type),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.body,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback name plus the exact
/// UTF-8 name (RFC 6266 `filename*`).
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || "._-".contains(c) { c } else { '_' })
        .collect();
    let encoded: String = filename
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"._-".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
