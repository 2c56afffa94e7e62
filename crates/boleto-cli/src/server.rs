//! HTTP upload endpoint.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use boleto_core::upload::{self, NO_FILES_ERROR};
use boleto_core::{ExtractionPipeline, FileResponse, UploadedFile};

/// Route accepting boleto uploads.
pub const UPLOAD_ROUTE: &str = "/processar_boletos_pdfs";

/// Multipart field carrying each file.
pub const FILE_FIELD: &str = "file";

/// Shared handler state.
pub struct AppState {
    pub pipeline: ExtractionPipeline,
}

/// Build the application router.
pub fn build_router(pipeline: ExtractionPipeline, max_upload_bytes: usize) -> Router {
    let state = Arc::new(AppState { pipeline });

    Router::new()
        .route(
            UPLOAD_ROUTE,
            post(upload_boletos).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

/// `POST /processar_boletos_pdfs` handler.
///
/// Answers `207` with one entry per `file` field, in upload order.
async fn upload_boletos(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let files = match collect_files(multipart).await {
        Ok(files) => files,
        Err((status, message)) => {
            warn!("Rejected upload request: {}", message);
            return error_response(status, message);
        }
    };

    info!(
        "Received files: {:?}",
        files.iter().map(|f| f.file_name.as_str()).collect::<Vec<_>>()
    );

    if files.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, NO_FILES_ERROR.to_string());
    }

    let outcomes = upload::process_batch(&state.pipeline, files).await;
    let body: Vec<FileResponse> = outcomes.iter().map(|o| o.to_response()).collect();

    (StatusCode::MULTI_STATUS, Json(body)).into_response()
}

async fn collect_files(mut multipart: Multipart) -> Result<Vec<UploadedFile>, (StatusCode, String)> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), format!("Multipart error: {}", e.body_text())))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // Plain form values under the file field are not uploads
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| (e.status(), format!("Failed to read {}: {}", file_name, e.body_text())))?;

        files.push(UploadedFile::new(file_name, data.to_vec()));
    }

    Ok(files)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "erro": message }))).into_response()
}
