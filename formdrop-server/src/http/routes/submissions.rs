//! Submission endpoints
//!
//! - `GET /api/submissions` - list, newest first
//! - `POST /api/submit` - multipart form with an image file
//! - `DELETE /api/submissions/{id}` - remove row and image file

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        DefaultBodyLimit, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{DeleteOutcome, Submission, SubmissionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::SubmissionId;
use crate::http::server::AppState;
use crate::models::{NewSubmission, SubmissionForm, ValidationError};
use crate::uploads::{StoredUpload, UploadDir, UploadError};

const IMAGE_FIELD: &str = "image";

const FETCH_FAILED: &str = "Failed to fetch submissions";
const SUBMIT_FAILED: &str = "Failed to submit form";
const DELETE_FAILED: &str = "Failed to delete submission";

/// Submission response
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub image: Option<String>,
    pub created_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            message: s.message,
            image: s.image,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Confirmation body for successful writes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /api/submissions - list all submissions
async fn list_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let rows = SubmissionRepo::new(&state.pool)
        .list()
        .await
        .map_err(ApiError::internal(FETCH_FAILED))?;

    Ok(Json(rows.into_iter().map(SubmissionResponse::from).collect()))
}

/// POST /api/submit - store the image, then insert the row
///
/// The two steps are not atomic. If the insert fails the image is removed
/// again; a crash in between leaves an orphaned file.
async fn submit(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest {
        message: e.body_text(),
    })?;

    let (form, image) = read_form(&state.uploads, &mut multipart).await?;

    let submission = match NewSubmission::from_form(form) {
        Ok(submission) => submission,
        Err(e) => {
            if let Some(image) = image {
                image.discard().await;
            }
            return Err(e.into());
        }
    };
    let Some(image) = image else {
        return Err(ValidationError::MissingImage.into());
    };

    match SubmissionRepo::new(&state.pool)
        .insert(&submission, &image.stored_path)
        .await
    {
        Ok(id) => {
            tracing::info!(id, image = %image.stored_path, bytes = image.bytes, "Submission received");
            Ok(Json(MessageResponse {
                message: "Submission received successfully",
            }))
        }
        Err(e) => {
            image.discard().await;
            Err(ApiError::internal(SUBMIT_FAILED)(e))
        }
    }
}

/// DELETE /api/submissions/{id} - succeeds whether or not the id exists
async fn delete_submission(
    State(state): State<Arc<AppState>>,
    SubmissionId(id): SubmissionId,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = SubmissionRepo::new(&state.pool)
        .delete(id, &state.uploads)
        .await
        .map_err(ApiError::internal(DELETE_FAILED))?;

    match outcome {
        DeleteOutcome::Deleted => tracing::info!(id, "Submission deleted"),
        DeleteOutcome::NotFound => tracing::debug!(id, "Delete requested for unknown submission"),
    }

    Ok(Json(MessageResponse {
        message: "Submission deleted successfully",
    }))
}

/// Read every part of the form, streaming the image to disk.
///
/// On error any image already written is removed.
async fn read_form(
    uploads: &UploadDir,
    multipart: &mut Multipart,
) -> Result<(SubmissionForm, Option<StoredUpload>), ApiError> {
    let mut form = SubmissionForm::default();
    let mut image = None;

    match collect_parts(uploads, multipart, &mut form, &mut image).await {
        Ok(()) => Ok((form, image)),
        Err(e) => {
            if let Some(image) = image {
                image.discard().await;
            }
            Err(e)
        }
    }
}

async fn collect_parts(
    uploads: &UploadDir,
    multipart: &mut Multipart,
    form: &mut SubmissionForm,
    image: &mut Option<StoredUpload>,
) -> Result<(), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let Some(stored) = uploads.receive(field).await.map_err(upload_failed)? else {
                continue;
            };
            if image.is_some() {
                stored.discard().await;
                return Err(ApiError::BadRequest {
                    message: "Only one image may be uploaded".into(),
                });
            }
            *image = Some(stored);
        } else if SubmissionForm::is_text_field(&name) {
            let value = field.text().await.map_err(malformed)?;
            form.set(&name, value);
        }
    }

    Ok(())
}

fn malformed(e: MultipartError) -> ApiError {
    ApiError::BadRequest {
        message: e.body_text(),
    }
}

fn upload_failed(e: UploadError) -> ApiError {
    match e {
        UploadError::Multipart(e) => malformed(e),
        UploadError::Io(e) => ApiError::internal(SUBMIT_FAILED)(e),
    }
}

/// Submission routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/submissions", get(list_submissions))
        .route(
            "/api/submit",
            post(submit).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/submissions/{id}", delete(delete_submission))
}
