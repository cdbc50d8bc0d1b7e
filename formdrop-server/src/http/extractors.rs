//! Custom Axum extractors

use std::num::IntErrorKind;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate a submission id from path
///
/// Any integer is accepted; values beyond `i64` saturate. Whether the id can
/// name a row is the store's concern.
pub struct SubmissionId(pub i64);

impl<S> FromRequestParts<S> for SubmissionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidId {
                    value: String::new(),
                })
            })?;

        let id = match raw.parse::<i64>() {
            Ok(id) => id,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => {
                    return Err(ApiError::Validation(ValidationError::InvalidId { value: raw }));
                }
            },
        };

        Ok(Self(id))
    }
}
