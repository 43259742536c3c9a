use axum::{
    Json, RequestPartsExt,
    extract::{FromRequestParts, Query, State, rejection::JsonRejection},
    http::request::Parts,
};
use reltime_shared::ApiResponse;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use time::OffsetDateTime;

use super::AppState;
use crate::error::AppError;
use crate::language::UserLanguage;
use crate::relative_time::{RelativeLabel, RelativeTimeFormatter};

/// Header carrying the client's IANA timezone
pub const TIMEZONE_HEADER: &str = "TS-Timezone";

/// Formatter for the caller's language and timezone.
pub struct RequestFormatter(pub RelativeTimeFormatter);

impl FromRequestParts<AppState> for RequestFormatter {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_language = parts.extract::<UserLanguage>().await?;

        let timezone = parts
            .headers
            .get(TIMEZONE_HEADER)
            .and_then(|v| v.to_str().ok());

        Ok(RequestFormatter(RelativeTimeFormatter::for_request(
            user_language.preferred_languages(),
            timezone,
            &state.formatter,
        )))
    }
}

#[derive(Debug, Deserialize)]
pub struct RelativeTimeQuery {
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBody {
    pub label: String,
    pub kind: String,
}

impl LabelBody {
    fn new(label: RelativeLabel, formatter: &RelativeTimeFormatter) -> Self {
        Self {
            label: label.localize(formatter.locale()),
            kind: label.kind().to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub timestamps: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub labels: Vec<LabelBody>,
}

/// GET /relative-time?timestamp=...
pub async fn get_relative_time(
    RequestFormatter(formatter): RequestFormatter,
    Query(query): Query<RelativeTimeQuery>,
) -> Json<ApiResponse<LabelBody>> {
    let label = formatter.label_at(query.timestamp.as_deref(), OffsetDateTime::now_utc());

    if label == RelativeLabel::Unavailable {
        tracing::debug!(timestamp = ?query.timestamp, "No relative time for timestamp");
    }

    Json(ApiResponse::ok(LabelBody::new(label, &formatter)))
}

/// POST /relative-time
///
/// Labels are returned in input order, all computed against the same instant.
pub async fn post_relative_time(
    State(state): State<AppState>,
    RequestFormatter(formatter): RequestFormatter,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchResponse>>, AppError> {
    let Json(request) = payload?;

    if request.timestamps.len() > state.max_batch {
        return Err(AppError::BatchTooLarge {
            count: request.timestamps.len(),
            limit: state.max_batch,
        });
    }

    tracing::debug!(count = request.timestamps.len(), "Formatting batch");

    let now = OffsetDateTime::now_utc();
    let labels = request
        .timestamps
        .iter()
        .map(|timestamp| LabelBody::new(formatter.label_at(timestamp.as_deref(), now), &formatter))
        .collect();

    Ok(Json(ApiResponse::ok(BatchResponse { labels })))
}
