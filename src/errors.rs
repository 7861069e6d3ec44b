use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::models::MissingFields;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),
    #[error("episode not found")]
    EpisodeNotFound,
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        warn!("rejected link body: {rejection}");
        Self::MissingFields(MissingFields)
    }
}

impl Error {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingFields(_) => (
                StatusCode::BAD_REQUEST,
                "Missing required fields: url, quality, source",
            ),
            Self::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "Invalid query parameters"),
            Self::EpisodeNotFound => (StatusCode::NOT_FOUND, "Episode not found"),
            Self::SerdeJson(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        if status.is_server_error() {
            error!("request failed with {self:?}");
        }
        let body = Json(json!({
            "error": error_message,
        }));
        (status, body).into_response()
    }
}

pub type InternalError = anyhow::Error;
