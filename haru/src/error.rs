use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HaruError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("No diary entry found for {0}")]
    NotFound(NaiveDate),

    #[error("Malformed date: {0}")]
    MalformedDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather fetch failed: {0}")]
    WeatherFetch(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for HaruError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            HaruError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            HaruError::MalformedDate(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            HaruError::InvalidRange { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            HaruError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            HaruError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            HaruError::WeatherFetch(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            HaruError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, HaruError>;
