use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Haru API",
        version = "1.0.0",
        description = "Self-hostable weather diary. Entries are plain text tied to a date, stamped with that day's weather.",
    ),
    paths(
        handlers::health::health_check,
        handlers::diary::create_diary,
        handlers::diary::read_diary,
        handlers::diary::read_diaries,
        handlers::diary::update_diary,
        handlers::diary::delete_diary,
    ),
    components(schemas(
        dto::DateQuery,
        dto::RangeQuery,
        dto::DiaryEntryResponse,
        dto::WeatherSnapshotResponse,
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::WeatherStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "diary", description = "Diary entry creation, reading, update, and deletion"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
