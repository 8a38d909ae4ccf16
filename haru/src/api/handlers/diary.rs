//! Diary endpoint handlers. Thin: parse at the edge, delegate to the
//! service, convert out.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::Query;

use crate::api::dto::{DateQuery, DiaryEntryResponse, RangeQuery};
use crate::api::AppState;
use crate::error::Result;

/// `POST /create/diary`
#[utoipa::path(
    post,
    path = "/create/diary",
    tag = "diary",
    params(DateQuery),
    request_body(content = String, content_type = "text/plain", description = "Diary text"),
    responses(
        (status = 200, description = "Entry created"),
        (status = 400, description = "Malformed date"),
        (status = 502, description = "Weather unavailable for the date"),
    )
)]
pub async fn create_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
    body: String,
) -> Result<StatusCode> {
    let date = query.date()?;
    state.diary.create_diary(date, &body).await?;
    Ok(StatusCode::OK)
}

/// `GET /read/diary`
#[utoipa::path(
    get,
    path = "/read/diary",
    tag = "diary",
    params(DateQuery),
    responses(
        (status = 200, description = "Entries for the date, oldest first", body = [DiaryEntryResponse]),
        (status = 400, description = "Malformed date"),
    )
)]
pub async fn read_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<DiaryEntryResponse>>> {
    let date = query.date()?;
    let entries = state.diary.read_diary(date).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// `GET /read/diaries`
#[utoipa::path(
    get,
    path = "/read/diaries",
    tag = "diary",
    params(RangeQuery),
    responses(
        (status = 200, description = "Entries in the inclusive range", body = [DiaryEntryResponse]),
        (status = 400, description = "Malformed date or inverted range"),
    )
)]
pub async fn read_diaries(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<DiaryEntryResponse>>> {
    let (start, end) = query.range()?;
    let entries = state.diary.read_diaries(start, end).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// `PUT /update/diary`
#[utoipa::path(
    put,
    path = "/update/diary",
    tag = "diary",
    params(DateQuery),
    request_body(content = String, content_type = "text/plain", description = "Replacement text"),
    responses(
        (status = 200, description = "First entry of the date rewritten"),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "No entry for the date"),
    )
)]
pub async fn update_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
    body: String,
) -> Result<StatusCode> {
    let date = query.date()?;
    state.diary.update_diary(date, &body).await?;
    Ok(StatusCode::OK)
}

/// `DELETE /delete/diary`
#[utoipa::path(
    delete,
    path = "/delete/diary",
    tag = "diary",
    params(DateQuery),
    responses(
        (status = 200, description = "All entries for the date removed"),
        (status = 400, description = "Malformed date"),
    )
)]
pub async fn delete_diary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<StatusCode> {
    let date = query.date()?;
    state.diary.delete_diary(date).await?;
    Ok(StatusCode::OK)
}
