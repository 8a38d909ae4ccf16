use axum::extract::State;
use axum::Json;
use chrono::Local;
use serde::Serialize;

use crate::api::state::AppState;
use crate::db::Database;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub database: DatabaseStatus,
    pub weather: WeatherStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DatabaseStatus {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct WeatherStatus {
    /// `warm` when today's weather is already captured, `cold` when diary
    /// writes for today would need a live fetch.
    pub today: String,
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let database = match ping(&state.db).await {
        Ok(()) => DatabaseStatus {
            status: "ok".to_string(),
        },
        Err(_) => DatabaseStatus {
            status: "error".to_string(),
        },
    };

    let weather = match state.weather.cached(Local::now().date_naive()).await {
        Ok(Some(_)) => WeatherStatus {
            today: "warm".to_string(),
        },
        Ok(None) => WeatherStatus {
            today: "cold".to_string(),
        },
        Err(_) => WeatherStatus {
            today: "error".to_string(),
        },
    };

    let status = if database.status == "ok" { "ok" } else { "degraded" };

    Json(HealthData {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        weather,
    })
}

async fn ping(db: &Database) -> Result<()> {
    let conn = db.connect()?;
    conn.query("SELECT 1", ()).await?;
    Ok(())
}
