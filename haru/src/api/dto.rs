//! Wire DTOs for the diary API.
//!
//! Dates travel as `YYYY-MM-DD` strings and are parsed at the edge so a bad
//! one maps to our 400 body instead of an extractor rejection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HaruError, Result};
use crate::models::{DiaryEntry, WeatherSnapshot};

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| HaruError::MalformedDate(value.to_string()))
}

/// Query parameters for the single-date endpoints.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
pub struct DateQuery {
    /// Entry date, `YYYY-MM-DD`.
    pub date: String,
}

impl DateQuery {
    pub fn date(&self) -> Result<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Query parameters for `GET /read/diaries`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    /// First date of the range, inclusive, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last date of the range, inclusive, `YYYY-MM-DD`.
    pub end_date: String,
}

impl RangeQuery {
    pub fn range(&self) -> Result<(NaiveDate, NaiveDate)> {
        Ok((parse_date(&self.start_date)?, parse_date(&self.end_date)?))
    }
}

/// A diary entry as returned by the read endpoints.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntryResponse {
    pub id: i64,
    /// The date the entry was filed under.
    #[schema(value_type = String, example = "2024-01-15")]
    pub date: NaiveDate,
    pub text: String,
    pub weather: WeatherSnapshotResponse,
}

/// The weather snapshot embedded in an entry.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshotResponse {
    pub condition: String,
    pub icon: String,
    /// Raw provider value (Kelvin).
    pub temperature: f64,
}

impl From<WeatherSnapshot> for WeatherSnapshotResponse {
    fn from(weather: WeatherSnapshot) -> Self {
        Self {
            condition: weather.condition,
            icon: weather.icon,
            temperature: weather.temperature,
        }
    }
}

impl From<DiaryEntry> for DiaryEntryResponse {
    fn from(entry: DiaryEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            text: entry.text,
            weather: entry.weather.into(),
        }
    }
}
