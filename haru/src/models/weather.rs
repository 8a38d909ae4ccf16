use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One captured weather observation, as stored in the weather table.
///
/// Several records may exist for the same date; "the" record for a date is
/// always the one with the lowest id (earliest capture).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// None until the record has been stored.
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub condition: String,
    pub icon: String,
    /// Raw provider value, Kelvin as delivered. Never converted.
    pub temperature: f64,
}

/// The weather copy embedded in a diary entry.
///
/// Denormalized on purpose: once an entry is written, later changes to the
/// weather table never show through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub condition: String,
    pub icon: String,
    pub temperature: f64,
}

impl From<&WeatherRecord> for WeatherSnapshot {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            condition: record.condition.clone(),
            icon: record.icon.clone(),
            temperature: record.temperature,
        }
    }
}

impl From<WeatherRecord> for WeatherSnapshot {
    fn from(record: WeatherRecord) -> Self {
        Self {
            condition: record.condition,
            icon: record.icon,
            temperature: record.temperature,
        }
    }
}
