use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::WeatherSnapshot;

/// A stored diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: i64,
    /// The date the caller filed the entry under. Not necessarily the date
    /// the embedded weather was observed on.
    pub date: NaiveDate,
    pub text: String,
    pub weather: WeatherSnapshot,
}

/// An entry about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewDiaryEntry {
    pub date: NaiveDate,
    pub text: String,
    pub weather: WeatherSnapshot,
}

impl NewDiaryEntry {
    pub fn new(date: NaiveDate, text: impl Into<String>, weather: WeatherSnapshot) -> Self {
        Self {
            date,
            text: text.into(),
            weather,
        }
    }
}
