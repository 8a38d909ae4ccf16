use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::{Database, WeatherRepository};
use crate::error::Result;
use crate::models::WeatherRecord;

use super::CurrentWeather;

/// Read path over the weather table, with a live-fetch fallback.
///
/// The cache never writes: a record fetched on a miss is handed to the
/// caller and forgotten. Only the daily refresh job fills the table.
#[derive(Clone)]
pub struct WeatherCache {
    db: Database,
    client: Arc<dyn CurrentWeather>,
}

impl WeatherCache {
    pub fn new(db: Database, client: Arc<dyn CurrentWeather>) -> Self {
        Self { db, client }
    }

    /// Weather for a date: the stored record if one exists (lowest id wins
    /// among duplicates), otherwise a live fetch.
    pub async fn get_weather(&self, date: NaiveDate) -> Result<WeatherRecord> {
        let conn = self.db.connect()?;

        if let Some(record) = WeatherRepository::first_by_date(&conn, date).await? {
            return Ok(record);
        }

        tracing::debug!(%date, "No stored weather, falling back to live fetch");
        self.client.fetch_current().await
    }

    /// Stored record for a date, if any. No fallback.
    pub async fn cached(&self, date: NaiveDate) -> Result<Option<WeatherRecord>> {
        let conn = self.db.connect()?;
        WeatherRepository::first_by_date(&conn, date).await
    }
}
