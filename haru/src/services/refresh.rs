use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime};
use tracing::info;

use crate::db::{Database, WeatherRepository};
use crate::error::Result;
use crate::models::WeatherRecord;
use crate::weather::CurrentWeather;

/// Manager for the daily weather capture.
///
/// The sole writer of the weather table. Fetches current conditions once a
/// day at the configured local time and stores them dated with the fetch
/// day. A failed fetch writes nothing; the next attempt is the next
/// scheduled tick (no backfill for days the process was down).
#[derive(Clone)]
pub struct WeatherRefreshManager {
    db: Database,
    client: Arc<dyn CurrentWeather>,
    refresh_at: NaiveTime,
}

impl WeatherRefreshManager {
    pub fn new(db: Database, client: Arc<dyn CurrentWeather>, refresh_at: NaiveTime) -> Self {
        Self {
            db,
            client,
            refresh_at,
        }
    }

    /// Run a single capture: fetch, then store in one transaction.
    /// Returns the stored record.
    pub async fn run_once(&self) -> Result<WeatherRecord> {
        info!("Starting weather refresh");

        let fetched = self.client.fetch_current().await?;

        let conn = self.db.connect()?;
        let tx = conn.transaction().await?;
        let stored = WeatherRepository::create(&tx, &fetched).await?;
        tx.commit().await?;

        info!(
            date = %stored.date,
            condition = %stored.condition,
            temperature = stored.temperature,
            "Weather refresh complete"
        );

        Ok(stored)
    }

    /// Time to sleep until the next occurrence of the scheduled wall-clock
    /// time: later today if it is still ahead, otherwise tomorrow.
    pub fn next_refresh_delay(&self, now: DateTime<Local>) -> Duration {
        delay_until(now, self.refresh_at)
    }

    /// The configured local refresh time.
    pub fn refresh_at(&self) -> NaiveTime {
        self.refresh_at
    }
}

fn delay_until(now: DateTime<Local>, at: NaiveTime) -> Duration {
    let today_at = now.date_naive().and_time(at);
    let next = if now.naive_local() < today_at {
        today_at
    } else {
        today_at + chrono::Duration::days(1)
    };

    (next - now.naive_local()).to_std().unwrap_or(Duration::ZERO)
}
