use std::sync::Arc;

use chrono::NaiveDate;
use libsql::Connection;
use tracing::info;

use crate::db::{Database, DiaryRepository, WeatherRepository};
use crate::error::{HaruError, Result};
use crate::models::{DiaryEntry, NewDiaryEntry, WeatherRecord, WeatherSnapshot};
use crate::weather::CurrentWeather;

/// Orchestrates diary operations. Each write runs in its own transaction;
/// for creation that makes the weather lookup and the insert atomic.
#[derive(Clone)]
pub struct DiaryService {
    db: Database,
    client: Arc<dyn CurrentWeather>,
}

impl DiaryService {
    pub fn new(db: Database, client: Arc<dyn CurrentWeather>) -> Self {
        Self { db, client }
    }

    /// Create an entry for a date. The weather snapshot comes from the
    /// stored record for that date, or a live fetch on a miss; the live
    /// value is used for this entry only and never persisted. The entry is
    /// always filed under the requested date, even when the fetched weather
    /// is today's.
    pub async fn create_diary(&self, date: NaiveDate, text: &str) -> Result<DiaryEntry> {
        let conn = self.db.connect()?;
        let tx = conn.transaction().await?;

        let weather = self.resolve_weather(&tx, date).await?;
        let entry = NewDiaryEntry::new(date, text, WeatherSnapshot::from(weather));
        let created = DiaryRepository::create(&tx, &entry).await?;

        tx.commit().await?;

        info!(id = created.id, date = %created.date, "Diary entry created");
        Ok(created)
    }

    /// All entries for a date, oldest first. Empty when there are none.
    pub async fn read_diary(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>> {
        let conn = self.db.connect()?;
        DiaryRepository::find_by_date(&conn, date).await
    }

    /// All entries with `start <= date <= end`. Rejects inverted ranges
    /// before touching storage.
    pub async fn read_diaries(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DiaryEntry>> {
        if start > end {
            return Err(HaruError::InvalidRange { start, end });
        }

        let conn = self.db.connect()?;
        DiaryRepository::find_by_date_range(&conn, start, end).await
    }

    /// Replace the text of the first (lowest id) entry for a date. The id,
    /// date and weather snapshot are untouched.
    pub async fn update_diary(&self, date: NaiveDate, text: &str) -> Result<DiaryEntry> {
        let conn = self.db.connect()?;
        let tx = conn.transaction().await?;

        let Some(entry) = DiaryRepository::first_by_date(&tx, date).await? else {
            return Err(HaruError::NotFound(date));
        };
        DiaryRepository::update_text(&tx, entry.id, text).await?;

        tx.commit().await?;

        info!(id = entry.id, date = %date, "Diary entry updated");
        Ok(DiaryEntry {
            text: text.to_string(),
            ..entry
        })
    }

    /// Remove every entry for a date. Returns the number removed; a date
    /// with no entries deletes zero and succeeds.
    pub async fn delete_diary(&self, date: NaiveDate) -> Result<u64> {
        let conn = self.db.connect()?;
        let tx = conn.transaction().await?;

        let deleted = DiaryRepository::delete_by_date(&tx, date).await?;

        tx.commit().await?;

        info!(count = deleted, date = %date, "Diary entries deleted");
        Ok(deleted)
    }

    /// Stored weather for the date (lowest id wins), else a live fetch.
    /// Runs on the caller's connection so a surrounding transaction covers
    /// the lookup.
    async fn resolve_weather(&self, conn: &Connection, date: NaiveDate) -> Result<WeatherRecord> {
        if let Some(record) = WeatherRepository::first_by_date(conn, date).await? {
            return Ok(record);
        }

        tracing::debug!(%date, "No stored weather for entry, fetching live");
        self.client.fetch_current().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use async_trait::async_trait;
    use chrono::Local;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::NamedTempFile;

    struct FailingClient;

    #[async_trait]
    impl CurrentWeather for FailingClient {
        async fn fetch_current(&self) -> Result<WeatherRecord> {
            Err(HaruError::WeatherFetch("provider down".to_string()))
        }
    }

    struct CountingClient {
        calls: AtomicUsize,
    }

    impl CountingClient {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CurrentWeather for CountingClient {
        async fn fetch_current(&self) -> Result<WeatherRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherRecord {
                id: None,
                date: Local::now().date_naive(),
                condition: "Clouds".to_string(),
                icon: "03d".to_string(),
                temperature: 290.0,
            })
        }
    }

    async fn setup_db() -> (Database, NamedTempFile) {
        let temp = NamedTempFile::new().unwrap();
        let config = DatabaseConfig {
            url: temp.path().to_str().unwrap().to_string(),
            auth_token: None,
        };
        let db = Database::new(&config).await.unwrap();
        (db, temp)
    }

    async fn seed_weather(db: &Database, date: NaiveDate, condition: &str) {
        let conn = db.connect().unwrap();
        WeatherRepository::create(
            &conn,
            &WeatherRecord {
                id: None,
                date,
                condition: condition.to_string(),
                icon: "01d".to_string(),
                temperature: 285.2,
            },
        )
        .await
        .unwrap();
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_create_diary_uses_stored_weather() {
        // Given stored weather for the date and a provider that would fail
        let (db, _temp) = setup_db().await;
        seed_weather(&db, date("2024-01-15"), "Clear").await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        // When an entry is created
        let entry = service
            .create_diary(date("2024-01-15"), "sunny walk")
            .await
            .unwrap();

        // Then the snapshot comes from the store, no provider call needed
        assert_eq!(entry.date, date("2024-01-15"));
        assert_eq!(entry.text, "sunny walk");
        assert_eq!(entry.weather.condition, "Clear");
        assert_eq!(entry.weather.temperature, 285.2);
    }

    #[tokio::test]
    async fn test_create_diary_falls_back_to_live_fetch() {
        // Given no stored weather
        let (db, _temp) = setup_db().await;
        let client = Arc::new(CountingClient::new());
        let service = DiaryService::new(db.clone(), client.clone());

        // When an entry is created
        let entry = service
            .create_diary(date("2024-01-15"), "cloudy walk")
            .await
            .unwrap();

        // Then the live value is embedded and the weather table stays empty
        assert_eq!(entry.weather.condition, "Clouds");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        let conn = db.connect().unwrap();
        let today = WeatherRepository::find_by_date(&conn, Local::now().date_naive())
            .await
            .unwrap();
        assert!(today.is_empty());
        let requested = WeatherRepository::find_by_date(&conn, date("2024-01-15"))
            .await
            .unwrap();
        assert!(requested.is_empty());
    }

    #[tokio::test]
    async fn test_create_diary_stamps_requested_date() {
        // Given a live fetch that reports today's date
        let (db, _temp) = setup_db().await;
        let service = DiaryService::new(db, Arc::new(CountingClient::new()));

        // When an entry is created for a past date
        let entry = service
            .create_diary(date("2020-06-01"), "backdated")
            .await
            .unwrap();

        // Then the entry is filed under the requested date, not today's
        assert_eq!(entry.date, date("2020-06-01"));
    }

    #[tokio::test]
    async fn test_create_diary_propagates_fetch_failure() {
        // Given no stored weather and a failing provider
        let (db, _temp) = setup_db().await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        // When creation is attempted
        let err = service
            .create_diary(date("2024-01-15"), "doomed")
            .await
            .unwrap_err();

        // Then the error surfaces and nothing was written
        assert!(matches!(err, HaruError::WeatherFetch(_)));
        let entries = service.read_diary(date("2024-01-15")).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_read_roundtrip() {
        let (db, _temp) = setup_db().await;
        seed_weather(&db, date("2024-01-15"), "Clear").await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        let created = service
            .create_diary(date("2024-01-15"), "first entry")
            .await
            .unwrap();
        let entries = service.read_diary(date("2024-01-15")).await.unwrap();

        assert_eq!(entries, vec![created]);
    }

    #[tokio::test]
    async fn test_create_diary_allows_duplicates() {
        let (db, _temp) = setup_db().await;
        seed_weather(&db, date("2024-01-15"), "Clear").await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        service
            .create_diary(date("2024-01-15"), "morning")
            .await
            .unwrap();
        service
            .create_diary(date("2024-01-15"), "evening")
            .await
            .unwrap();

        let entries = service.read_diary(date("2024-01-15")).await.unwrap();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["morning", "evening"]);
    }

    #[tokio::test]
    async fn test_read_diary_empty_date() {
        let (db, _temp) = setup_db().await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        let entries = service.read_diary(date("2024-01-15")).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_read_diaries_inclusive_bounds() {
        // Given entries on four consecutive days
        let (db, _temp) = setup_db().await;
        for d in ["2024-01-14", "2024-01-15", "2024-01-16", "2024-01-17"] {
            seed_weather(&db, date(d), "Clear").await;
        }
        let service = DiaryService::new(db, Arc::new(FailingClient));
        for d in ["2024-01-14", "2024-01-15", "2024-01-16", "2024-01-17"] {
            service.create_diary(date(d), d).await.unwrap();
        }

        // When the middle two days are requested
        let entries = service
            .read_diaries(date("2024-01-15"), date("2024-01-16"))
            .await
            .unwrap();

        // Then both boundary days are included and nothing else
        let dates: Vec<String> = entries.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-01-16"]);
    }

    #[tokio::test]
    async fn test_read_diaries_equal_bounds() {
        let (db, _temp) = setup_db().await;
        seed_weather(&db, date("2024-01-15"), "Clear").await;
        let service = DiaryService::new(db, Arc::new(FailingClient));
        service.create_diary(date("2024-01-15"), "only").await.unwrap();

        let entries = service
            .read_diaries(date("2024-01-15"), date("2024-01-15"))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_read_diaries_inverted_range() {
        let (db, _temp) = setup_db().await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        let err = service
            .read_diaries(date("2024-01-16"), date("2024-01-15"))
            .await
            .unwrap_err();
        assert!(matches!(err, HaruError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn test_update_diary_changes_first_entry_only() {
        // Given two entries on the same date
        let (db, _temp) = setup_db().await;
        seed_weather(&db, date("2024-01-15"), "Clear").await;
        let service = DiaryService::new(db, Arc::new(FailingClient));
        let first = service
            .create_diary(date("2024-01-15"), "morning")
            .await
            .unwrap();
        service
            .create_diary(date("2024-01-15"), "evening")
            .await
            .unwrap();

        // When the date is updated
        let updated = service
            .update_diary(date("2024-01-15"), "rewritten morning")
            .await
            .unwrap();

        // Then only the first entry changed, everything else intact
        assert_eq!(updated.id, first.id);
        assert_eq!(updated.text, "rewritten morning");
        assert_eq!(updated.weather, first.weather);

        let entries = service.read_diary(date("2024-01-15")).await.unwrap();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["rewritten morning", "evening"]);
    }

    #[tokio::test]
    async fn test_update_diary_missing_date_is_not_found() {
        let (db, _temp) = setup_db().await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        let err = service
            .update_diary(date("2024-01-15"), "nothing here")
            .await
            .unwrap_err();
        assert!(matches!(err, HaruError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_diary_clears_only_that_date() {
        // Given entries on two dates
        let (db, _temp) = setup_db().await;
        seed_weather(&db, date("2024-01-15"), "Clear").await;
        seed_weather(&db, date("2024-01-16"), "Rain").await;
        let service = DiaryService::new(db, Arc::new(FailingClient));
        service.create_diary(date("2024-01-15"), "a").await.unwrap();
        service.create_diary(date("2024-01-15"), "b").await.unwrap();
        service.create_diary(date("2024-01-16"), "keep").await.unwrap();

        // When one date is deleted
        let deleted = service.delete_diary(date("2024-01-15")).await.unwrap();

        // Then only that date's entries are gone
        assert_eq!(deleted, 2);
        assert!(service
            .read_diary(date("2024-01-15"))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(service.read_diary(date("2024-01-16")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_diary_empty_date_succeeds() {
        let (db, _temp) = setup_db().await;
        let service = DiaryService::new(db, Arc::new(FailingClient));

        let deleted = service.delete_diary(date("2024-01-15")).await.unwrap();
        assert_eq!(deleted, 0);
    }
}
