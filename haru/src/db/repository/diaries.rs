use chrono::NaiveDate;
use libsql::{params, Connection};

use crate::error::{HaruError, Result};
use crate::models::{DiaryEntry, NewDiaryEntry, WeatherSnapshot};

pub struct DiaryRepository;

impl DiaryRepository {
    pub async fn create(conn: &Connection, entry: &NewDiaryEntry) -> Result<DiaryEntry> {
        conn.execute(
            r#"
            INSERT INTO diaries (date, text, weather_condition, weather_icon, weather_temperature)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.date.to_string(),
                entry.text.clone(),
                entry.weather.condition.clone(),
                entry.weather.icon.clone(),
                entry.weather.temperature,
            ],
        )
        .await?;

        Ok(DiaryEntry {
            id: conn.last_insert_rowid(),
            date: entry.date,
            text: entry.text.clone(),
            weather: entry.weather.clone(),
        })
    }

    pub async fn find_by_date(conn: &Connection, date: NaiveDate) -> Result<Vec<DiaryEntry>> {
        let mut rows = conn
            .query(
                "SELECT id, date, text, weather_condition, weather_icon, weather_temperature
                 FROM diaries WHERE date = ?1 ORDER BY id",
                params![date.to_string()],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(Self::row_to_entry(&row)?);
        }
        Ok(entries)
    }

    /// Entries with `start <= date <= end`, ordered by date then id.
    pub async fn find_by_date_range(
        conn: &Connection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>> {
        let mut rows = conn
            .query(
                "SELECT id, date, text, weather_condition, weather_icon, weather_temperature
                 FROM diaries WHERE date >= ?1 AND date <= ?2 ORDER BY date, id",
                params![start.to_string(), end.to_string()],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(Self::row_to_entry(&row)?);
        }
        Ok(entries)
    }

    /// The entry with the lowest id for a date, if any.
    pub async fn first_by_date(conn: &Connection, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        let mut rows = conn
            .query(
                "SELECT id, date, text, weather_condition, weather_icon, weather_temperature
                 FROM diaries WHERE date = ?1 ORDER BY id LIMIT 1",
                params![date.to_string()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_entry(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn update_text(conn: &Connection, id: i64, text: &str) -> Result<()> {
        conn.execute(
            "UPDATE diaries SET text = ?2 WHERE id = ?1",
            params![id, text],
        )
        .await?;

        Ok(())
    }

    /// Delete every entry for a date. Returns the number removed.
    pub async fn delete_by_date(conn: &Connection, date: NaiveDate) -> Result<u64> {
        let deleted = conn
            .execute(
                "DELETE FROM diaries WHERE date = ?1",
                params![date.to_string()],
            )
            .await?;

        Ok(deleted)
    }

    fn row_to_entry(row: &libsql::Row) -> Result<DiaryEntry> {
        Ok(DiaryEntry {
            id: row.get(0)?,
            date: parse_stored_date(&row.get::<String>(1)?)?,
            text: row.get(2)?,
            weather: WeatherSnapshot {
                condition: row.get(3)?,
                icon: row.get(4)?,
                temperature: row.get(5)?,
            },
        })
    }
}

pub(crate) fn parse_stored_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| HaruError::Internal(format!("invalid stored date '{value}': {e}")))
}
