use chrono::NaiveDate;
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::WeatherRecord;

use super::diaries::parse_stored_date;

pub struct WeatherRepository;

impl WeatherRepository {
    pub async fn create(conn: &Connection, record: &WeatherRecord) -> Result<WeatherRecord> {
        conn.execute(
            r#"
            INSERT INTO weather (date, condition, icon, temperature)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                record.date.to_string(),
                record.condition.clone(),
                record.icon.clone(),
                record.temperature,
            ],
        )
        .await?;

        Ok(WeatherRecord {
            id: Some(conn.last_insert_rowid()),
            date: record.date,
            condition: record.condition.clone(),
            icon: record.icon.clone(),
            temperature: record.temperature,
        })
    }

    /// The record with the lowest id for a date, if any.
    pub async fn first_by_date(conn: &Connection, date: NaiveDate) -> Result<Option<WeatherRecord>> {
        let mut rows = conn
            .query(
                "SELECT id, date, condition, icon, temperature
                 FROM weather WHERE date = ?1 ORDER BY id LIMIT 1",
                params![date.to_string()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_record(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn find_by_date(conn: &Connection, date: NaiveDate) -> Result<Vec<WeatherRecord>> {
        let mut rows = conn
            .query(
                "SELECT id, date, condition, icon, temperature
                 FROM weather WHERE date = ?1 ORDER BY id",
                params![date.to_string()],
            )
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(Self::row_to_record(&row)?);
        }
        Ok(records)
    }

    fn row_to_record(row: &libsql::Row) -> Result<WeatherRecord> {
        Ok(WeatherRecord {
            id: Some(row.get(0)?),
            date: parse_stored_date(&row.get::<String>(1)?)?,
            condition: row.get(2)?,
            icon: row.get(3)?,
            temperature: row.get(4)?,
        })
    }
}
