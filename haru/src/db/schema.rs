use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Diary entries. The weather columns are a snapshot copied in at
        -- write time, not a reference into the weather table.
        CREATE TABLE IF NOT EXISTS diaries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            text TEXT NOT NULL,
            weather_condition TEXT NOT NULL,
            weather_icon TEXT NOT NULL,
            weather_temperature REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_diaries_date ON diaries(date);

        -- Daily weather captures. Duplicate dates are allowed; lookups take
        -- the lowest id.
        CREATE TABLE IF NOT EXISTS weather (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            condition TEXT NOT NULL,
            icon TEXT NOT NULL,
            temperature REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_weather_date ON weather(date);
        "#,
    )
    .await?;

    Ok(())
}
