use chrono::NaiveTime;
use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse `WEATHER_REFRESH_AT` env var.
/// Format: local wall-clock time as `HH:MM` (or `HH:MM:SS`), e.g. `01:00`.
fn parse_refresh_at(default: NaiveTime) -> NaiveTime {
    match env::var("WEATHER_REFRESH_AT") {
        Ok(val) if !val.is_empty() => NaiveTime::parse_from_str(&val, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&val, "%H:%M:%S"))
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Invalid value '{}' for WEATHER_REFRESH_AT: {}. Using default.",
                    val,
                    e
                );
                default
            }),
        _ => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub weather: WeatherConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
}

/// Weather provider (OpenWeatherMap-compatible) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// Provider API key. Required; startup fails without it.
    pub api_key: String,
    pub city: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Daily weather capture schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    /// Local wall-clock time of the daily refresh.
    pub refresh_at: NaiveTime,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HARU_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_env_or("HARU_PORT", 3000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:haru.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
            },
            weather: WeatherConfig {
                api_key: env::var("OPENWEATHERMAP_API_KEY").unwrap_or_default(),
                city: env::var("WEATHER_CITY").unwrap_or_else(|_| "seoul".to_string()),
                base_url: env::var("WEATHER_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
                timeout_secs: parse_env_or("WEATHER_TIMEOUT_SECS", 5),
            },
            refresh: RefreshConfig {
                refresh_at: parse_refresh_at(default_refresh_at()),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

fn default_refresh_at() -> NaiveTime {
    // 01:00 local, shortly after midnight so the new day's weather exists
    // before anyone writes an entry for it.
    NaiveTime::from_hms_opt(1, 0, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("HARU_HOST");
        std::env::remove_var("HARU_PORT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("WEATHER_CITY");
        std::env::remove_var("WEATHER_BASE_URL");
        std::env::remove_var("WEATHER_TIMEOUT_SECS");
        std::env::remove_var("WEATHER_REFRESH_AT");

        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "file:haru.db");
        assert_eq!(config.weather.city, "seoul");
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org");
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(
            config.refresh.refresh_at,
            NaiveTime::from_hms_opt(1, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("HARU_PORT", "8080");
        std::env::set_var("WEATHER_CITY", "busan");
        std::env::set_var("WEATHER_TIMEOUT_SECS", "10");
        std::env::set_var("WEATHER_REFRESH_AT", "03:30");

        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.weather.city, "busan");
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(
            config.refresh.refresh_at,
            NaiveTime::from_hms_opt(3, 30, 0).unwrap()
        );

        std::env::remove_var("HARU_PORT");
        std::env::remove_var("WEATHER_CITY");
        std::env::remove_var("WEATHER_TIMEOUT_SECS");
        std::env::remove_var("WEATHER_REFRESH_AT");
    }

    #[test]
    fn test_refresh_at_with_seconds() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("WEATHER_REFRESH_AT", "23:15:30");
        let config = Config::default();
        assert_eq!(
            config.refresh.refresh_at,
            NaiveTime::from_hms_opt(23, 15, 30).unwrap()
        );
        std::env::remove_var("WEATHER_REFRESH_AT");
    }

    #[test]
    fn test_refresh_at_invalid_falls_back() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("WEATHER_REFRESH_AT", "not-a-time");
        let config = Config::default();
        assert_eq!(
            config.refresh.refresh_at,
            NaiveTime::from_hms_opt(1, 0, 0).unwrap()
        );
        std::env::remove_var("WEATHER_REFRESH_AT");
    }

    #[test]
    fn test_api_key_defaults_empty() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("OPENWEATHERMAP_API_KEY");
        let config = Config::default();
        assert!(config.weather.api_key.is_empty());
    }

    #[test]
    fn test_parse_env_or_invalid_value_uses_default() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("__TEST_HARU_PORT", "not-a-port");
        let result: u16 = parse_env_or("__TEST_HARU_PORT", 3000);
        assert_eq!(result, 3000);
        std::env::remove_var("__TEST_HARU_PORT");
    }
}
