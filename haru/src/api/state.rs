use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::services::DiaryService;
use crate::weather::{CurrentWeather, WeatherCache};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub diary: DiaryService,
    pub weather: WeatherCache,
}

impl AppState {
    pub fn new(config: Config, db: Database, client: Arc<dyn CurrentWeather>) -> Self {
        let config = Arc::new(config);
        let diary = DiaryService::new(db.clone(), client.clone());
        let weather = WeatherCache::new(db.clone(), client);

        Self {
            config,
            db,
            diary,
            weather,
        }
    }
}
