mod diary;
mod refresh;

pub use diary::DiaryService;
pub use refresh::WeatherRefreshManager;
