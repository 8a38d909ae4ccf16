mod diaries;
mod weather;

pub use diaries::DiaryRepository;
pub use weather::WeatherRepository;
