mod cache;
mod client;

pub use cache::WeatherCache;
pub use client::{CurrentWeather, OpenWeatherMapClient};
