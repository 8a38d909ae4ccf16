mod connection;
pub mod repository;
pub(crate) mod schema;

pub use connection::Database;
pub use repository::{DiaryRepository, WeatherRepository};
