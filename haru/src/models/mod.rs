mod diary;
mod weather;

pub use diary::*;
pub use weather::*;
