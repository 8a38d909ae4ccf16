//! Haru: a self-hostable weather diary service.
//!
//! Diary entries are plain text tied to a calendar date. At write time the
//! service resolves that date's weather from its local weather table (filled
//! once a day by a background job) or, failing that, a live provider fetch,
//! and embeds a snapshot of it in the entry.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod weather;
