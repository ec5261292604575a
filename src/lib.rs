//! CLI-Mate Library
//!
//! Resolves US weather forecasts by city and state (Nominatim geocoding, then the
//! weather.gov points and forecast endpoints), caches them on disk for a bounded
//! time and renders them to the terminal.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod ui;
