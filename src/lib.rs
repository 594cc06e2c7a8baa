//! Themetrix — theme momentum and scoring intelligence engine.
//!
//! Two pure cores — the weighted score aggregator and the theme momentum
//! calculator — wrapped in an axum HTTP surface over a Postgres store.

pub mod config;
pub mod core;
pub mod db;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod momentum;
pub mod scoring;
