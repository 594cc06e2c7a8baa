//! Persistence layer for themes, the scoring framework, and signals.

pub mod postgres;

pub use postgres::ThemeDatabase;
