//! Postgres operations for themes, scores, and signal windows

use crate::config;
use crate::models::{
    Category, Confidence, Criterion, Score, ScoreUpdate, SignalRecord, Theme, ThemeSignal,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_postgres::{Client, NoTls};

type DbError = Box<dyn std::error::Error + Send + Sync>;

pub struct ThemeDatabase {
    client: Arc<RwLock<Option<Client>>>,
}

impl ThemeDatabase {
    pub async fn new() -> Result<Self, DbError> {
        let database_url = config::get_database_url();
        let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
            .await
            .map_err(|e| {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("Failed to connect to Postgres: {}", e),
                )) as DbError
            })?;

        // Spawn connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "Postgres connection error");
            }
        });

        let db = Self {
            client: Arc::new(RwLock::new(Some(client))),
        };

        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let statements = [
                "CREATE TABLE IF NOT EXISTS themes (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    pillar TEXT NOT NULL,
                    sector TEXT NOT NULL,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
                "CREATE TABLE IF NOT EXISTS categories (
                    id BIGSERIAL PRIMARY KEY,
                    code TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    weight DOUBLE PRECISION NOT NULL,
                    display_order INT NOT NULL DEFAULT 0
                )",
                "CREATE TABLE IF NOT EXISTS criteria (
                    id BIGSERIAL PRIMARY KEY,
                    category_id BIGINT NOT NULL REFERENCES categories(id),
                    name TEXT NOT NULL,
                    weight DOUBLE PRECISION NOT NULL,
                    display_order INT NOT NULL DEFAULT 0
                )",
                "CREATE TABLE IF NOT EXISTS scores (
                    theme_id BIGINT NOT NULL REFERENCES themes(id) ON DELETE CASCADE,
                    criteria_id BIGINT NOT NULL REFERENCES criteria(id),
                    score DOUBLE PRECISION,
                    confidence TEXT,
                    notes TEXT,
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    update_source TEXT,
                    PRIMARY KEY (theme_id, criteria_id)
                )",
                "CREATE TABLE IF NOT EXISTS processed_signals (
                    id BIGSERIAL PRIMARY KEY,
                    source TEXT NOT NULL,
                    signal_type TEXT,
                    countries TEXT[] NOT NULL DEFAULT '{}',
                    deal_size TEXT,
                    published_at TIMESTAMPTZ NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
                "CREATE TABLE IF NOT EXISTS theme_signals (
                    theme_id BIGINT NOT NULL REFERENCES themes(id) ON DELETE CASCADE,
                    processed_signal_id BIGINT NOT NULL REFERENCES processed_signals(id),
                    relevance_score DOUBLE PRECISION NOT NULL DEFAULT 0,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    PRIMARY KEY (theme_id, processed_signal_id)
                )",
            ];

            for statement in statements {
                c.execute(statement, &[]).await.map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to initialize schema: {}",
                        e
                    ))) as DbError
                })?;
            }
        }

        Ok(())
    }

    /// Check if the Postgres connection is available
    pub async fn is_available(&self) -> bool {
        let client = self.client.read().await;
        client.is_some()
    }

    /// List active themes, optionally filtered by pillar
    pub async fn get_themes(&self, pillar: Option<&str>) -> Result<Vec<Theme>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let query = "SELECT id, name, pillar, sector, is_active, created_at, updated_at
                 FROM themes
                 WHERE is_active";
            let rows = if let Some(p) = pillar {
                let query = format!("{} AND pillar = $1 ORDER BY name", query);
                c.query(&query, &[&p]).await
            } else {
                let query = format!("{} ORDER BY name", query);
                c.query(&query, &[]).await
            }
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to query themes: {}",
                    e
                ))) as DbError
            })?;

            Ok(rows.iter().map(theme_from_row).collect())
        } else {
            Ok(Vec::new())
        }
    }

    /// Get a theme by ID
    pub async fn get_theme(&self, id: i64) -> Result<Theme, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = c
                .query(
                    "SELECT id, name, pillar, sector, is_active, created_at, updated_at
                     FROM themes WHERE id = $1",
                    &[&id],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to query theme: {}",
                        e
                    ))) as DbError
                })?;

            rows.first().map(theme_from_row).ok_or_else(|| {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Theme {} not found", id),
                )) as DbError
            })
        } else {
            Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Database client not available",
            )))
        }
    }

    /// Load the full scoring framework: categories with nested criteria,
    /// both in display order
    pub async fn get_framework(&self) -> Result<Vec<Category>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let category_rows = c
                .query(
                    "SELECT id, code, name, weight, display_order
                     FROM categories ORDER BY display_order",
                    &[],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to query categories: {}",
                        e
                    ))) as DbError
                })?;

            let criterion_rows = c
                .query(
                    "SELECT id, category_id, name, weight, display_order
                     FROM criteria ORDER BY display_order",
                    &[],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to query criteria: {}",
                        e
                    ))) as DbError
                })?;

            let mut categories: Vec<Category> = category_rows
                .iter()
                .map(|row| Category {
                    id: row.get(0),
                    code: row.get(1),
                    name: row.get(2),
                    weight: row.get(3),
                    display_order: row.get(4),
                    criteria: Vec::new(),
                })
                .collect();

            for row in &criterion_rows {
                let criterion = Criterion {
                    id: row.get(0),
                    category_id: row.get(1),
                    name: row.get(2),
                    weight: row.get(3),
                    display_order: row.get(4),
                };
                if let Some(category) = categories
                    .iter_mut()
                    .find(|cat| cat.id == criterion.category_id)
                {
                    category.criteria.push(criterion);
                }
            }

            Ok(categories)
        } else {
            Ok(Vec::new())
        }
    }

    /// Get all scores for one theme
    pub async fn get_theme_scores(&self, theme_id: i64) -> Result<Vec<Score>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = c
                .query(
                    "SELECT theme_id, criteria_id, score, confidence, notes, updated_at, update_source
                     FROM scores WHERE theme_id = $1",
                    &[&theme_id],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to query scores: {}",
                        e
                    ))) as DbError
                })?;

            Ok(rows.iter().map(score_from_row).collect())
        } else {
            Ok(Vec::new())
        }
    }

    /// Upsert a score keyed by (theme_id, criteria_id)
    pub async fn upsert_score(&self, score: &Score) -> Result<Score, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let confidence_str = score.confidence.map(|conf| conf.as_str());
            let rows = c
                .query(
                    "INSERT INTO scores (theme_id, criteria_id, score, confidence, notes, updated_at, update_source)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     ON CONFLICT (theme_id, criteria_id) DO UPDATE SET
                         score = EXCLUDED.score,
                         confidence = EXCLUDED.confidence,
                         notes = EXCLUDED.notes,
                         updated_at = EXCLUDED.updated_at,
                         update_source = EXCLUDED.update_source
                     RETURNING theme_id, criteria_id, score, confidence, notes, updated_at, update_source",
                    &[
                        &score.theme_id,
                        &score.criteria_id,
                        &score.value,
                        &confidence_str,
                        &score.notes,
                        &score.updated_at,
                        &score.update_source,
                    ],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to upsert score: {}",
                        e
                    ))) as DbError
                })?;

            rows.first().map(score_from_row).ok_or_else(|| {
                Box::new(std::io::Error::other("Upsert returned no row")) as DbError
            })
        } else {
            Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Database client not available",
            )))
        }
    }

    /// Theme-signal join rows created since the given instant, with the
    /// nested processed signal
    pub async fn get_signal_window(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ThemeSignal>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = c
                .query(
                    "SELECT ts.theme_id, ts.relevance_score, ts.created_at,
                            s.source, s.signal_type, s.countries, s.deal_size, s.published_at
                     FROM theme_signals ts
                     JOIN processed_signals s ON s.id = ts.processed_signal_id
                     WHERE ts.created_at >= $1
                     ORDER BY ts.created_at",
                    &[&since],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to query signal window: {}",
                        e
                    ))) as DbError
                })?;

            let signals = rows
                .iter()
                .map(|row| ThemeSignal {
                    theme_id: row.get(0),
                    relevance_score: row.get(1),
                    created_at: row.get(2),
                    signal: SignalRecord {
                        source: row.get(3),
                        signal_type: row.get(4),
                        countries: row.get(5),
                        deal_size: row.get(6),
                        published_at: row.get(7),
                    },
                })
                .collect();

            Ok(signals)
        } else {
            Ok(Vec::new())
        }
    }

    /// Score updates with a present value since the given instant,
    /// oldest first
    pub async fn get_score_updates(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ScoreUpdate>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = c
                .query(
                    "SELECT theme_id, score, updated_at
                     FROM scores
                     WHERE score IS NOT NULL AND updated_at >= $1
                     ORDER BY updated_at",
                    &[&since],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to query score updates: {}",
                        e
                    ))) as DbError
                })?;

            let updates = rows
                .iter()
                .map(|row| ScoreUpdate {
                    theme_id: row.get(0),
                    value: row.get(1),
                    updated_at: row.get(2),
                })
                .collect();

            Ok(updates)
        } else {
            Ok(Vec::new())
        }
    }
}

fn theme_from_row(row: &tokio_postgres::Row) -> Theme {
    Theme {
        id: row.get(0),
        name: row.get(1),
        pillar: row.get(2),
        sector: row.get(3),
        is_active: row.get(4),
        created_at: row.get(5),
        updated_at: row.get(6),
    }
}

fn score_from_row(row: &tokio_postgres::Row) -> Score {
    let confidence: Option<String> = row.get(3);
    Score {
        theme_id: row.get(0),
        criteria_id: row.get(1),
        value: row.get(2),
        confidence: confidence.as_deref().and_then(Confidence::parse),
        notes: row.get(4),
        updated_at: row.get(5),
        update_source: row.get(6),
    }
}
