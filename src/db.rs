use std::str::FromStr;

use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::schema::TABLES;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

/// Row counts and date bounds of the loaded dataset.
#[derive(Debug, PartialEq, sqlx::FromRow)]
pub struct Summary {
    pub stations: i64,
    pub measurements: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl Database {
    /// Opens a read-only pool against an existing database file.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("{url} is not a valid sqlite url"))?
            .create_if_missing(false)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("error connecting to {url}"))?;

        Ok(Database { pool })
    }

    /// Fails unless every table and column in `TABLES` is present.
    pub async fn verify_schema(&self) -> anyhow::Result<()> {
        for (table, columns) in TABLES {
            let query = format!("SELECT {} FROM {table} LIMIT 0;", columns.join(", "));
            sqlx::query(&query)
                .execute(&self.pool)
                .await
                .with_context(|| format!("table {table} must have columns {}", columns.join(", ")))?;
        }
        Ok(())
    }

    pub async fn summary(&self) -> anyhow::Result<Summary> {
        let summary = sqlx::query_as(
            "
            SELECT
                (SELECT COUNT(*) FROM stations) AS stations,
                (SELECT COUNT(*) FROM measurements) AS measurements,
                (SELECT MIN(date) FROM measurements) AS first_date,
                (SELECT MAX(date) FROM measurements) AS last_date;
        ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
