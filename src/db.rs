use sqlx::{postgres::PgPoolOptions, PgPool};

/// Owns the PostgreSQL connection pool.
///
/// Constructed once at startup and closed explicitly at shutdown; every
/// repository receives the pool from here rather than reaching for a
/// process-wide handle.
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        // Connectivity sanity check before serving traffic
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Closes the pool, waiting for in-flight connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
