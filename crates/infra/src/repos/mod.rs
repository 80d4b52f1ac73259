mod event;

pub use event::{IEventRepo, InMemoryEventRepo, PostgresEventRepo};

use crate::config::Config;
use anyhow::{anyhow, Context as _};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
}

impl std::fmt::Debug for Repos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repos").finish_non_exhaustive()
    }
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
        }
    }

    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool)),
        })
    }

    /// Select a storage backend by its configured discriminator.
    pub async fn create(config: &Config) -> anyhow::Result<Self> {
        match config.storage_kind.as_str() {
            "in-memory" => Ok(Self::create_inmemory()),
            "pgsql" => {
                let connection_string = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL must be set for the pgsql storage kind")?;
                Self::create_postgres(connection_string).await
            }
            other => Err(anyhow!("unsupported storage kind {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn factory_rejects_unknown_storage_kind() {
        let config = Config {
            storage_kind: "cassandra".into(),
            ..Config::new()
        };
        let res = Repos::create(&config).await;
        assert!(res
            .unwrap_err()
            .to_string()
            .contains("unsupported storage kind"));
    }

    #[tokio::test]
    async fn factory_builds_the_inmemory_backend() {
        let config = Config {
            storage_kind: "in-memory".into(),
            ..Config::new()
        };
        assert!(Repos::create(&config).await.is_ok());
    }
}
