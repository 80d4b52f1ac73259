mod config;
mod repos;

pub use config::{Config, MqConfig};
pub use repos::{IEventRepo, InMemoryEventRepo, PostgresEventRepo, Repos};

use sqlx::postgres::PgPoolOptions;

/// Dependency carrier handed to every use case and background task.
///
/// Components receive their repositories and configuration through this
/// struct instead of reaching into process-wide state.
#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    pub config: Config,
}

impl Context {
    /// A context backed by the in-memory storage, mainly for tests.
    pub fn create_inmemory(config: Config) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config,
        }
    }
}

/// Set up the infrastructure context from the environment.
pub async fn setup_context() -> anyhow::Result<Context> {
    let config = Config::new();
    let repos = Repos::create(&config).await?;
    Ok(Context { repos, config })
}

pub async fn run_migration(connection_string: &str) -> anyhow::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    Ok(())
}
