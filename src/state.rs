use std::env;

use migration::{Migrator, MigratorTrait};

use crate::prelude::*;

pub struct Config {
  pub database_url: String,
  pub port: u16,
}

impl Config {
  pub fn from_env() -> Self {
    let database_url = env::var("DATABASE_URL")
      .unwrap_or_else(|_| "sqlite:boxoffice.db?mode=rwc".into());
    let port =
      env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);

    Self { database_url, port }
  }
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    info!("Database ready at {}", config.database_url);
    Ok(Self { db, config })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_migrations_apply_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = Config {
      database_url: format!("sqlite://{}?mode=rwc", path.display()),
      port: 0,
    };

    let state = AppState::new(config).await.unwrap();

    // re-running the migrator against an up-to-date schema is a no-op
    Migrator::up(&state.db, None).await.unwrap();
  }
}
