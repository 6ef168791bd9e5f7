pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::UserRepository;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./users.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite("./users.db")
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }

    /// Private in-memory SQLite database
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut opts = ConnectOptions::new(config.url.clone());
    opts.sqlx_logging(false);
    if config.is_in_memory() {
        // every pooled connection would otherwise get its own empty database
        opts.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Connect and bring the schema up to date.
pub async fn init_and_migrate(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db = init_database(config).await?;

    info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    info!("Migrations completed");

    Ok(db)
}
