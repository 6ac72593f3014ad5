use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

pub mod migrator;
pub mod query;
pub mod repositories;

pub use repositories::facility::FacilityRepository;

/// Failure to obtain the shared database handle.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database connection failed: {0}")]
    Connection(#[source] DbErr),

    #[error("Database connection timed out after {0:?}")]
    Timeout(Duration),
}

/// Owner of the process-wide connection pool.
///
/// The pool is created on the first successful [`acquire`](Self::acquire)
/// and shared by every clone afterwards. A failed attempt leaves the manager
/// empty, so the next lookup tries again.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

struct Inner {
    config: DatabaseConfig,
    conn: OnceCell<Arc<DatabaseConnection>>,
}

impl ConnectionManager {
    #[must_use]
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                conn: OnceCell::new(),
            }),
        }
    }

    /// Wraps an already-open connection, e.g. a mock database in tests.
    #[must_use]
    pub fn from_connection(conn: Arc<DatabaseConnection>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: DatabaseConfig::default(),
                conn: OnceCell::new_with(Some(conn)),
            }),
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.conn.initialized()
    }

    pub async fn acquire(&self) -> Result<Arc<DatabaseConnection>, ConnectError> {
        self.inner
            .conn
            .get_or_try_init(|| Self::connect(&self.inner.config))
            .await
            .map(Arc::clone)
    }

    async fn connect(config: &DatabaseConfig) -> Result<Arc<DatabaseConnection>, ConnectError> {
        let url = config
            .connection_url()
            .map_err(ConnectError::Configuration)?;
        let timeout = config.connect_timeout();
        if timeout.is_zero() {
            return Err(ConnectError::Configuration(
                "connect_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false);

        let conn = match tokio::time::timeout(timeout, Database::connect(opt)).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => {
                warn!(target_db = %config.describe(), error = %e, "Database connection failed");
                return Err(ConnectError::Connection(e));
            }
            Err(_) => {
                warn!(target_db = %config.describe(), ?timeout, "Database connection timed out");
                return Err(ConnectError::Timeout(timeout));
            }
        };

        info!(
            "Database connected: {} (pool: {}-{})",
            config.describe(),
            config.min_connections,
            config.max_connections
        );

        Ok(Arc::new(conn))
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let conn = self.acquire().await?;
        let backend = conn.get_database_backend();
        conn.query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Creates the facility table on a development database.
    pub async fn init_schema(&self) -> anyhow::Result<()> {
        use sea_orm_migration::MigratorTrait;

        let conn = self.acquire().await?;
        migrator::Migrator::up(&*conn, None).await?;
        info!("Facility schema applied");
        Ok(())
    }

    pub async fn facilities(&self) -> Result<FacilityRepository, ConnectError> {
        Ok(FacilityRepository::new(self.acquire().await?))
    }
}
