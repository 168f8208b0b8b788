use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};
use tokio::sync::OnceCell;

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
        }
    }
}

/// Process-wide database handle.
///
/// The pool is created on first use and then reused by every caller for the
/// rest of the process; it is never torn down explicitly. Share it through an
/// `Arc`.
///
/// # Example
/// ```ignore
/// let connections = Arc::new(DatabaseConnections::lazy(config));
/// // first call connects, later calls reuse the pool
/// let db = connections.main().await?;
/// ```
pub struct DatabaseConnections {
    config: Option<DatabaseConfig>,
    main: OnceCell<DbConn>,
}

impl DatabaseConnections {
    /// Defer connecting until the first query.
    pub fn lazy(config: DatabaseConfig) -> Self {
        Self {
            config: Some(config),
            main: OnceCell::new(),
        }
    }

    /// Wrap an already-open connection (used with SeaORM's mock backend).
    pub fn from_connection(conn: DbConn) -> Self {
        Self {
            config: None,
            main: OnceCell::from(conn),
        }
    }

    /// Reuse the pool, or create it if this is the first use.
    ///
    /// Concurrent first callers wait on a single connection attempt; a failed
    /// attempt leaves the cell empty so the next call retries.
    pub async fn main(&self) -> Result<&DbConn, DbErr> {
        self.main
            .get_or_try_init(|| async {
                let config = self.config.as_ref().ok_or_else(|| {
                    DbErr::Custom("database connection is not configured".to_string())
                })?;
                Self::connect(config).await
            })
            .await
    }

    /// Whether the pool has been created yet.
    pub fn is_connected(&self) -> bool {
        self.main.initialized()
    }

    /// Take the connection back, if one was opened.
    pub fn into_connection(self) -> Option<DbConn> {
        self.main.into_inner()
    }

    async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .sqlx_logging(false)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connected"
        );
        Ok(conn)
    }
}
