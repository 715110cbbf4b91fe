use crate::config::{AppConfig, DatabaseTarget};
use crate::domain::Record;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub mod error;
pub mod mysql;
pub mod sqlite;

pub use error::StoreError;

/// Rows pulled from the store on demand.
pub type RecordStream<'a> = BoxStream<'a, Result<Record, StoreError>>;

// the sql is shared between engines; every value is bound, never formatted in
pub(crate) const INSERT_RECORD: &str = "INSERT INTO user_info (id, name) VALUES (?, ?)";
pub(crate) const SELECT_RECORDS: &str = "SELECT id, name FROM user_info";
pub(crate) const UPDATE_RECORD: &str = "UPDATE user_info SET name = ? WHERE id = ?";
pub(crate) const DELETE_RECORD: &str = "DELETE FROM user_info WHERE id = ?";

// a record store can be shared between tasks, sqlx::Pool is thread safe
// engine specific implementations live in "mysql.rs" and "sqlite.rs"
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Inserts a new record and echoes its id. Fails with `ConstraintViolation` if the id exists.
    async fn create(&self, id: i64, name: &str) -> Result<i64, StoreError>;

    /// Scans the whole table. Each call runs the scan again.
    fn list(&self) -> RecordStream<'_>;

    /// Renames the record with `id`, returning how many rows changed (0 or 1).
    async fn update(&self, id: i64, name: &str) -> Result<u64, StoreError>;

    /// Removes the record with `id`, returning how many rows went away (0 or 1).
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;

    /// Releases the underlying connections. Later calls fail with `Connection`.
    async fn close(&self);
}

/// Opens the configured store. The engine is picked from the target.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn RecordRepository>, StoreError> {
    info!(
        "Connecting to record store at {} (max_connections={}, min_connections={})",
        config.database.describe(),
        config.max_connections,
        config.min_connections
    );

    match &config.database {
        DatabaseTarget::MySql(settings) => {
            let repo = mysql::MySqlRepository::connect_with(
                mysql::connect_options(settings),
                config.max_connections,
                config.min_connections,
                config.query_timeout,
            )
            .await?;
            Ok(Arc::new(repo))
        }
        DatabaseTarget::Url(url) if url.starts_with("mysql:") => {
            let options: sqlx::mysql::MySqlConnectOptions = url.parse()?;
            let repo = mysql::MySqlRepository::connect_with(
                options,
                config.max_connections,
                config.min_connections,
                config.query_timeout,
            )
            .await?;
            Ok(Arc::new(repo))
        }
        DatabaseTarget::Url(url) if url.starts_with("sqlite:") => {
            let options: sqlx::sqlite::SqliteConnectOptions = url.parse()?;
            let repo = sqlite::SqliteRepository::connect_with(
                options,
                config.max_connections,
                config.min_connections,
                config.query_timeout,
            )
            .await?;
            Ok(Arc::new(repo))
        }
        DatabaseTarget::Url(url) => Err(StoreError::UnsupportedUrl(
            url.split(':').next().unwrap_or_default().to_string(),
        )),
    }
}

/// Runs one round trip, failing with `Timeout` once `limit` passes.
pub(crate) async fn round_trip<T, F>(limit: Duration, query: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}

/// Bounds every row fetch of a driver stream by `limit`.
/// The first error (or timeout) is yielded and then the stream ends.
pub(crate) fn bounded_rows<'a, S>(rows: S, limit: Duration) -> RecordStream<'a>
where
    S: Stream<Item = Result<Record, sqlx::Error>> + Send + 'a,
{
    stream::unfold(Some(Box::pin(rows)), move |state| async move {
        let mut rows = state?;
        match tokio::time::timeout(limit, rows.next()).await {
            Ok(Some(Ok(record))) => Some((Ok(record), Some(rows))),
            Ok(Some(Err(e))) => Some((Err(StoreError::from(e)), None)),
            Ok(None) => None,
            Err(_) => Some((Err(StoreError::Timeout(limit)), None)),
        }
    })
    .boxed()
}
