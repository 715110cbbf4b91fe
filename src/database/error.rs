use sqlx::error::DatabaseError;
use sqlx::mysql::MySqlDatabaseError;
use sqlx::sqlite::SqliteError;
use std::time::Duration;
use thiserror::Error;

// mysql server errors that mean the session was never established
const MYSQL_ACCESS_DENIED: u16 = 1045;
const MYSQL_DB_ACCESS_DENIED: u16 = 1044;
const MYSQL_SOCKET_UNREACHABLE: u16 = 2002;
const MYSQL_HOST_UNREACHABLE: u16 = 2003;

// primary sqlite result codes, the extended code carries them in its low byte
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_NOTADB: i32 = 26;

/// Failures surfaced by a record store.
///
/// A missing row is not an error: update and delete report it as an affected-count of 0.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("round trip exceeded {0:?}")]
    Timeout(Duration),

    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    #[error("unsupported database url scheme: {0}")]
    UnsupportedUrl(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::ConstraintViolation(db_err.message().to_string())
            }
            sqlx::Error::Database(ref db_err) if refuses_connection(&**db_err) => {
                StoreError::Connection(err)
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(err),
            _ => StoreError::Query(err),
        }
    }
}

/// Whether a server-reported error means the store could not be reached or authenticated to.
fn refuses_connection(db_err: &(dyn DatabaseError + 'static)) -> bool {
    if let Some(mysql_err) = db_err.try_downcast_ref::<MySqlDatabaseError>() {
        return mysql_refuses_connection(mysql_err.number(), mysql_err.code());
    }
    if db_err.try_downcast_ref::<SqliteError>().is_some() {
        return db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(sqlite_cannot_open);
    }
    false
}

pub(crate) fn mysql_refuses_connection(number: u16, sqlstate: Option<&str>) -> bool {
    matches!(
        number,
        MYSQL_ACCESS_DENIED
            | MYSQL_DB_ACCESS_DENIED
            | MYSQL_SOCKET_UNREACHABLE
            | MYSQL_HOST_UNREACHABLE
    ) || sqlstate == Some("28000")
}

pub(crate) fn sqlite_cannot_open(extended_code: i32) -> bool {
    matches!(extended_code & 0xff, SQLITE_CANTOPEN | SQLITE_NOTADB)
}
