use crate::database::{
    DELETE_RECORD, INSERT_RECORD, RecordRepository, RecordStream, SELECT_RECORDS, StoreError,
    UPDATE_RECORD, bounded_rows, round_trip,
};
use crate::domain::Record;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::time::Duration;
use tracing::debug;

// same table, same statements as the mysql store. handy for local runs and tests
pub struct SqliteRepository {
    pool: Pool<Sqlite>,
    timeout: Duration,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub async fn connect_with(
        options: SqliteConnectOptions,
        max_connections: u32,
        min_connections: u32,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool, timeout))
    }
}

#[async_trait]
impl RecordRepository for SqliteRepository {
    async fn create(&self, id: i64, name: &str) -> Result<i64, StoreError> {
        let query = sqlx::query(INSERT_RECORD)
            .bind(id)
            .bind(name)
            .execute(&self.pool);
        round_trip(self.timeout, query).await?;

        debug!(id, "inserted record");
        Ok(id)
    }

    fn list(&self) -> RecordStream<'_> {
        let rows = sqlx::query_as::<_, Record>(SELECT_RECORDS).fetch(&self.pool);
        bounded_rows(rows, self.timeout)
    }

    async fn update(&self, id: i64, name: &str) -> Result<u64, StoreError> {
        let query = sqlx::query(UPDATE_RECORD)
            .bind(name)
            .bind(id)
            .execute(&self.pool);
        let result = round_trip(self.timeout, query).await?;

        debug!(id, affected = result.rows_affected(), "updated record");
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let query = sqlx::query(DELETE_RECORD).bind(id).execute(&self.pool);
        let result = round_trip(self.timeout, query).await?;

        debug!(id, affected = result.rows_affected(), "deleted record");
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
