use crate::config::MySqlSettings;
use crate::database::{
    DELETE_RECORD, INSERT_RECORD, RecordRepository, RecordStream, SELECT_RECORDS, StoreError,
    UPDATE_RECORD, bounded_rows, round_trip,
};
use crate::domain::Record;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{MySql, Pool};
use std::time::Duration;
use tracing::debug;

pub struct MySqlRepository {
    pool: Pool<MySql>,
    timeout: Duration,
}

pub fn connect_options(settings: &MySqlSettings) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .database(&settings.database)
        .username(&settings.username)
        .password(&settings.password)
        .charset(&settings.charset)
}

impl MySqlRepository {
    pub fn new(pool: Pool<MySql>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub async fn connect_with(
        options: MySqlConnectOptions,
        max_connections: u32,
        min_connections: u32,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool, timeout))
    }
}

#[async_trait]
impl RecordRepository for MySqlRepository {
    async fn create(&self, id: i64, name: &str) -> Result<i64, StoreError> {
        let query = sqlx::query(INSERT_RECORD)
            .bind(id)
            .bind(name)
            .execute(&self.pool);
        let result = round_trip(self.timeout, query).await?;

        // last_insert_id is only meaningful for AUTO_INCREMENT columns, the caller's id is the key
        debug!(id, rows = result.rows_affected(), "inserted record");
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
