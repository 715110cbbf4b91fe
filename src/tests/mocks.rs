use crate::database::{RecordRepository, RecordStream, StoreError};
use crate::domain::Record;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use std::sync::{Arc, Mutex};

// --- Manual Mock: RecordRepository ---
// this fakes the database so router tests don't need a real connection
// records are kept in insertion order, like a table scan would return them
#[derive(Clone)]
pub struct MockRepository {
    pub records: Arc<Mutex<Vec<Record>>>,
    // when set, every call fails as if the connection dropped
    pub offline: Arc<Mutex<bool>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            offline: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let repo = Self::new();
        *repo.records.lock().unwrap() = records;
        repo
    }

    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if *self.offline.lock().unwrap() {
            return Err(StoreError::Connection(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordRepository for MockRepository {
    async fn create(&self, id: i64, name: &str) -> Result<i64, StoreError> {
        self.check_online()?;
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id == id) {
            return Err(StoreError::ConstraintViolation(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                id
            )));
        }
        records.push(Record {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    fn list(&self) -> RecordStream<'_> {
        if let Err(e) = self.check_online() {
            return stream::once(async move { Err(e) }).boxed();
        }
        let records = self.records.lock().unwrap().clone();
        stream::iter(records.into_iter().map(Ok)).boxed()
    }

    async fn update(&self, id: i64, name: &str) -> Result<u64, StoreError> {
        self.check_online()?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.name = name.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        self.check_online()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok((before - records.len()) as u64)
    }

    async fn close(&self) {
        self.go_offline();
    }
}
