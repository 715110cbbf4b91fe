use crate::database::{RecordRepository, StoreError};
use crate::domain::Record;
use futures::TryStreamExt;
use tracing::info;

pub const WALKTHROUGH_ID: i64 = 3;
pub const ORIGINAL_NAME: &str = "peter";
pub const RENAMED_NAME: &str = "zhangqi";

/// What the scripted run saw at each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkthroughReport {
    pub after_create: Vec<Record>,
    pub renamed: u64,
    pub after_rename: Vec<Record>,
    pub deleted: u64,
    pub after_delete: Vec<Record>,
}

/// Inserts a record, renames it, then deletes it, listing the table after every write.
/// Stops at the first store error.
pub async fn run_walkthrough(store: &dyn RecordRepository) -> Result<WalkthroughReport, StoreError> {
    let id = store.create(WALKTHROUGH_ID, ORIGINAL_NAME).await?;
    info!("Inserted record {}", id);
    let after_create = snapshot(store).await?;

    let renamed = store.update(WALKTHROUGH_ID, RENAMED_NAME).await?;
    info!("Updated {} record(s)", renamed);
    let after_rename = snapshot(store).await?;

    let deleted = store.delete(WALKTHROUGH_ID).await?;
    info!("Deleted {} record(s)", deleted);
    let after_delete = snapshot(store).await?;

    Ok(WalkthroughReport {
        after_create,
        renamed,
        after_rename,
        deleted,
        after_delete,
    })
}

async fn snapshot(store: &dyn RecordRepository) -> Result<Vec<Record>, StoreError> {
    let records: Vec<Record> = store.list().try_collect().await?;
    for record in &records {
        info!("Listed record {}", record);
    }
    info!("Listed {} record(s)", records.len());
    Ok(records)
}
