use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateRecordRequest {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct RenameRecordRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CreatedRecord {
    pub id: i64,
}

/// How many rows an update or delete touched. 0 means the id wasn't there.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct AffectedRows {
    pub affected: u64,
}
