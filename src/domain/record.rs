use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

/// One row of the `user_info` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, Display)]
#[display("{}:{}", id, name)]
pub struct Record {
    pub id: i64,
    pub name: String,
}
