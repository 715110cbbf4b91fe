pub mod forms;
pub mod records;
