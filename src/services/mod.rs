pub mod walkthrough;

pub use walkthrough::run_walkthrough;
