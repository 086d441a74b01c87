pub mod property;
pub mod query;
