pub mod config;
pub mod llm;
pub mod logging;
pub mod property_data;
