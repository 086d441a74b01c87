pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{AiService, EnrichmentService};
pub use domain::property::{FieldValue, PropertyRecord};
pub use domain::query::{QueryPage, QueryParameters, QueryProcessor, SortOrder, TextMatch};
pub use infra::config::AppConfig;
pub use storage::{InMemoryRecordStore, InMemoryResponseCache, RecordStore, ResponseCache};
