pub mod ai_service;
pub mod enrichment;

pub use ai_service::{AiService, Description, ImageInput, LanguageModel, LlmRequest, VisionAnalysis};
pub use enrichment::{EnrichmentService, PropertyDataSource};
