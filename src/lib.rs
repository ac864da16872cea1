pub mod analysis;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod net;

pub use analysis::{ContentAnalysisResult, ContentAnalyzer};
pub use config::AnalysisConfig;
pub use engine::pipeline::{AuditEngine, PageAudit, PageSource};
pub use error::AuditError;
