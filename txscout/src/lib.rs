pub mod analysis;
pub mod config;
pub mod errors;
pub mod loader;
pub mod metrics;
pub mod results;

pub use crate::analysis::{analyze, MatchResult, Span, Verdict};
pub use crate::config::AnalysisConfig;
pub use crate::errors::{AnalysisError, AnalysisResult};
pub use crate::results::{AnalysisReport, TransmissionReport};
