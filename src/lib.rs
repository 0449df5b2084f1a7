pub mod analysis;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod probe;
pub mod score;

pub use analysis::{AnalysisResult, Analyzer, BatchSummary};
pub use config::Config;
pub use score::{ScoreBreakdown, score};
