pub mod analyzer;
pub mod model;
pub mod summary;

pub use analyzer::Analyzer;
pub use model::{AnalysisResult, PageAnalysis, Stage};
pub use summary::{BatchSummary, parse_url_list};
