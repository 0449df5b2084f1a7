use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::model::AnalysisResult;

/// Batch results plus the headline numbers a report starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub analysis_date: DateTime<Utc>,
    pub total_urls: usize,
    pub successful_analyses: usize,
    pub failed_analyses: usize,
    /// Mean over successful results only; 0 when there are none.
    pub average_load_time_seconds: f64,
    pub results: Vec<AnalysisResult>,
}

impl BatchSummary {
    pub fn from_results(results: Vec<AnalysisResult>) -> Self {
        let load_times: Vec<f64> = results
            .iter()
            .filter_map(|r| r.page().map(|page| page.load_time_seconds))
            .collect();
        let successful_analyses = load_times.len();
        let average_load_time_seconds =
            load_times.iter().sum::<f64>() / successful_analyses.max(1) as f64;

        Self {
            analysis_date: Utc::now(),
            total_urls: results.len(),
            successful_analyses,
            failed_analyses: results.len() - successful_analyses,
            average_load_time_seconds,
            results,
        }
    }
}

/// One URL per line; blank lines and `#` comments are skipped.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
