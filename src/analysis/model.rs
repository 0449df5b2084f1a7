use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extractor::PageSignals;
use crate::fetcher::FetchError;
use crate::probe::{LinkHealth, SiteFiles};

/// Progress of one URL through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Pending,
    Fetched,
    Parsed,
    Extracted,
    Scored,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Fetched => "fetched",
            Self::Parsed => "parsed",
            Self::Extracted => "extracted",
            Self::Scored => "scored",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Everything known about a page that was fetched successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub final_url: String,
    pub status_code: u16,
    pub load_time_seconds: f64,
    #[serde(flatten)]
    pub signals: PageSignals,
    #[serde(flatten)]
    pub link_health: LinkHealth,
    #[serde(flatten)]
    pub site_files: SiteFiles,
}

/// One record per analyzed URL. Serializes to a single flat mapping.
///
/// `page` is `Some` exactly when `analysis_successful` is true, and `error`
/// is `Some` exactly when it is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub analysis_successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub page: Option<PageAnalysis>,
}

impl AnalysisResult {
    pub fn success(url: impl Into<String>, timestamp: DateTime<Utc>, page: PageAnalysis) -> Self {
        Self {
            url: url.into(),
            timestamp,
            analysis_successful: true,
            error: None,
            page: Some(page),
        }
    }

    pub fn failure(url: impl Into<String>, timestamp: DateTime<Utc>, error: &FetchError) -> Self {
        Self {
            url: url.into(),
            timestamp,
            analysis_successful: false,
            error: Some(format!("failed to fetch page: {error}")),
            page: None,
        }
    }

    pub fn page(&self) -> Option<&PageAnalysis> {
        self.page.as_ref()
    }

    pub fn signals(&self) -> Option<&PageSignals> {
        self.page.as_ref().map(|page| &page.signals)
    }
}
