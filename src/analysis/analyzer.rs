use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::analysis::model::{AnalysisResult, PageAnalysis, Stage};
use crate::config::Config;
use crate::extractor;
use crate::fetcher::{FetchError, HttpClient};
use crate::probe::{check_well_known, sample_links};
use crate::score::score;

/// Runs the full pipeline for one URL or a batch of them.
///
/// Holds the HTTP session explicitly; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: HttpClient,
    config: Config,
}

fn enter(url: &str, stage: Stage) {
    debug!(url, %stage, "stage");
}

impl Analyzer {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let client = HttpClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Analyze a single URL. Never fails: a page that cannot be fetched
    /// yields a result with `analysis_successful == false`.
    #[instrument(skip(self))]
    pub async fn analyze_url(&self, url: &str) -> AnalysisResult {
        let timestamp = Utc::now();
        enter(url, Stage::Pending);

        let fetched = match Url::parse(url) {
            Ok(base_url) => self
                .client
                .fetch(base_url.as_str(), self.config.fetch_timeout())
                .await
                .map(|response| (base_url, response)),
            Err(e) => Err(FetchError::from(e)),
        };

        let (base_url, response) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(
                    url,
                    error = %e,
                    status = e.status().map(|s| s.as_u16()),
                    "page fetch failed"
                );
                enter(url, Stage::Failed);
                return AnalysisResult::failure(url, timestamp, &e);
            }
        };
        debug!(url, charset = ?response.charset, "document decoded");
        enter(url, Stage::Fetched);

        // The parsed tree is not Send; keep it out of any await.
        let signals = {
            let document = extractor::parse_document(&response.body_utf8);
            enter(url, Stage::Parsed);
            extractor::extract(&document, &base_url)
        };

        let sample = signals.links.combined();
        let (link_health, site_files) = tokio::join!(
            sample_links(
                &self.client,
                &sample,
                self.config.link_sample_limit(),
                self.config.probe_timeout(),
            ),
            check_well_known(&self.client, &base_url, self.config.probe_timeout()),
        );
        enter(url, Stage::Extracted);

        let page = PageAnalysis {
            final_url: response.url_final.to_string(),
            status_code: response.status.as_u16(),
            load_time_seconds: response.load_time_seconds(),
            signals,
            link_health,
            site_files,
        };
        let result = AnalysisResult::success(url, timestamp, page);

        if let Some(scores) = score(&result) {
            enter(url, Stage::Scored);
            debug!(url, overall = scores.overall, "page scored");
        }

        info!("Successfully analyzed: {}", url);
        enter(url, Stage::Done);
        result
    }

    /// Analyze `urls` one after another, in order, pausing between them.
    /// Every input yields exactly one result at the same position.
    pub async fn analyze_urls<S: AsRef<str>>(&self, urls: &[S]) -> Vec<AnalysisResult> {
        let total = urls.len();
        let delay = self.config.batch_delay();
        let mut results = Vec::with_capacity(total);

        for (i, url) in urls.iter().enumerate() {
            let url = url.as_ref();
            info!("Processing URL {}/{}: {}", i + 1, total, url);
            results.push(self.analyze_url(url).await);

            if i + 1 < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        results
    }
}
