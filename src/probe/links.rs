use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::fetcher::HttpClient;

/// Why a sampled link counts as broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrokenReason {
    /// The server answered with a status >= 400.
    Status {
        #[serde(rename = "statusCode")]
        status_code: u16,
    },
    /// No usable answer: DNS, connect, TLS, timeout, redirect loop.
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    #[serde(flatten)]
    pub reason: BrokenReason,
}

/// Outcome of probing a bounded prefix of a page's links.
///
/// `broken_links_count` only covers the sample, never the whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkHealth {
    pub checked_links_count: usize,
    pub broken_links: Vec<BrokenLink>,
    pub broken_links_count: usize,
}

/// HEAD-probe the first `limit` links, one at a time, in the given order.
#[instrument(skip_all, fields(links = links.len(), limit = limit))]
pub async fn sample_links(
    client: &HttpClient,
    links: &[String],
    limit: usize,
    timeout: Duration,
) -> LinkHealth {
    let mut checked_links_count = 0;
    let mut broken_links = Vec::new();

    for link in links.iter().take(limit) {
        checked_links_count += 1;
        match client.probe_head(link, timeout).await {
            Ok(status) if status.as_u16() >= 400 => {
                debug!(url = %link, status = status.as_u16(), "broken link");
                broken_links.push(BrokenLink {
                    url: link.clone(),
                    reason: BrokenReason::Status {
                        status_code: status.as_u16(),
                    },
                });
            }
            Ok(_) => {}
            Err(e) => {
                debug!(url = %link, error = %e, "link probe failed");
                broken_links.push(BrokenLink {
                    url: link.clone(),
                    reason: BrokenReason::Error {
                        error: e.to_string(),
                    },
                });
            }
        }
    }

    LinkHealth {
        checked_links_count,
        broken_links_count: broken_links.len(),
        broken_links,
    }
}
