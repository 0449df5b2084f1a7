use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::fetcher::HttpClient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteFiles {
    pub robots_txt_exists: bool,
    pub sitemap_xml_exists: bool,
    pub robots_txt_url: String,
    pub sitemap_xml_url: String,
}

/// `scheme://host[:port]` of `page_url`, path, query and fragment discarded.
pub fn site_root(page_url: &Url) -> String {
    page_url.origin().ascii_serialization()
}

pub fn well_known_urls(page_url: &Url) -> (String, String) {
    let root = site_root(page_url);
    (format!("{root}/robots.txt"), format!("{root}/sitemap.xml"))
}

async fn exists(client: &HttpClient, url: &str, timeout: Duration) -> bool {
    match client.probe_get(url, timeout).await {
        Ok(status) => status == reqwest::StatusCode::OK,
        Err(e) => {
            debug!(url, error = %e, "well-known probe failed");
            false
        }
    }
}

/// Probe robots.txt and sitemap.xml at the page's origin. Never fails; an
/// unreachable resource is reported as absent.
#[instrument(skip_all, fields(url = %page_url))]
pub async fn check_well_known(client: &HttpClient, page_url: &Url, timeout: Duration) -> SiteFiles {
    let (robots_txt_url, sitemap_xml_url) = well_known_urls(page_url);

    let (robots_txt_exists, sitemap_xml_exists) = tokio::join!(
        exists(client, &robots_txt_url, timeout),
        exists(client, &sitemap_xml_url, timeout),
    );

    SiteFiles {
        robots_txt_exists,
        sitemap_xml_exists,
        robots_txt_url,
        sitemap_xml_url,
    }
}
