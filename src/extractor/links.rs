use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::extractor::model::LinkSignals;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Host plus explicit port, the part two URLs must share to be "the same site".
pub fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Resolve one `href` against the page URL with any fragment removed.
///
/// Returns `None` for empty and fragment-only hrefs and for hrefs that do not
/// form a valid URL.
pub fn resolve_href(base_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(mut resolved) => {
            resolved.set_fragment(None);
            Some(resolved)
        }
        Err(e) => {
            debug!(href, error = %e, "skipping unresolvable href");
            None
        }
    }
}

/// Partition every anchor into internal and external links by comparing its
/// authority with the page's.
pub fn extract(document: &Html, base_url: &Url) -> LinkSignals {
    let base_authority = authority(base_url);

    let mut total_link_tags = 0;
    let mut internal_links = Vec::new();
    let mut external_links = Vec::new();
    let mut seen_internal = HashSet::new();
    let mut seen_external = HashSet::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(resolved) = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve_href(base_url, href))
        else {
            continue;
        };
        total_link_tags += 1;

        let is_internal = authority(&resolved) == base_authority;
        let resolved = String::from(resolved);
        if is_internal {
            if seen_internal.insert(resolved.clone()) {
                internal_links.push(resolved);
            }
        } else if seen_external.insert(resolved.clone()) {
            external_links.push(resolved);
        }
    }

    LinkSignals {
        total_link_tags,
        internal_links_count: internal_links.len(),
        external_links_count: external_links.len(),
        internal_links,
        external_links,
    }
}
