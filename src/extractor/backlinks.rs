//! Referring-domain hints.
//!
//! Collects the host of every raw `href` that mentions this page's host but
//! points somewhere else. It is a plain substring test on the markup, not a
//! backlink lookup: a page linking to itself through a tracking redirect, or a
//! relative href carrying the host in its query string, both count. Relative
//! hrefs have no host of their own and show up as `""`. Internationalized
//! hosts are matched in both their punycode and Unicode spellings.

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use url::Url;

use crate::extractor::links::authority;
use crate::extractor::model::BacklinkSignals;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Ways the page's authority can be written inside a raw href.
fn authority_spellings(base_url: &Url) -> Vec<String> {
    let ascii = authority(base_url);
    let mut spellings = vec![ascii.clone()];

    if let Some(host) = base_url.host_str() {
        let unicode = url::quirks::domain_to_unicode(host);
        if !unicode.is_empty() {
            let unicode = match base_url.port() {
                Some(port) => format!("{unicode}:{port}"),
                None => unicode,
            };
            if unicode != ascii {
                spellings.push(unicode);
            }
        }
    }

    spellings
}

pub fn extract(document: &Html, base_url: &Url) -> BacklinkSignals {
    let base_authority = authority(base_url);
    let spellings = authority_spellings(base_url);
    let mut referring = BTreeSet::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !spellings.iter().any(|spelling| href.contains(spelling.as_str())) {
            continue;
        }

        let link_authority = Url::parse(href)
            .map(|url| authority(&url))
            .unwrap_or_default();
        if link_authority != base_authority {
            referring.insert(link_authority);
        }
    }

    BacklinkSignals {
        referring_domains_count: referring.len(),
        referring_domains_candidate: referring,
    }
}
