use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::extractor::model::SocialSignals;

static OPEN_GRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property^="og:"]"#).unwrap());

static TWITTER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name^="twitter:"]"#).unwrap());

fn collect_tags(document: &Html, selector: &Selector, key_attr: &str) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    for meta in document.select(selector) {
        let Some(key) = meta.value().attr(key_attr) else {
            continue;
        };
        let content = meta.value().attr("content").unwrap_or_default();
        // later duplicates overwrite earlier ones
        tags.insert(key.to_string(), content.to_string());
    }
    tags
}

/// Open Graph (`property="og:*"`) and Twitter Card (`name="twitter:*"`) tags.
pub fn extract(document: &Html) -> SocialSignals {
    let og_tags = collect_tags(document, &OPEN_GRAPH_SELECTOR, "property");
    let twitter_tags = collect_tags(document, &TWITTER_SELECTOR, "name");
    SocialSignals::from_tags(og_tags, twitter_tags)
}
