use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::model::{HeadingLevels, HeadingSignals};

static HEADING_SELECTORS: LazyLock<HeadingLevels<Selector>> =
    LazyLock::new(|| HeadingLevels::from_fn(|level| Selector::parse(&format!("h{level}")).unwrap()));

/// Trimmed text of every heading, grouped by level in document order.
/// Empty headings are kept so counts reflect the markup.
pub fn extract(document: &Html) -> HeadingSignals {
    let headings = HEADING_SELECTORS.map(|selector| {
        document
            .select(selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect::<Vec<_>>()
    });

    HeadingSignals::from_headings(headings)
}
