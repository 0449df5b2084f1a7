use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::model::ImageSignals;

static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Missing `alt` and blank `alt` are counted separately.
pub fn extract(document: &Html) -> ImageSignals {
    let mut total = 0;
    let mut without_alt = 0;
    let mut empty_alt = 0;

    for img in document.select(&IMG_SELECTOR) {
        total += 1;
        match img.value().attr("alt") {
            None => without_alt += 1,
            Some(alt) if alt.trim().is_empty() => empty_alt += 1,
            Some(_) => {}
        }
    }

    ImageSignals::from_counts(total, without_alt, empty_alt)
}
