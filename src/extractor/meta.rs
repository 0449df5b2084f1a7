use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::model::{CanonicalSignals, MetaDescriptionSignals, TitleSignals};

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());

static CANONICAL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel~="canonical"]"#).unwrap());

/// First `<title>` in the document, trimmed.
pub fn extract_title(document: &Html) -> TitleSignals {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    TitleSignals::from_text(title)
}

/// `content` of the first `<meta name="description">`, trimmed.
pub fn extract_meta_description(document: &Html) -> MetaDescriptionSignals {
    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    MetaDescriptionSignals::from_text(description)
}

/// `href` of the first `<link rel="canonical">`, as written in the markup.
pub fn extract_canonical(document: &Html) -> CanonicalSignals {
    let canonical_url = document
        .select(&CANONICAL_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .unwrap_or_default()
        .to_string();

    CanonicalSignals {
        canonical_exists: !canonical_url.is_empty(),
        canonical_url,
    }
}
