pub mod backlinks;
pub mod content;
pub mod headings;
pub mod images;
pub mod links;
pub mod meta;
pub mod model;
pub mod social;

#[cfg(test)]
mod tests;

pub use model::PageSignals;

use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{Html, HtmlTreeSink};
use url::Url;

/// Parse a whole document with scripting disabled.
///
/// A crawler runs no scripts, so `<noscript>` content is real markup: its
/// text counts as visible and its images are elements.
pub fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

/// Run every field extractor over one parsed document.
///
/// The extractors only read the document and never see each other's output.
pub fn extract(document: &Html, base_url: &Url) -> PageSignals {
    PageSignals {
        title: meta::extract_title(document),
        meta_description: meta::extract_meta_description(document),
        canonical: meta::extract_canonical(document),
        headings: headings::extract(document),
        content: content::extract(document),
        images: images::extract(document),
        links: links::extract(document, base_url),
        social: social::extract(document),
        backlinks: backlinks::extract(document, base_url),
    }
}

/// Parse `html` and extract. The parsed tree is dropped before returning.
pub fn extract_html(html: &str, base_url: &Url) -> PageSignals {
    let document = parse_document(html);
    extract(&document, base_url)
}
