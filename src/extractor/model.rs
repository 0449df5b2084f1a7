use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const TITLE_OPTIMAL_MIN: usize = 30;
pub const TITLE_OPTIMAL_MAX: usize = 60;
pub const META_DESCRIPTION_OPTIMAL_MIN: usize = 120;
pub const META_DESCRIPTION_OPTIMAL_MAX: usize = 160;
pub const CONTENT_OPTIMAL_MIN_WORDS: usize = 300;

pub fn title_is_optimal(length: usize) -> bool {
    (TITLE_OPTIMAL_MIN..=TITLE_OPTIMAL_MAX).contains(&length)
}

pub fn meta_description_is_optimal(length: usize) -> bool {
    (META_DESCRIPTION_OPTIMAL_MIN..=META_DESCRIPTION_OPTIMAL_MAX).contains(&length)
}

pub fn h1_is_optimal(h1_count: usize) -> bool {
    h1_count == 1
}

pub fn content_is_optimal(word_count: usize) -> bool {
    word_count >= CONTENT_OPTIMAL_MIN_WORDS
}

/// Share of images that carry a non-blank alt attribute, in `[0, 1]`.
pub fn alt_optimization_ratio(total: usize, without_alt: usize, empty_alt: usize) -> f64 {
    let optimized = total.saturating_sub(without_alt + empty_alt);
    optimized as f64 / total.max(1) as f64
}

/// Number of characters as a reader would count them (Unicode scalar values).
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSignals {
    pub title: String,
    pub title_length: usize,
    pub title_exists: bool,
    pub title_optimal: bool,
}

impl TitleSignals {
    pub fn from_text(title: String) -> Self {
        let title_length = text_length(&title);
        Self {
            title_exists: !title.is_empty(),
            title_optimal: title_is_optimal(title_length),
            title_length,
            title,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDescriptionSignals {
    pub meta_description: String,
    pub meta_description_length: usize,
    pub meta_description_exists: bool,
    pub meta_description_optimal: bool,
}

impl MetaDescriptionSignals {
    pub fn from_text(description: String) -> Self {
        let length = text_length(&description);
        Self {
            meta_description_exists: !description.is_empty(),
            meta_description_optimal: meta_description_is_optimal(length),
            meta_description_length: length,
            meta_description: description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSignals {
    pub canonical_url: String,
    pub canonical_exists: bool,
}

/// One value per heading level, h1 through h6.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingLevels<T> {
    pub h1: T,
    pub h2: T,
    pub h3: T,
    pub h4: T,
    pub h5: T,
    pub h6: T,
}

impl<T> HeadingLevels<T> {
    pub fn from_fn(mut f: impl FnMut(u8) -> T) -> Self {
        Self {
            h1: f(1),
            h2: f(2),
            h3: f(3),
            h4: f(4),
            h5: f(5),
            h6: f(6),
        }
    }

    pub fn level(&self, level: u8) -> Option<&T> {
        match level {
            1 => Some(&self.h1),
            2 => Some(&self.h2),
            3 => Some(&self.h3),
            4 => Some(&self.h4),
            5 => Some(&self.h5),
            6 => Some(&self.h6),
            _ => None,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> HeadingLevels<U> {
        HeadingLevels {
            h1: f(&self.h1),
            h2: f(&self.h2),
            h3: f(&self.h3),
            h4: f(&self.h4),
            h5: f(&self.h5),
            h6: f(&self.h6),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingSignals {
    pub headings: HeadingLevels<Vec<String>>,
    pub heading_counts: HeadingLevels<usize>,
    pub has_h1: bool,
    pub multiple_h1: bool,
    pub h1_optimal: bool,
}

impl HeadingSignals {
    pub fn from_headings(headings: HeadingLevels<Vec<String>>) -> Self {
        let heading_counts = headings.map(Vec::len);
        let h1_count = heading_counts.h1;
        Self {
            headings,
            heading_counts,
            has_h1: h1_count > 0,
            multiple_h1: h1_count > 1,
            h1_optimal: h1_is_optimal(h1_count),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSignals {
    pub word_count: usize,
    pub content_length_optimal: bool,
}

impl ContentSignals {
    pub fn from_word_count(word_count: usize) -> Self {
        Self {
            word_count,
            content_length_optimal: content_is_optimal(word_count),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSignals {
    pub total_images: usize,
    pub images_without_alt_attribute: usize,
    pub images_with_empty_alt_attribute: usize,
    pub alt_optimization_ratio: f64,
}

impl ImageSignals {
    pub fn from_counts(total: usize, without_alt: usize, empty_alt: usize) -> Self {
        Self {
            total_images: total,
            images_without_alt_attribute: without_alt,
            images_with_empty_alt_attribute: empty_alt,
            alt_optimization_ratio: alt_optimization_ratio(total, without_alt, empty_alt),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSignals {
    /// Anchors that survived the empty/fragment-only filter.
    pub total_link_tags: usize,
    /// Deduplicated, in first-seen document order.
    pub internal_links: Vec<String>,
    /// Deduplicated, in first-seen document order.
    pub external_links: Vec<String>,
    pub internal_links_count: usize,
    pub external_links_count: usize,
}

impl LinkSignals {
    /// Internal links followed by external links; the order the sampler probes them in.
    pub fn combined(&self) -> Vec<String> {
        self.internal_links
            .iter()
            .chain(self.external_links.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSignals {
    pub og_tags: BTreeMap<String, String>,
    pub twitter_tags: BTreeMap<String, String>,
    pub og_tags_count: usize,
    pub twitter_tags_count: usize,
    pub has_og_title: bool,
    pub has_og_description: bool,
    pub has_og_image: bool,
    pub has_twitter_card: bool,
}

impl SocialSignals {
    pub fn from_tags(
        og_tags: BTreeMap<String, String>,
        twitter_tags: BTreeMap<String, String>,
    ) -> Self {
        Self {
            og_tags_count: og_tags.len(),
            twitter_tags_count: twitter_tags.len(),
            has_og_title: og_tags.contains_key("og:title"),
            has_og_description: og_tags.contains_key("og:description"),
            has_og_image: og_tags.contains_key("og:image"),
            has_twitter_card: twitter_tags.contains_key("twitter:card"),
            og_tags,
            twitter_tags,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinkSignals {
    /// Hosts of hrefs mentioning this page's host. Unverified; see `backlinks`.
    pub referring_domains_candidate: BTreeSet<String>,
    pub referring_domains_count: usize,
}

/// Everything the extractors derive from one parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSignals {
    #[serde(flatten)]
    pub title: TitleSignals,
    #[serde(flatten)]
    pub meta_description: MetaDescriptionSignals,
    #[serde(flatten)]
    pub canonical: CanonicalSignals,
    #[serde(flatten)]
    pub headings: HeadingSignals,
    #[serde(flatten)]
    pub content: ContentSignals,
    #[serde(flatten)]
    pub images: ImageSignals,
    #[serde(flatten)]
    pub links: LinkSignals,
    #[serde(flatten)]
    pub social: SocialSignals,
    #[serde(flatten)]
    pub backlinks: BacklinkSignals,
}
