use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::{StatusCode, header::HeaderMap};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Bytes of the body inspected for an in-document charset declaration.
const SNIFF_LEN: usize = 4096;

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: Bytes,
    load_time: Duration,
) -> PageResponse {
    let content_type = headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let charset = detect_charset(&content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, &charset);

    PageResponse {
        url_final,
        status,
        body_utf8,
        charset,
        load_time,
    }
}

fn label_to_charset(captured: Option<regex::Match<'_>>) -> Option<Charset> {
    let charset_name = captured?.as_str().to_lowercase();
    Encoding::for_label(charset_name.as_bytes()).map(Charset::from_encoding)
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Content-Type header
    if let Some(charset) = CHARSET_REGEX
        .captures(content_type)
        .and_then(|c| label_to_charset(c.get(1)))
    {
        return charset;
    }

    // 2. <meta charset> or http-equiv in the head of the document
    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(charset) = META_CHARSET_REGEX
        .captures(&search_str)
        .and_then(|c| label_to_charset(c.get(1)))
    {
        return charset;
    }

    if let Some(charset) = META_HTTP_EQUIV_REGEX
        .captures(&search_str)
        .and_then(|c| label_to_charset(c.get(1)))
    {
        return charset;
    }

    // 3. Statistical guess
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, body_bytes.len() <= SNIFF_LEN);
    Charset::from_encoding(detector.guess(None, true))
}

/// Malformed sequences become U+FFFD; a page is never rejected over its encoding.
fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = charset.encoding();
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        debug!(
            encoding = encoding.name(),
            "body contained malformed sequences, replaced"
        );
    }

    decoded.into_owned()
}
