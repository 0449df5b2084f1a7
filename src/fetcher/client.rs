use crate::config::Config;
use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Shared HTTP session: one connection pool, one set of default headers.
///
/// Cheap to clone; every clone reuses the same pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        let inner = ClientBuilder::new()
            .user_agent(config.user_agent())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects()))
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { inner })
    }

    /// GET a document, following redirects.
    ///
    /// Anything other than a 200 on the final hop is a failure, as is any
    /// transport error. The body is read fully before the timer stops.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &str, timeout: Duration) -> Result<PageResponse, FetchError> {
        let parsed_url = url::Url::parse(url)?;
        let started = Instant::now();

        let response = self
            .inner
            .get(parsed_url)
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        if status != StatusCode::OK {
            return Err(FetchError::Http { status });
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;
        let load_time = started.elapsed();

        debug!(
            final_url = %final_url,
            bytes = body_bytes.len(),
            elapsed_ms = load_time.as_millis() as u64,
            "document fetched"
        );

        Ok(process_response(
            final_url, status, &headers, body_bytes, load_time,
        ))
    }

    /// HEAD probe following redirects; returns the final status whatever it is.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn probe_head(&self, url: &str, timeout: Duration) -> Result<StatusCode, FetchError> {
        let parsed_url = url::Url::parse(url)?;
        let response = self
            .inner
            .head(parsed_url)
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;
        Ok(response.status())
    }

    /// GET probe that only looks at the status line; the body is dropped unread.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn probe_get(&self, url: &str, timeout: Duration) -> Result<StatusCode, FetchError> {
        let parsed_url = url::Url::parse(url)?;
        let response = self
            .inner
            .get(parsed_url)
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;
        Ok(response.status())
    }
}
