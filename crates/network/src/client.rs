// crates/network/src/client.rs
//! HTTP client wrapper for provider APIs

use crate::error::{NetworkError, NetworkResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, RANGE};
use reqwest::{Client as ReqwestClient, Url};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Client identifier sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("AnimeRadar/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
        }
    }
}

/// HTTP client shared by every provider adapter
///
/// Each call issues exactly one request; retrying is the caller's business.
#[derive(Debug, Clone)]
pub struct Client {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            inner: client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs a GET and decodes the body as JSON
    ///
    /// Non-2xx statuses become [`NetworkError::Status`]; bodies that are not
    /// JSON become [`NetworkError::Decode`].
    pub async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &BTreeMap<String, String>,
    ) -> NetworkResult<Value> {
        let parsed = parse_url(url)?;
        let mut header_map = to_header_map(headers)?;
        header_map
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static("application/json"));

        log::debug!("GET {}", parsed);
        let response = self
            .inner
            .get(parsed)
            .query(query)
            .headers(header_map)
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| NetworkError::Decode {
            url: final_url,
            message: e.to_string(),
        })
    }

    /// Sends a HEAD request and reports the status code, whatever it is
    ///
    /// With `ranged` set the request asks for the first byte only
    /// (`Range: bytes=0-0`), so origins that support partial content answer
    /// 206. `timeout` overrides the client-wide timeout for this request.
    pub async fn probe(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        ranged: bool,
        timeout: Option<Duration>,
    ) -> NetworkResult<u16> {
        let parsed = parse_url(url)?;
        let mut header_map = to_header_map(headers)?;
        if ranged {
            header_map.insert(RANGE, HeaderValue::from_static("bytes=0-0"));
        }

        let mut request = self.inner.head(parsed).headers(header_map);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        Ok(response.status().as_u16())
    }
}

fn parse_url(url: &str) -> NetworkResult<Url> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", url, e)))
}

fn to_header_map(headers: &BTreeMap<String, String>) -> NetworkResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| NetworkError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| NetworkError::InvalidHeader(format!("{}: {}", name, value)))?;
        map.insert(name, value);
    }
    Ok(map)
}
