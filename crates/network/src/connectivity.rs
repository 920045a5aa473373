// crates/network/src/connectivity.rs
//! Reachability checks for upstream hosts

use crate::client::Client;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Outcome of checking one host
#[derive(Debug, Clone, PartialEq)]
pub struct HostStatus {
    pub name: String,
    pub url: String,
    /// Status code of the HEAD response, `None` when the request failed
    pub status: Option<u16>,
    pub latency: Duration,
}

impl HostStatus {
    /// Any HTTP answer counts as reachable; provider roots often 404 on HEAD
    pub fn is_reachable(&self) -> bool {
        self.status.is_some()
    }
}

/// Checks which upstream hosts answer at all
#[derive(Debug, Clone)]
pub struct ConnectivityChecker {
    client: Client,
    timeout: Duration,
}

impl ConnectivityChecker {
    /// Creates a checker with a 5 second per-host timeout
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks one host
    pub async fn check(&self, name: &str, url: &str) -> HostStatus {
        let start = Instant::now();
        let status = match self
            .client
            .probe(url, &BTreeMap::new(), false, Some(self.timeout))
            .await
        {
            Ok(status) => Some(status),
            Err(e) => {
                log::debug!("{} unreachable at {}: {}", name, url, e);
                None
            }
        };

        HostStatus {
            name: name.to_string(),
            url: url.to_string(),
            status,
            latency: start.elapsed(),
        }
    }

    /// Checks every `(name, url)` pair concurrently, preserving input order
    pub async fn check_all(&self, hosts: &[(String, String)]) -> Vec<HostStatus> {
        let checks = hosts.iter().map(|(name, url)| self.check(name, url));
        futures::future::join_all(checks).await
    }
}
