// crates/network/src/lib.rs
//! HTTP plumbing for provider adapters and stream probes

mod client;
mod connectivity;
mod error;

pub use client::{Client, ClientConfig, DEFAULT_USER_AGENT};
pub use connectivity::{ConnectivityChecker, HostStatus};
pub use error::{NetworkError, NetworkResult};
