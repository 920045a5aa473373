//! Shared model for AnimeRadar's streaming resolution layer
//!
//! Every crate in the workspace speaks in these types: the canonical
//! [`Episode`] / [`StreamingSource`] / [`Subtitle`] model, the
//! [`StreamingData`] aggregate handed to players, and the closed
//! [`ErrorKind`] taxonomy carried by [`ErrorInfo`].

pub mod error;
pub mod normalize;
pub mod types;

pub use error::{ErrorInfo, ErrorKind, ProviderFailure, Result};
pub use types::{
    default_title, parse_resolution, sort_by_quality, Episode, EpisodePage, ProviderResult,
    StreamingData, StreamingSource, Subtitle,
};
