//! Domain types for the streaming resolution layer
//!
//! - `episode`: episodes and paginated episode lists
//! - `streaming`: sources, subtitles and the aggregate handed to players
//! - `provider`: the orchestrator's provider-tagged result wrapper

mod episode;
mod provider;
mod streaming;

pub use episode::{default_title, Episode, EpisodePage};
pub use provider::ProviderResult;
pub use streaming::{parse_resolution, sort_by_quality, StreamingData, StreamingSource, Subtitle};
