// crates/providers/src/mapping.rs
//! Upstream payload → canonical model
//!
//! A payload that is not the expected JSON object, or that carries the right
//! key with the wrong type, is `SERVICE_ERROR`. A well-formed payload with
//! nothing in it is `NOT_FOUND`. Entries without an ID or URL are dropped; if
//! entries were present but none were usable the payload counts as garbage.

use crate::profile::ResponseShape;
use animeradar_core::normalize::{
    array_field, as_string, bool_field, headers_from_value, is_m3u8, string_field, u32_field,
    UNKNOWN_QUALITY,
};
use animeradar_core::{ErrorInfo, Episode, Result, StreamingData, StreamingSource, Subtitle};
use serde_json::Value;

/// Maps an episodes payload
pub fn parse_episodes(shape: ResponseShape, provider: &str, body: &Value) -> Result<Vec<Episode>> {
    let key = match shape {
        ResponseShape::Consumet | ResponseShape::AnimeFox => "episodes",
        ResponseShape::AnimePahe => "data",
    };
    let items = list(body, key, provider)?;
    if items.is_empty() {
        return Err(ErrorInfo::not_found(format!(
            "{}: no episodes found",
            provider
        )));
    }

    let episodes: Vec<Episode> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| episode(shape, item, index))
        .collect();

    if episodes.is_empty() {
        return Err(ErrorInfo::service(format!(
            "{}: {} episode entries, none usable",
            provider,
            items.len()
        )));
    }
    Ok(episodes)
}

/// Maps a sources payload
///
/// Upstream headers are kept as returned; merging with the profile's stream
/// headers is the adapter's job.
pub fn parse_streaming_data(
    shape: ResponseShape,
    provider: &str,
    body: &Value,
) -> Result<StreamingData> {
    let (sources, subtitles, listed): (Vec<StreamingSource>, Vec<Subtitle>, usize) = match shape {
        ResponseShape::Consumet => {
            let items = list(body, "sources", provider)?;
            let sources = items.iter().filter_map(consumet_source).collect();
            let subtitles = list(body, "subtitles", provider)?
                .iter()
                .filter_map(|s| subtitle(s, "url", "lang"))
                .collect();
            (sources, subtitles, items.len())
        }
        ResponseShape::AnimePahe => {
            let data = object(body, provider)?.get("data").unwrap_or(&Value::Null);
            if !matches!(data, Value::Null | Value::Array(_) | Value::Object(_)) {
                return Err(malformed(provider, "data"));
            }
            let mut sources = Vec::new();
            pahe_links(data, None, &mut sources);
            let listed = match data {
                Value::Array(a) => a.len(),
                Value::Object(o) => o.len(),
                _ => 0,
            };
            (sources, Vec::new(), listed)
        }
        ResponseShape::AnimeFox => {
            let items = list(body, "sources", provider)?;
            let sources = items.iter().filter_map(animefox_source).collect();
            let subtitles = list(body, "subtitles", provider)?
                .iter()
                .filter_map(|s| subtitle(s, "file", "label"))
                .collect();
            (sources, subtitles, items.len())
        }
    };

    if sources.is_empty() {
        return Err(if listed == 0 {
            ErrorInfo::not_found(format!("{}: no streaming sources found", provider))
        } else {
            ErrorInfo::service(format!(
                "{}: {} source entries, none usable",
                provider, listed
            ))
        });
    }

    Ok(StreamingData::new(sources, subtitles).with_headers(headers_from_value(body.get("headers"))))
}

fn object<'a>(body: &'a Value, provider: &str) -> Result<&'a serde_json::Map<String, Value>> {
    body.as_object().ok_or_else(|| {
        ErrorInfo::service(format!("{}: expected a JSON object from upstream", provider))
    })
}

fn list<'a>(body: &'a Value, key: &str, provider: &str) -> Result<&'a [Value]> {
    match object(body, provider)?.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(_)) => Ok(array_field(body, key)),
        Some(_) => Err(malformed(provider, key)),
    }
}

fn malformed(provider: &str, key: &str) -> ErrorInfo {
    ErrorInfo::service(format!("{}: field '{}' has an unexpected type", provider, key))
}

fn episode(shape: ResponseShape, item: &Value, index: usize) -> Option<Episode> {
    let (id_key, image_key) = match shape {
        ResponseShape::Consumet => ("id", "image"),
        ResponseShape::AnimePahe => ("session", "snapshot"),
        ResponseShape::AnimeFox => ("id", "thumbnail"),
    };
    let number_key = match shape {
        ResponseShape::AnimePahe => "episode",
        _ => "number",
    };

    let id = string_field(item, id_key)?;
    let number = u32_field(item, number_key).unwrap_or(index as u32 + 1);

    let mut episode = Episode::new(id, number);
    if let Some(title) = string_field(item, "title") {
        episode = episode.with_title(title);
    }
    if let Some(image) = string_field(item, image_key) {
        episode = episode.with_image(image);
    }
    if shape == ResponseShape::Consumet {
        episode.description = string_field(item, "description");
        episode.duration = string_field(item, "duration");
    }
    Some(episode)
}

fn consumet_source(item: &Value) -> Option<StreamingSource> {
    let url = string_field(item, "url")?;
    let quality = string_field(item, "quality").unwrap_or_else(|| UNKNOWN_QUALITY.to_string());
    let hls = is_m3u8(&url, bool_field(item, "isM3U8"));
    Some(StreamingSource::new(url, quality, hls))
}

fn animefox_source(item: &Value) -> Option<StreamingSource> {
    let url = string_field(item, "file")?;
    let quality = string_field(item, "label").unwrap_or_else(|| UNKNOWN_QUALITY.to_string());
    let flag = string_field(item, "type").map(|t| t.eq_ignore_ascii_case("hls"));
    let hls = is_m3u8(&url, flag);
    Some(StreamingSource::new(url, quality, hls))
}

/// Walks AnimePahe link data
///
/// `data` is either a list of `{kwik, resolution}` entries or a map keyed by
/// resolution (possibly nested in a list); the key is used when an entry
/// carries no resolution of its own.
fn pahe_links(value: &Value, resolution: Option<String>, out: &mut Vec<StreamingSource>) {
    match value {
        Value::Object(map) if map.contains_key("kwik") => {
            let Some(url) = string_field(value, "kwik") else {
                return;
            };
            let quality = string_field(value, "resolution")
                .or(resolution)
                .map(|r| {
                    if r.ends_with('p') {
                        r
                    } else {
                        format!("{}p", r)
                    }
                })
                .unwrap_or_else(|| UNKNOWN_QUALITY.to_string());
            out.push(StreamingSource::new(url, quality, false));
        }
        Value::Object(map) => {
            for (key, nested) in map {
                pahe_links(nested, Some(key.clone()), out);
            }
        }
        Value::Array(items) => {
            for item in items {
                pahe_links(item, resolution.clone(), out);
            }
        }
        _ => {}
    }
}

fn subtitle(item: &Value, url_key: &str, lang_key: &str) -> Option<Subtitle> {
    let url = string_field(item, url_key)?;
    let lang = item
        .get(lang_key)
        .and_then(as_string)
        .unwrap_or_else(|| "Unknown".to_string());
    Some(Subtitle::new(url, lang))
}
