//! Coercion of loosely-typed upstream payloads into owned primitives
//!
//! Provider APIs disagree on whether an episode number is `12`, `12.0` or
//! `"12"`, and some send `null` where others omit the field. These helpers
//! read a field out of a `serde_json::Value` and always hand back an owned
//! Rust primitive, so nothing produced by an adapter borrows from the
//! upstream response.

use crate::types::{StreamingData, StreamingSource, Subtitle};
use serde_json::Value;
use std::collections::BTreeMap;

/// Quality label used when the upstream omits one
pub const UNKNOWN_QUALITY: &str = "auto";

/// Reads `key` as a non-empty string, stringifying numbers and booleans
pub fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(as_string)
}

/// Converts a scalar JSON value into a non-empty string
pub fn as_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Reads `key` as a non-negative integer
///
/// Accepts integers, floats (truncated) and numeric strings such as `"12"`
/// or `"12.5"`.
pub fn u32_field(value: &Value, key: &str) -> Option<u32> {
    value.get(key).and_then(as_u32)
}

pub fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u32))
        }
        _ => None,
    }
}

/// Reads `key` as a boolean, accepting `"true"`/`"false"` and `0`/`1`
pub fn bool_field(value: &Value, key: &str) -> Option<bool> {
    match value.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

/// Reads `key` as an array, treating a missing or non-array field as empty
pub fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Decides whether a URL is an HLS manifest
///
/// An explicit upstream flag wins; otherwise the URL path (query string and
/// fragment excluded) must end in `.m3u8`.
pub fn is_m3u8(url: &str, flag: Option<bool>) -> bool {
    if let Some(flag) = flag {
        return flag;
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.to_ascii_lowercase().ends_with(".m3u8")
}

/// Flattens an upstream header object into string pairs
///
/// Null values are dropped, scalar values are stringified, anything that is
/// not an object yields an empty map.
pub fn headers_from_value(value: Option<&Value>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    if let Some(Value::Object(map)) = value {
        for (name, value) in map {
            if let Some(value) = as_string(value) {
                headers.insert(name.clone(), value);
            }
        }
    }
    headers
}

/// Final pass over adapter output before it leaves the adapter
///
/// Drops sources and subtitles without a URL and fills in a quality label
/// where one is missing.
pub fn sanitize_streaming_data(mut data: StreamingData) -> StreamingData {
    data.sources = data
        .sources
        .into_iter()
        .filter(|s| !s.url.trim().is_empty())
        .map(|s| StreamingSource {
            quality: if s.quality.trim().is_empty() {
                UNKNOWN_QUALITY.to_string()
            } else {
                s.quality
            },
            ..s
        })
        .collect();
    data.subtitles = data
        .subtitles
        .into_iter()
        .filter(|s: &Subtitle| !s.url.trim().is_empty())
        .collect();
    if data.headers.as_ref().is_some_and(BTreeMap::is_empty) {
        data.headers = None;
    }
    data
}
