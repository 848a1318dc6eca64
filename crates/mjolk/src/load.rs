//! Reads event files.
//!
//! A file holds a JSON array with one `[id, "YYYY-MM-DD HH:MM:SS", [x, y]]`
//! entry per event. The id can be any JSON value and is ignored. Timestamps
//! are read as UTC and may carry fractional seconds.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use galaxy::{Event, Events};
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("expected a JSON array of events")]
    Json(#[from] serde_json::Error),
    #[error("entry {index} is not an [id, timestamp, [x, y]] triple")]
    Entry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("entry {index} has an invalid timestamp {value:?}")]
    Timestamp {
        index: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("entry {index} has a timestamp outside the supported range: {value:?}")]
    TimestampRange { index: usize, value: String },
}

// the id is validated as "some JSON value" and then dropped
#[derive(Deserialize)]
struct RawEvent(#[allow(dead_code)] IgnoredAny, String, (f64, f64));

/// Parse the events held in the file at `path`
pub fn load_events(path: &Path) -> Result<Events, LoadError> {
    let buf = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_events(&buf)
}

/// Parse events from the contents of an event file
pub fn parse_events(buf: &str) -> Result<Events, LoadError> {
    let entries: Vec<Value> = serde_json::from_str(buf)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_event(index, entry))
        .collect()
}

fn parse_event(index: usize, entry: Value) -> Result<Event, LoadError> {
    let RawEvent(_, timestamp, (x, y)) =
        serde_json::from_value(entry).map_err(|source| LoadError::Entry { index, source })?;
    let date = NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT).map_err(|source| {
        LoadError::Timestamp {
            index,
            value: timestamp.clone(),
            source,
        }
    })?;
    let t = date
        .and_utc()
        .timestamp_nanos_opt()
        .ok_or_else(|| LoadError::TimestampRange {
            index,
            value: timestamp.clone(),
        })?;
    Ok(Event::new(x, y, t))
}
