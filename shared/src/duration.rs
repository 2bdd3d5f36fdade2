//! Episode length handling: coercion of the API value and `HH:MM:SS`
//! formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `file.duration` as sent by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    /// JSON number of seconds.
    Seconds(serde_json::Number),
    /// Seconds encoded as a string, e.g. `"3981"`.
    Text(String),
}

impl fmt::Display for RawDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDuration::Seconds(value) => write!(f, "{value}"),
            RawDuration::Text(value) => f.write_str(value),
        }
    }
}

/// Coerce a raw duration into whole seconds.
///
/// Fractional seconds are truncated and a blank string counts as zero.
/// Returns `None` for negative, non-finite or non-numeric input.
pub fn coerce_duration(raw: &RawDuration) -> Option<u64> {
    match raw {
        RawDuration::Seconds(value) => value
            .as_u64()
            .or_else(|| value.as_f64().and_then(seconds_from_f64)),
        RawDuration::Text(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Some(0);
            }
            trimmed.parse::<f64>().ok().and_then(seconds_from_f64)
        },
    }
}

fn seconds_from_f64(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.trunc() as u64)
}

/// Format seconds as zero-padded `HH:MM:SS`.
pub fn convert_duration_to_string(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
