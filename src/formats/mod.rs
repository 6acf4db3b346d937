/*!
 * Plain-text caption formats.
 *
 * WebVTT and SRT share the same cue layout; they differ only in the
 * leading `WEBVTT` header and the millisecond separator. Only SRT is
 * parsed back; WebVTT is output-only.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub mod parser;
pub mod renderer;

pub use parser::{parse_srt, parse_srt_timestamp};
pub use renderer::render;

/// Caption file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    #[serde(rename = "vtt", alias = "webvtt")]
    WebVtt,
    Srt,
}

impl Format {
    /// Header written before the first cue
    pub fn header(&self) -> &'static str {
        match self {
            Self::WebVtt => "WEBVTT\n\n",
            Self::Srt => "",
        }
    }

    /// Separator between seconds and milliseconds in a timestamp
    pub fn millis_separator(&self) -> char {
        match self {
            Self::WebVtt => '.',
            Self::Srt => ',',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::WebVtt => "vtt",
            Self::Srt => "srt",
        }
    }

    /// MIME type of a rendered file body
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::WebVtt => "text/vtt",
            Self::Srt => "text/plain",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebVtt => write!(f, "WebVTT"),
            Self::Srt => write!(f, "SRT"),
        }
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "vtt" | "webvtt" => Ok(Self::WebVtt),
            "srt" => Ok(Self::Srt),
            _ => Err(anyhow!("Invalid caption format: {}", s)),
        }
    }
}

/// Whole milliseconds in `seconds`, truncated.
///
/// A 1e-6 ms guard keeps values such as 2.3s (stored as 2.2999...) from
/// truncating to 2.299s.
pub fn to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0 + 1e-6).floor().max(0.0) as u64
}

/// Format seconds as `HH:MM:SS.mmm` (WebVTT) or `HH:MM:SS,mmm` (SRT).
///
/// Hours widen past two digits only beyond 99 hours.
pub fn format_timestamp(seconds: f64, format: Format) -> String {
    let ms = to_millis(seconds);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours,
        minutes,
        secs,
        format.millis_separator(),
        millis
    )
}
