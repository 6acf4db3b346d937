/*!
 * Reading-speed timing estimation.
 *
 * Every chunk is shown for `len / chars_per_second` seconds, clamped to
 * `[min_duration, max_duration]`. Chunks follow each other with no gap,
 * so the resulting track is contiguous and starts at 0.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::subtitle_processor::SubtitleTrack;
use super::round_centis;

/// Reading-speed parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Average reading speed in characters per second
    #[serde(default = "default_chars_per_second")]
    pub chars_per_second: f64,

    /// Shortest time a caption stays on screen (seconds)
    #[serde(default = "default_min_duration")]
    pub min_duration: f64,

    /// Longest time a caption stays on screen (seconds)
    #[serde(default = "default_max_duration")]
    pub max_duration: f64,
}

fn default_chars_per_second() -> f64 {
    15.0
}

fn default_min_duration() -> f64 {
    1.5
}

fn default_max_duration() -> f64 {
    7.0
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            chars_per_second: default_chars_per_second(),
            min_duration: default_min_duration(),
            max_duration: default_max_duration(),
        }
    }
}

/// Assigns cumulative start/end times to text chunks
#[derive(Debug, Clone, Default)]
pub struct TimingEstimator {
    config: TimingConfig,
}

impl TimingEstimator {
    /// Create an estimator; parameters are expected to be validated
    /// (`chars_per_second > 0`, `0 < min_duration <= max_duration`)
    pub fn new(config: TimingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Clamped display duration for a chunk of text
    pub fn duration_for(&self, text: &str) -> f64 {
        let raw = text.chars().count() as f64 / self.config.chars_per_second;
        raw.min(self.config.max_duration).max(self.config.min_duration)
    }

    /// Build a contiguous track from ordered chunks.
    ///
    /// The running clock is kept unrounded so rounding never accumulates;
    /// a segment's end and the next segment's start round the same value.
    pub fn estimate<S: AsRef<str>>(&self, chunks: &[S]) -> SubtitleTrack {
        let mut track = SubtitleTrack::new();
        let mut clock = 0.0_f64;

        for chunk in chunks {
            let text = chunk.as_ref();
            let duration = self.duration_for(text);
            let start_time = round_centis(clock);
            clock += duration;
            track.push(start_time, round_centis(clock), text);
        }

        debug!(
            "Estimated {} segments spanning {:.2}s at {} chars/s",
            track.len(),
            track.total_duration(),
            self.config.chars_per_second
        );

        track
    }
}
