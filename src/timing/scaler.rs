use log::debug;

use crate::errors::SubtitleError;
use crate::subtitle_processor::{SubtitleTrack, TimedSegment};
use super::round_centis;

// @module: Proportional timeline rescaling

/// Remaps an estimated timeline onto an authoritative duration
pub struct TimelineScaler;

impl TimelineScaler {
    /// Ratio mapping the track's last end time onto `target_duration`
    pub fn scale_factor(track: &SubtitleTrack, target_duration: f64) -> Result<f64, SubtitleError> {
        let current_duration = track.total_duration();

        if !(target_duration > 0.0) || !target_duration.is_finite() || !(current_duration > 0.0) {
            return Err(SubtitleError::InvalidDuration {
                target_duration,
                current_duration,
            });
        }

        Ok(target_duration / current_duration)
    }

    /// Return a new track with every timestamp multiplied by the scale factor.
    ///
    /// The last end time lands on `target_duration` up to rounding drift
    /// (two decimals per timestamp).
    pub fn scale_to_duration(track: &SubtitleTrack, target_duration: f64) -> Result<SubtitleTrack, SubtitleError> {
        let factor = Self::scale_factor(track, target_duration)?;

        debug!(
            "Scaling {} segments from {:.2}s to {:.2}s (factor {:.4})",
            track.len(),
            track.total_duration(),
            target_duration,
            factor
        );

        let segments = track
            .iter()
            .map(|segment| TimedSegment {
                sequence: segment.sequence,
                start_time: round_centis(segment.start_time * factor),
                end_time: round_centis(segment.end_time * factor),
                text: segment.text.clone(),
            })
            .collect();

        Ok(SubtitleTrack { segments })
    }
}
