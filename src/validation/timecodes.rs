/*!
 * Timecode validation for caption tracks.
 *
 * Checks a track for:
 * - Contiguous 1-based sequence numbering
 * - Usable time ranges (0 <= start < end)
 * - Overlaps and gaps between neighbouring segments
 * - Durations outside configured bounds
 * - Empty caption text
 *
 * Nothing here changes a track; callers decide what to do with the report.
 */

use anyhow::{anyhow, Result};
use log::debug;

use crate::subtitle_processor::{SubtitleTrack, TimedSegment};

// Two timestamps closer than this are the same instant
const TIME_EPSILON: f64 = 1e-6;

/// Result of timecode validation for a single segment
#[derive(Debug, Clone)]
pub struct SegmentCheck {
    /// Sequence number of the segment
    pub sequence: usize,
    /// Whether the segment passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// Sequence number is not the expected position
    SequenceOutOfOrder { expected: usize, found: usize },
    /// Start time is not before end time, or is negative
    InvalidTimeRange { start_time: f64, end_time: f64 },
    /// Caption text is empty or blank
    EmptyText,
    /// Duration is below the configured minimum
    DurationTooShort { duration: f64, min_duration: f64 },
    /// Duration is above the configured maximum
    DurationTooLong { duration: f64, max_duration: f64 },
    /// Starts before the previous segment ends
    OverlapsWithPrevious { previous: usize, overlap: f64 },
    /// Starts after the previous segment ends
    GapAfterPrevious { previous: usize, gap: f64 },
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::SequenceOutOfOrder { expected, found } => {
                write!(f, "Sequence number {} where {} was expected", found, expected)
            }
            TimecodeIssue::InvalidTimeRange { start_time, end_time } => {
                write!(f, "Invalid time range: {:.3}s --> {:.3}s", start_time, end_time)
            }
            TimecodeIssue::EmptyText => write!(f, "Empty caption text"),
            TimecodeIssue::DurationTooShort { duration, min_duration } => {
                write!(f, "Duration too short: {:.3}s (min: {:.3}s)", duration, min_duration)
            }
            TimecodeIssue::DurationTooLong { duration, max_duration } => {
                write!(f, "Duration too long: {:.3}s (max: {:.3}s)", duration, max_duration)
            }
            TimecodeIssue::OverlapsWithPrevious { previous, overlap } => {
                write!(f, "Overlaps with segment {} by {:.3}s", previous, overlap)
            }
            TimecodeIssue::GapAfterPrevious { previous, gap } => {
                write!(f, "Gap of {:.3}s after segment {}", gap, previous)
            }
        }
    }
}

/// Result of validating a whole track
#[derive(Debug, Clone)]
pub struct TrackReport {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each segment
    pub segment_checks: Vec<SegmentCheck>,
    /// Total number of issues
    pub total_issues: usize,
}

impl TrackReport {
    /// Get all failed segments
    pub fn failed_segments(&self) -> Vec<&SegmentCheck> {
        self.segment_checks.iter().filter(|r| !r.passed).collect()
    }
}

/// Configuration for timecode validation
#[derive(Debug, Clone, Default)]
pub struct TrackValidatorConfig {
    /// Minimum duration in seconds, unchecked when `None`
    pub min_duration: Option<f64>,
    /// Maximum duration in seconds, unchecked when `None`
    pub max_duration: Option<f64>,
    /// Whether gaps between segments are failures (contiguous timelines)
    pub require_contiguous: bool,
}

/// Timecode validator for caption tracks
#[derive(Debug, Clone, Default)]
pub struct TrackValidator {
    config: TrackValidatorConfig,
}

impl TrackValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackValidatorConfig) -> Self {
        Self { config }
    }

    /// Validator matching what the timing estimator guarantees
    pub fn for_estimated(min_duration: f64, max_duration: f64) -> Self {
        Self::with_config(TrackValidatorConfig {
            min_duration: Some(min_duration),
            max_duration: Some(max_duration),
            require_contiguous: true,
        })
    }

    /// Validate a single segment at 1-based `position`
    pub fn validate_segment(&self, position: usize, segment: &TimedSegment) -> SegmentCheck {
        let mut issues = Vec::new();

        if segment.sequence != position {
            issues.push(TimecodeIssue::SequenceOutOfOrder {
                expected: position,
                found: segment.sequence,
            });
        }

        if segment.text.trim().is_empty() {
            issues.push(TimecodeIssue::EmptyText);
        }

        if !segment.has_valid_range() {
            issues.push(TimecodeIssue::InvalidTimeRange {
                start_time: segment.start_time,
                end_time: segment.end_time,
            });
        } else {
            let duration = segment.duration();

            if let Some(min_duration) = self.config.min_duration {
                if duration < min_duration - TIME_EPSILON {
                    issues.push(TimecodeIssue::DurationTooShort { duration, min_duration });
                }
            }

            if let Some(max_duration) = self.config.max_duration {
                if duration > max_duration + TIME_EPSILON {
                    issues.push(TimecodeIssue::DurationTooLong { duration, max_duration });
                }
            }
        }

        SegmentCheck {
            sequence: segment.sequence,
            passed: issues.is_empty(),
            issues,
        }
    }

    /// Validate every segment and the joins between neighbours
    pub fn validate_track(&self, track: &SubtitleTrack) -> TrackReport {
        let mut segment_checks: Vec<SegmentCheck> = track
            .iter()
            .enumerate()
            .map(|(i, segment)| self.validate_segment(i + 1, segment))
            .collect();

        for (i, pair) in track.segments.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let delta = current.start_time - previous.end_time;
            let check = &mut segment_checks[i + 1];

            if delta < -TIME_EPSILON {
                check.issues.push(TimecodeIssue::OverlapsWithPrevious {
                    previous: previous.sequence,
                    overlap: -delta,
                });
                check.passed = false;
            } else if delta > TIME_EPSILON && self.config.require_contiguous {
                check.issues.push(TimecodeIssue::GapAfterPrevious {
                    previous: previous.sequence,
                    gap: delta,
                });
                check.passed = false;
            }
        }

        let total_issues: usize = segment_checks.iter().map(|r| r.issues.len()).sum();
        let passed = segment_checks.iter().all(|r| r.passed);

        debug!("Track validation: {} segments, {} issues", track.len(), total_issues);

        TrackReport {
            passed,
            segment_checks,
            total_issues,
        }
    }
}

/// Whether a parsed track holds the number of segments the caller expected
pub fn validate_count(track: &SubtitleTrack, expected: usize) -> Result<()> {
    if track.len() == expected {
        Ok(())
    } else {
        Err(anyhow!("Expected {} segments, found {}", expected, track.len()))
    }
}
