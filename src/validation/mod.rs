/*!
 * Validation for caption tracks.
 *
 * The engine itself is lenient (the SRT parser skips what it cannot read),
 * so callers that need strictness inspect the result here:
 *
 * - `timecodes`: numbering, time ranges, overlaps, gaps and duration bounds
 */

pub mod timecodes;

// Re-export main types
pub use timecodes::{
    validate_count, SegmentCheck, TimecodeIssue, TrackReport, TrackValidator, TrackValidatorConfig,
};
