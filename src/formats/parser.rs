/*!
 * Tolerant SRT import.
 *
 * The document is split into blocks on runs of empty lines. A block is
 * kept only when it has at least three lines, an integer sequence line and
 * a `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing line; anything else is skipped
 * with a warning. Parsing itself never fails.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::subtitle_processor::{SubtitleTrack, TimedSegment};

// @const: SRT timing line, anchored at the start; trailing cue settings are ignored
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})\s*-->\s*([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})").unwrap()
});

// @const: Single SRT timestamp
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").unwrap()
});

// Only truly empty lines separate blocks; a whitespace-only line is caption text
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").unwrap());

/// Why a block was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    TooFewLines,
    BadSequence,
    BadTimingLine,
}

/// Parse SRT text into a track, skipping malformed blocks.
///
/// Segments keep file order and are renumbered from 1.
pub fn parse_srt(content: &str) -> SubtitleTrack {
    let normalized = content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    // Trailing spaces on the last text line are content
    let normalized = normalized.trim_matches('\n');

    if normalized.trim().is_empty() {
        debug!("SRT content is empty");
        return SubtitleTrack::new();
    }

    let mut segments = Vec::new();
    let mut skipped = 0;

    for (block_index, block) in BLOCK_SEPARATOR_REGEX.split(normalized).enumerate() {
        match parse_block(block) {
            Ok(segment) => {
                if !segment.has_valid_range() {
                    warn!(
                        "Block {} has an unusable time range ({}s --> {}s)",
                        block_index + 1,
                        segment.start_time,
                        segment.end_time
                    );
                }
                segments.push(segment);
            }
            Err(reason) => {
                skipped += 1;
                warn!("Skipping malformed SRT block {}: {:?}", block_index + 1, reason);
            }
        }
    }

    debug!("Parsed {} SRT segments, skipped {} blocks", segments.len(), skipped);

    SubtitleTrack::from_segments(segments)
}

fn parse_block(block: &str) -> Result<TimedSegment, SkipReason> {
    let lines: Vec<&str> = block.trim_matches('\n').split('\n').collect();
    if lines.len() < 3 {
        return Err(SkipReason::TooFewLines);
    }

    let sequence: usize = lines[0].trim().parse().map_err(|_| SkipReason::BadSequence)?;

    let caps = TIMING_LINE_REGEX
        .captures(lines[1])
        .ok_or(SkipReason::BadTimingLine)?;

    let start_time = captured_seconds(&caps, 1).ok_or(SkipReason::BadTimingLine)?;
    let end_time = captured_seconds(&caps, 5).ok_or(SkipReason::BadTimingLine)?;

    Ok(TimedSegment {
        sequence,
        start_time,
        end_time,
        text: lines[2..].join("\n"),
    })
}

/// Seconds from four consecutive capture groups (hours, minutes, seconds, millis)
fn captured_seconds(caps: &Captures, start_idx: usize) -> Option<f64> {
    let field = |offset: usize| -> Option<u64> {
        caps.get(start_idx + offset)?.as_str().parse().ok()
    };

    let total_ms = field(0)? * 3_600_000 + field(1)? * 60_000 + field(2)? * 1_000 + field(3)?;
    Some(total_ms as f64 / 1000.0)
}

/// Parse a single `HH:MM:SS,mmm` timestamp to seconds
pub fn parse_srt_timestamp(timestamp: &str) -> Option<f64> {
    TIMESTAMP_REGEX
        .captures(timestamp.trim())
        .and_then(|caps| captured_seconds(&caps, 1))
}
