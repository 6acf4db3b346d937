use std::fmt::Write;

use crate::errors::SubtitleError;
use crate::subtitle_processor::{SubtitleTrack, TimedSegment};
use super::{format_timestamp, Format};

// @module: WebVTT / SRT serialization

/// Render a track as a complete caption file body.
///
/// Cues are numbered by render position. A segment whose start is not
/// strictly before its end is rejected rather than written.
pub fn render(track: &SubtitleTrack, format: Format) -> Result<String, SubtitleError> {
    let mut output = String::with_capacity(format.header().len() + track.len() * 64);
    output.push_str(format.header());

    for (index, segment) in track.iter().enumerate() {
        ensure_renderable(segment)?;
        write_cue(&mut output, index + 1, segment, format);
    }

    Ok(output)
}

fn ensure_renderable(segment: &TimedSegment) -> Result<(), SubtitleError> {
    if segment.has_valid_range() {
        Ok(())
    } else {
        Err(SubtitleError::InvalidTimeRange {
            sequence: segment.sequence,
            start_time: segment.start_time,
            end_time: segment.end_time,
        })
    }
}

fn write_cue(output: &mut String, index: usize, segment: &TimedSegment, format: Format) {
    // Writing into a String cannot fail
    let _ = writeln!(output, "{}", index);
    let _ = writeln!(
        output,
        "{} --> {}",
        format_timestamp(segment.start_time, format),
        format_timestamp(segment.end_time, format)
    );
    let _ = writeln!(output, "{}", segment.text);
    output.push('\n');
}
