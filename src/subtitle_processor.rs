use std::fmt;
use std::path::Path;
use anyhow::{Result, Context};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::formats::{self, Format};

// @module: Caption data model shared by every stage of the pipeline

// @struct: Single caption unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSegment {
    // @field: 1-based position within the track
    pub sequence: usize,

    // @field: Start time in seconds
    pub start_time: f64,

    // @field: End time in seconds
    pub end_time: f64,

    // @field: Caption text, may span several lines
    pub text: String,
}

impl TimedSegment {
    /// Creates a new timed segment
    pub fn new(sequence: usize, start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        TimedSegment {
            sequence,
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Display duration in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether the segment can be written as a caption cue
    pub fn has_valid_range(&self) -> bool {
        self.start_time.is_finite()
            && self.end_time.is_finite()
            && self.start_time >= 0.0
            && self.start_time < self.end_time
    }
}

/// Ordered captions for one source/language pairing.
///
/// Sequence numbers are kept contiguous from 1 by every constructor
/// in this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// Ordered caption units
    pub segments: Vec<TimedSegment>,
}

impl SubtitleTrack {
    /// Create an empty track
    pub fn new() -> Self {
        SubtitleTrack { segments: Vec::new() }
    }

    /// Build a track from segments, renumbering them 1..n in the given order
    pub fn from_segments(segments: Vec<TimedSegment>) -> Self {
        let mut track = SubtitleTrack { segments };
        track.renumber();
        track
    }

    /// Append a segment, assigning it the next sequence number
    pub fn push(&mut self, start_time: f64, end_time: f64, text: impl Into<String>) {
        let sequence = self.segments.len() + 1;
        self.segments.push(TimedSegment::new(sequence, start_time, end_time, text));
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedSegment> {
        self.segments.iter()
    }

    /// End time of the last segment, 0.0 for an empty track
    pub fn total_duration(&self) -> f64 {
        self.segments.last().map_or(0.0, |segment| segment.end_time)
    }

    /// Whether each segment ends exactly where the next one starts
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].end_time == pair[1].start_time)
    }

    fn renumber(&mut self) {
        for (i, segment) in self.segments.iter_mut().enumerate() {
            segment.sequence = i + 1;
        }
    }

    /// Load and parse an SRT file from disk
    pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let track = formats::parse_srt(&content);
        debug!("Loaded {} segments from {:?}", track.len(), path);
        Ok(track)
    }

    /// Render the track and write it to a caption file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, format: Format) -> Result<()> {
        let path = path.as_ref();
        let body = formats::render(self, format)
            .with_context(|| format!("Failed to render {} captions for {}", format, path.display()))?;
        FileManager::write_to_file(path, &body)
    }
}

impl<'a> IntoIterator for &'a SubtitleTrack {
    type Item = &'a TimedSegment;
    type IntoIter = std::slice::Iter<'a, TimedSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Segments: {}", self.segments.len())?;
        writeln!(f, "Duration: {:.2}s", self.total_duration())?;
        Ok(())
    }
}
