/*!
 * Tests for timing estimation and timeline scaling
 */

use capsync::errors::SubtitleError;
use capsync::subtitle_processor::SubtitleTrack;
use capsync::timing::{TimelineScaler, TimingConfig, TimingEstimator};
use crate::common;

/// Test duration clamping at both ends
#[test]
fn test_durationFor_shouldClampToConfiguredBounds() {
    let estimator = TimingEstimator::default();

    assert_eq!(estimator.duration_for("short"), 1.5);
    assert_eq!(estimator.duration_for(&"x".repeat(30)), 2.0);
    assert_eq!(estimator.duration_for(&"x".repeat(300)), 7.0);
}

/// Test that characters, not bytes, drive the reading time
#[test]
fn test_durationFor_withMultibyteText_shouldCountCharacters() {
    let estimator = TimingEstimator::new(TimingConfig {
        chars_per_second: 1.0,
        min_duration: 0.1,
        max_duration: 100.0,
    });

    assert_eq!(estimator.duration_for("睡眠睡眠"), 4.0);
}

/// Test the consent narration timeline
#[test]
fn test_estimate_withConsentChunks_shouldMatchExpectedTimes() {
    let chunks = ["Patient will be asleep.", "You will not feel pain.", "Recovery takes time."];

    let track = TimingEstimator::default().estimate(&chunks);

    let times: Vec<(f64, f64)> = track.iter().map(|s| (s.start_time, s.end_time)).collect();
    assert_eq!(times, vec![(0.0, 1.53), (1.53, 3.07), (3.07, 4.57)]);
    assert_eq!(track.segments[2].sequence, 3);
}

/// Test that no chunks give an empty track
#[test]
fn test_estimate_withNoChunks_shouldReturnEmptyTrack() {
    let chunks: Vec<String> = Vec::new();

    let track = TimingEstimator::default().estimate(&chunks);

    assert!(track.is_empty());
    assert_eq!(track.total_duration(), 0.0);
}

/// Test scaling the consent timeline onto a known video length
#[test]
fn test_scaleToDuration_withDoubleLength_shouldDoubleEveryTimestamp() {
    let chunks = ["Patient will be asleep.", "You will not feel pain.", "Recovery takes time."];
    let track = TimingEstimator::default().estimate(&chunks);

    let scaled = TimelineScaler::scale_to_duration(&track, 9.14).unwrap();

    let ends: Vec<f64> = scaled.iter().map(|s| s.end_time).collect();
    assert_eq!(ends, vec![3.06, 6.14, 9.14]);
    assert_eq!(scaled.segments[0].start_time, 0.0);
    assert!(scaled.is_contiguous());
}

/// Test that an empty track cannot be scaled
#[test]
fn test_scaleFactor_withEmptyTrack_shouldReportCurrentDuration() {
    let result = TimelineScaler::scale_factor(&SubtitleTrack::new(), 10.0);

    assert_eq!(
        result,
        Err(SubtitleError::InvalidDuration {
            target_duration: 10.0,
            current_duration: 0.0,
        })
    );
}

/// Test that infinite and negative targets are rejected
#[test]
fn test_scaleToDuration_withUnusableTargets_shouldFail() {
    let mut track = SubtitleTrack::new();
    track.push(0.0, 2.0, "Hold still.");

    assert!(TimelineScaler::scale_to_duration(&track, f64::INFINITY).is_err());
    assert!(TimelineScaler::scale_to_duration(&track, -3.0).is_err());
}

/// Test that a shorter target compresses the timeline
#[test]
fn test_scaleToDuration_withShorterTarget_shouldCompress() {
    let mut track = SubtitleTrack::new();
    track.push(0.0, 4.0, "First.");
    track.push(4.0, 10.0, "Second.");

    let scaled = TimelineScaler::scale_to_duration(&track, 5.0).unwrap();

    common::assert_close(scaled.segments[0].end_time, 2.0, 1e-9);
    common::assert_close(scaled.total_duration(), 5.0, 1e-9);
}
