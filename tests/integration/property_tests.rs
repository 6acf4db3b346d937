/*!
 * Randomised checks of the pipeline's guarantees.
 *
 * Every test uses a fixed seed so failures reproduce.
 */

use capsync::formats::{parse_srt, render, Format};
use capsync::segmentation::TextSegmenter;
use capsync::timing::{TimelineScaler, TimingConfig, TimingEstimator};
use rand::Rng;
use crate::common;

const ROUNDS: usize = 200;

/// Rendering to SRT and parsing back keeps text and millisecond timing exactly
#[test]
fn test_srtRoundTrip_withRandomTracks_shouldPreserveSegments() {
    let mut rng = common::seeded_rng(7);

    for _ in 0..ROUNDS {
        let len = rng.random_range(1..25);
        let track = common::random_track(&mut rng, len);

        let body = render(&track, Format::Srt).unwrap();
        let parsed = parse_srt(&body);

        assert_eq!(parsed.len(), track.len());
        for (original, reparsed) in track.iter().zip(parsed.iter()) {
            assert_eq!(reparsed.sequence, original.sequence);
            assert_eq!(reparsed.text, original.text);
            assert_eq!(reparsed.start_time, original.start_time);
            assert_eq!(reparsed.end_time, original.end_time);
        }
    }
}

/// WebVTT and SRT bodies differ only in the header and the millisecond separator
#[test]
fn test_render_withRandomTracks_shouldDifferOnlyInHeaderAndSeparator() {
    let mut rng = common::seeded_rng(11);

    for _ in 0..ROUNDS {
        let len = rng.random_range(0..10);
        let track = common::random_track(&mut rng, len);

        let vtt = render(&track, Format::WebVtt).unwrap();
        let srt = render(&track, Format::Srt).unwrap();

        let vtt_body = vtt.strip_prefix("WEBVTT\n\n").unwrap();
        let vtt_lines: Vec<&str> = vtt_body.lines().collect();
        let srt_lines: Vec<&str> = srt.lines().collect();
        assert_eq!(vtt_lines.len(), srt_lines.len());

        for (v, s) in vtt_lines.iter().zip(srt_lines.iter()) {
            if s.contains(" --> ") {
                assert_eq!(v.replace('.', ","), *s);
            } else {
                assert_eq!(v, s);
            }
        }
    }
}

/// Scaling to a new duration and back recovers every timestamp
#[test]
fn test_scale_thenScaleBack_shouldRecoverTimestamps() {
    let mut rng = common::seeded_rng(23);

    for _ in 0..ROUNDS {
        let len = rng.random_range(1..20);
        let track = common::random_track(&mut rng, len);
        let original_duration = track.total_duration();
        let target = original_duration * rng.random_range(1.0..2.0);

        let scaled = TimelineScaler::scale_to_duration(&track, target).unwrap();
        common::assert_close(scaled.total_duration(), target, 0.005 + 1e-9);

        let restored = TimelineScaler::scale_to_duration(&scaled, original_duration).unwrap();
        for (original, back) in track.iter().zip(restored.iter()) {
            common::assert_close(back.start_time, original.start_time, 0.02);
            common::assert_close(back.end_time, original.end_time, 0.02);
            assert_eq!(back.text, original.text);
        }
    }
}

/// Chunks respect the limit unless a single sentence exceeds it, and
/// joining them with single spaces gives back the cleaned narration
#[test]
fn test_segment_withRandomNarration_shouldRespectLimitAndPreserveText() {
    let mut rng = common::seeded_rng(31);

    for _ in 0..ROUNDS {
        let limit = rng.random_range(10..150);
        let sentences = rng.random_range(0..15);
        let narration = common::random_narration(&mut rng, sentences);
        let segmenter = TextSegmenter::new(limit);

        let chunks = segmenter.segment(&narration);

        assert_eq!(chunks.join(" "), TextSegmenter::clean_text(&narration));

        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert_eq!(chunk.trim(), chunk);
            let chars = chunk.chars().count();
            if chars > limit {
                assert_eq!(
                    TextSegmenter::split_sentences(chunk).len(),
                    1,
                    "chunk of {} chars over limit {} holds several sentences ({:?})",
                    chars,
                    limit,
                    chunk
                );
            }
        }
    }
}

/// Estimated tracks start at zero, are contiguous and keep clamped durations
#[test]
fn test_estimate_withRandomChunks_shouldBeContiguousAndBounded() {
    let mut rng = common::seeded_rng(47);

    for _ in 0..ROUNDS {
        let min_duration = rng.random_range(0.5..3.0);
        let config = TimingConfig {
            chars_per_second: rng.random_range(5.0..25.0),
            min_duration,
            max_duration: min_duration + rng.random_range(0.0..8.0),
        };
        let estimator = TimingEstimator::new(config.clone());

        let count = rng.random_range(1..30);
        let chunks: Vec<String> = (0..count).map(|_| common::random_phrase(&mut rng, 40)).collect();

        let track = estimator.estimate(&chunks);

        assert_eq!(track.len(), chunks.len());
        assert_eq!(track.segments[0].start_time, 0.0);
        assert!(track.is_contiguous());

        for (i, segment) in track.iter().enumerate() {
            assert_eq!(segment.sequence, i + 1);
            assert_eq!(segment.text, chunks[i]);
            // Each boundary is rounded to centiseconds on its own
            assert!(segment.duration() >= config.min_duration - 0.0101);
            assert!(segment.duration() <= config.max_duration + 0.0101);
        }
    }
}
