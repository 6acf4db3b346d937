/*!
 * Tests for error types
 */

use capsync::errors::{AppError, SubtitleError};

/// Test the scaling error message
#[test]
fn test_invalidDuration_display_shouldNameBothDurations() {
    let error = SubtitleError::InvalidDuration {
        target_duration: 0.0,
        current_duration: 4.57,
    };

    let message = error.to_string();

    assert!(message.contains("4.57"));
    assert!(message.contains("0s"));
}

/// Test the render error message
#[test]
fn test_invalidTimeRange_display_shouldNameSegment() {
    let error = SubtitleError::InvalidTimeRange {
        sequence: 12,
        start_time: 5.0,
        end_time: 2.0,
    };

    assert!(error.to_string().contains("segment 12"));
}

/// Test conversions into the application error
#[test]
fn test_appError_fromSources_shouldPickVariant() {
    let subtitle: AppError = SubtitleError::InvalidTimeRange {
        sequence: 1,
        start_time: 1.0,
        end_time: 1.0,
    }
    .into();
    assert!(matches!(subtitle, AppError::Subtitle(_)));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(io, AppError::File(_)));
    assert!(io.to_string().starts_with("File error"));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(other, AppError::Unknown(ref message) if message == "boom"));
}
