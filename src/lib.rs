/*!
 * # capsync - caption segmentation, timing and SRT/WebVTT engine
 *
 * Turns narration text into timed captions and moves captions between
 * the two plain-text formats caption players understand.
 *
 * ## Features
 *
 * - Sentence-respecting segmentation of narration text
 * - Reading-speed timing with clamped per-caption durations
 * - Proportional rescaling of a timeline onto a measured video duration
 * - Byte-exact WebVTT and SRT rendering
 * - Tolerant SRT import that skips malformed blocks
 * - Translation resolution with fallback to the original text
 *
 * ## Architecture
 *
 * Pipeline: text → `segmentation` → `timing::estimator` →
 * (`timing::scaler`) → `formats::renderer`; SRT input enters through
 * `formats::parser`. Every engine stage is a pure function over in-memory
 * values.
 *
 * - `subtitle_processor`: `TimedSegment` and `SubtitleTrack`
 * - `segmentation`: narration text splitting
 * - `timing`: duration estimation and timeline scaling
 * - `formats`: WebVTT/SRT rendering and SRT parsing
 * - `localization`: translation lookup and fallback
 * - `validation`: track checks for callers that need strictness
 * - `app_config`: Configuration management
 * - `app_controller`: file-level orchestration used by the CLI
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod formats;
pub mod language_utils;
pub mod localization;
pub mod segmentation;
pub mod subtitle_processor;
pub mod timing;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions};
pub use errors::{AppError, SubtitleError};
pub use formats::{format_timestamp, parse_srt, render, Format};
pub use localization::{resolve_translations, TranslationLookup, TranslationTable};
pub use segmentation::TextSegmenter;
pub use subtitle_processor::{SubtitleTrack, TimedSegment};
pub use timing::{TimelineScaler, TimingConfig, TimingEstimator};
pub use validation::TrackValidator;
