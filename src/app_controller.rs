use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::formats::{self, Format};
use crate::localization::{self, TranslationLookup};
use crate::segmentation::TextSegmenter;
use crate::subtitle_processor::SubtitleTrack;
use crate::timing::{TimelineScaler, TimingEstimator};

// @module: Application controller for caption generation

/// Options for a single file run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Output format, the configured default when `None`
    pub format: Option<Format>,
    /// Measured video duration to stretch the timeline onto
    pub target_duration: Option<f64>,
    /// Language of the output captions, the source language when `None`
    pub target_language: Option<String>,
    /// Overwrite existing output files
    pub force_overwrite: bool,
}

/// Main application controller for caption generation and conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
    segmenter: TextSegmenter,
    estimator: TimingEstimator,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            segmenter: TextSegmenter::new(config.segmentation.max_chars_per_subtitle),
            estimator: TimingEstimator::new(config.timing.clone()),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Segment and time narration text, optionally stretched onto a known duration.
    ///
    /// An unusable duration falls back to the unscaled estimate.
    pub fn build_track(&self, text: &str, target_duration: Option<f64>) -> SubtitleTrack {
        let chunks = self.segmenter.segment(text);
        let track = self.estimator.estimate(&chunks);
        Self::apply_duration(track, target_duration)
    }

    fn apply_duration(track: SubtitleTrack, target_duration: Option<f64>) -> SubtitleTrack {
        let Some(duration) = target_duration else {
            return track;
        };

        match TimelineScaler::scale_to_duration(&track, duration) {
            Ok(scaled) => scaled,
            Err(e) => {
                warn!("{}; keeping the estimated timeline", e);
                track
            }
        }
    }

    /// Narration text to a complete caption file body
    pub fn generate(&self, text: &str, format: Format, target_duration: Option<f64>) -> Result<String> {
        let track = self.build_track(text, target_duration);
        Ok(formats::render(&track, format)?)
    }

    /// SRT text to a complete caption file body in `format`
    pub fn convert_srt(&self, content: &str, format: Format, target_duration: Option<f64>) -> Result<String> {
        let track = formats::parse_srt(content);
        if track.is_empty() {
            warn!("No valid SRT blocks found; output will contain no cues");
        }
        let track = Self::apply_duration(track, target_duration);
        Ok(formats::render(&track, format)?)
    }

    /// Load a track from a narration or SRT file
    pub fn load_track(&self, input_file: &Path, target_duration: Option<f64>) -> Result<SubtitleTrack> {
        match FileManager::detect_file_type(input_file)? {
            FileType::Narration => {
                let text = FileManager::read_to_string(input_file)?;
                Ok(self.build_track(&text, target_duration))
            }
            FileType::Subtitle => {
                let track = SubtitleTrack::parse_srt_file(input_file)?;
                Ok(Self::apply_duration(track, target_duration))
            }
            FileType::Unknown => Err(anyhow!("Unsupported input file: {:?}", input_file)),
        }
    }

    /// Process one input file into a caption file next to `output_dir`.
    ///
    /// Returns the written path, or `None` when an existing output was kept.
    pub fn run(
        &self,
        input_file: &Path,
        output_dir: &Path,
        options: &RunOptions,
        translations: Option<&dyn TranslationLookup>,
    ) -> Result<Option<PathBuf>> {
        let format = options.format.unwrap_or(self.config.output.format);
        let language = self.output_language(options);

        let output_file = FileManager::generate_output_path(input_file, output_dir, &language, format.extension());
        if output_file.exists() && !options.force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_file);
            return Ok(None);
        }

        let mut track = self.load_track(input_file, options.target_duration)?;
        debug!("Loaded {} segments from {:?}", track.len(), input_file);

        if let Some(lookup) = translations {
            track = localization::resolve_translations(&track, &self.config.source_language, &language, lookup);
        }

        track
            .write_to_file(&output_file, format)
            .with_context(|| format!("Failed to write captions for {:?}", input_file))?;

        info!("Success: {:?} ({} cues)", output_file, track.len());
        Ok(Some(output_file))
    }

    fn output_language(&self, options: &RunOptions) -> String {
        options
            .target_language
            .clone()
            .unwrap_or_else(|| self.config.source_language.clone())
    }

    /// Process every file with one of `extensions` below `input_dir`.
    ///
    /// Outputs are written next to their inputs; a failing file is logged
    /// and skipped. Caption files this run would itself produce
    /// (`<stem>.<lang>.srt|vtt`) are not treated as inputs, so rerunning on
    /// the same folder does not stack language suffixes. Returns the number
    /// of files written.
    pub fn run_folder(
        &self,
        input_dir: &Path,
        extensions: &[&str],
        options: &RunOptions,
        translations: Option<&dyn TranslationLookup>,
    ) -> Result<usize> {
        info!("Processing directory: {:?}", input_dir);

        let language = self.output_language(options);
        let inputs = FileManager::find_files(input_dir, extensions)?;
        let mut processed_count = 0;

        for input in inputs {
            if FileManager::is_caption_output(&input, &language) {
                debug!("Skipping earlier output {:?}", input);
                continue;
            }

            let output_dir = input.parent().unwrap_or(Path::new(".")).to_path_buf();
            match self.run(&input, &output_dir, options, translations) {
                Ok(Some(_)) => processed_count += 1,
                Ok(None) => {}
                Err(e) => error!("Error processing file {:?}: {:#}", input, e),
            }
        }

        info!("Finished processing {} files", processed_count);
        Ok(processed_count)
    }
}
