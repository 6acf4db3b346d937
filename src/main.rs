// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use capsync::app_config::{Config, LogLevel};
use capsync::app_controller::{Controller, RunOptions};
use capsync::file_utils::{FileManager, FileType};
use capsync::formats::{self, Format};
use capsync::localization::{self, TranslationLookup, TranslationTable};
use capsync::validation::{validate_count, TrackValidator, TrackValidatorConfig};
use capsync::SubtitleTrack;

/// CLI Wrapper for Format to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Vtt,
    Srt,
}

impl From<CliFormat> for Format {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Vtt => Format::WebVtt,
            CliFormat::Srt => Format::Srt,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate timed captions from narration text files
    Generate(ProcessArgs),

    /// Convert SRT files to WebVTT or SRT, optionally retimed
    Convert(ProcessArgs),

    /// Parse an SRT file and report timing problems
    Check {
        /// SRT file to inspect
        #[arg(value_name = "SRT_FILE")]
        input_path: PathBuf,

        /// Number of cues the file is expected to contain
        #[arg(long)]
        expected: Option<usize>,

        /// Report gaps between cues as problems
        #[arg(long)]
        contiguous: bool,
    },

    /// Generate shell completions for capsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Input file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output caption format
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliFormat>,

    /// Measured video duration in seconds to stretch the timeline onto
    #[arg(short, long)]
    duration: Option<f64>,

    /// Language of the output captions (e.g., 'fr', 'zh')
    #[arg(short, long)]
    target_language: Option<String>,

    /// JSON file with translated caption text
    #[arg(long, value_name = "FILE")]
    translations: Option<PathBuf>,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the caption file to stdout instead of writing it
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// capsync - caption segmentation, timing and SRT/WebVTT conversion
#[derive(Parser, Debug)]
#[command(name = "capsync")]
#[command(version)]
#[command(about = "Narration-to-caption generator and SRT/WebVTT converter")]
#[command(long_about = "capsync splits narration text into timed captions and converts SRT files.

EXAMPLES:
    capsync generate consent.txt                      # consent.en.vtt next to the input
    capsync generate -F srt -d 184.2 consent.txt      # SRT stretched to a 184.2s video
    capsync generate -t fr --translations fr.json consent.txt
    capsync convert -F vtt upload.srt                 # SRT to WebVTT
    capsync convert --stdout upload.srt               # print instead of writing
    capsync check --expected 42 upload.srt            # report parse and timing problems
    capsync completions bash > capsync.bash

CONFIGURATION:
    Settings are stored in conf.json by default. A default file is created
    when none exists. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and prefix for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, prefix) = Self::style_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, prefix, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            write_completions(shell, &mut std::io::stdout());
            Ok(())
        }
        Commands::Generate(args) => {
            let config = load_config(&cli.config_path, cli.log_level)?;
            run_process(config, args, FileType::Narration)
        }
        Commands::Convert(args) => {
            let config = load_config(&cli.config_path, cli.log_level)?;
            run_process(config, args, FileType::Subtitle)
        }
        Commands::Check { input_path, expected, contiguous } => {
            load_config(&cli.config_path, cli.log_level)?;
            run_check(&input_path, expected, contiguous)
        }
    }
}

// @writes: Shell completion script, no config file involved
fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = CommandLineOptions::command();
    generate(shell, &mut cmd, "capsync", out);
}

fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    // Apply the command line level early so config loading is logged at it
    if let Some(level) = &log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    let mut config = Config::load_or_create(config_path)?;

    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

fn run_process(config: Config, args: ProcessArgs, expected_type: FileType) -> Result<()> {
    let translations = args
        .translations
        .as_ref()
        .map(TranslationTable::from_file)
        .transpose()?;
    let lookup = translations.as_ref().map(|table| table as &dyn TranslationLookup);

    let options = RunOptions {
        format: args.format.map(Format::from),
        target_duration: args.duration,
        target_language: args.target_language.clone(),
        force_overwrite: args.force_overwrite,
    };

    let controller = Controller::with_config(config)?;
    let input_path = &args.input_path;

    if FileManager::dir_exists(input_path) {
        if args.stdout {
            return Err(anyhow!("--stdout needs a single input file, got directory {:?}", input_path));
        }
        let extensions: &[&str] = match expected_type {
            FileType::Subtitle => &["srt"],
            _ => &["txt"],
        };
        controller.run_folder(input_path, extensions, &options, lookup)?;
        return Ok(());
    }

    if !FileManager::file_exists(input_path) {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    let detected = FileManager::detect_file_type(input_path)?;
    if detected != expected_type {
        warn!("{:?} does not look like {:?} input, processing it as {:?}", input_path, expected_type, detected);
    }

    if args.stdout {
        let mut track = controller.load_track(input_path, options.target_duration)?;
        let language = options
            .target_language
            .clone()
            .unwrap_or_else(|| controller.config().source_language.clone());
        if let Some(lookup) = lookup {
            track = localization::resolve_translations(&track, &controller.config().source_language, &language, lookup);
        }
        let format = options.format.unwrap_or(controller.config().output.format);
        print!("{}", formats::render(&track, format)?);
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| input_path.parent().unwrap_or(Path::new(".")).to_path_buf());

    controller.run(input_path, &output_dir, &options, lookup)?;
    Ok(())
}

fn run_check(input_path: &Path, expected: Option<usize>, contiguous: bool) -> Result<()> {
    let track = SubtitleTrack::parse_srt_file(input_path)?;
    info!("{:?}: {} cues, {:.2}s", input_path, track.len(), track.total_duration());

    let validator = TrackValidator::with_config(TrackValidatorConfig {
        require_contiguous: contiguous,
        ..TrackValidatorConfig::default()
    });
    let report = validator.validate_track(&track);

    for check in report.failed_segments() {
        for issue in &check.issues {
            warn!("Cue {}: {}", check.sequence, issue);
        }
    }

    let mut failed = !report.passed;
    if let Some(expected) = expected {
        if let Err(e) = validate_count(&track, expected) {
            error!("{}", e);
            failed = true;
        }
    }

    if failed {
        return Err(anyhow!("{:?} failed validation with {} issue(s)", input_path, report.total_issues));
    }

    info!("No problems found");
    Ok(())
}
