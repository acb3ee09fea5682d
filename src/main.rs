// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use subprose::app_config::{Browser, Config, LogLevel};
use subprose::app_controller::{Controller, Transcript};
use subprose::file_utils::FileManager;

/// CLI Wrapper for Browser to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliBrowser {
    Brave,
    Chrome,
    Chromium,
    Edge,
    Firefox,
    Opera,
    Safari,
    Vivaldi,
}

impl CliBrowser {
    fn into_browser(self) -> Browser {
        match self {
            CliBrowser::Brave => Browser::Brave,
            CliBrowser::Chrome => Browser::Chrome,
            CliBrowser::Chromium => Browser::Chromium,
            CliBrowser::Edge => Browser::Edge,
            CliBrowser::Firefox => Browser::Firefox,
            CliBrowser::Opera => Browser::Opera,
            CliBrowser::Safari => Browser::Safari,
            CliBrowser::Vivaldi => Browser::Vivaldi,
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
    /// Fetch subtitles for a video URL and print them as paragraphs
    Fetch(FetchArgs),

    /// Clean a local WebVTT or SRT file
    Clean(CleanArgs),

    /// Generate shell completions for subprose
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Video URL
    #[arg(value_name = "URL")]
    url: String,

    /// Preferred subtitle language (e.g., 'tr', 'en', 'de')
    #[arg(short, long, env = "SUBPROSE_LANGUAGE")]
    language: Option<String>,

    /// Browser to read cookies from (overrides fetch.browser in the config)
    #[arg(short, long, value_enum)]
    browser: Option<CliBrowser>,

    /// Save the transcript as <title>.txt
    #[arg(short, long)]
    save: bool,

    /// Directory for saved transcripts (implies --save)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Print {"title", "content"} JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct CleanArgs {
    /// Subtitle file to clean
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the cleaned text to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Print {"title", "content"} JSON instead of plain text
    #[arg(long)]
    json: bool,
}

/// subprose - Video subtitles as readable prose
#[derive(Parser, Debug)]
#[command(name = "subprose")]
#[command(version)]
#[command(about = "Fetch video subtitles and turn them into readable paragraphs")]
#[command(long_about = "subprose downloads subtitles with yt-dlp and cleans WebVTT/SRT markup into paragraphs.

EXAMPLES:
    subprose fetch https://youtu.be/VIDEO                 # Print the transcript
    subprose fetch -l en https://youtu.be/VIDEO           # Prefer English subtitles
    subprose fetch -b firefox --save https://youtu.be/VIDEO
    subprose fetch --json https://youtu.be/VIDEO          # {\"title\", \"content\"}
    subprose clean talk.en.vtt -o talk.txt                # Clean a local file
    subprose completions bash > subprose.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Log everything the max level allows; the level is narrowed after config load
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Some(level) = &cli.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subprose", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Fetch(args) => run_fetch(&controller, args).await,
        Commands::Clean(args) => run_clean(&controller, args),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the config file, creating a default one when it doesn't exist
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Update log level in config if specified via command line
    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_fetch(controller: &Controller, args: FetchArgs) -> Result<()> {
    let browser = args.browser.map(CliBrowser::into_browser);
    let transcript = controller
        .fetch_transcript(&args.url, args.language.as_deref(), browser)
        .await?;

    if args.save || args.output_dir.is_some() {
        match controller.save_transcript(&transcript, args.output_dir.as_deref(), args.force_overwrite)? {
            Some(path) => info!("Success: {:?}", path),
            None => warn!("Transcript not saved"),
        }
    }

    print_transcript(&transcript, args.json)
}

fn run_clean(controller: &Controller, args: CleanArgs) -> Result<()> {
    let transcript = controller.clean_file(&args.input)?;

    let Some(output) = args.output else {
        return print_transcript(&transcript, args.json);
    };

    if output.exists() && !args.force_overwrite {
        return Err(anyhow!("Output file already exists: {:?}. Use -f to force overwrite.", output));
    }

    let body = if args.json {
        serde_json::to_string_pretty(&transcript).context("Failed to serialize transcript")?
    } else {
        transcript.content.clone()
    };
    FileManager::write_to_file(&output, &body)?;
    info!("Success: {:?} ({} paragraphs)", output, transcript.paragraph_count);

    Ok(())
}

fn print_transcript(transcript: &Transcript, json: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, transcript).context("Failed to serialize transcript")?;
        writeln!(stdout)?;
    } else if !transcript.content.is_empty() {
        writeln!(stdout, "{}", transcript.content)?;
    }
    Ok(())
}
