use clap::{Parser, Subcommand};
use kscan::confirm::{ConfigIoError, RecordedStream, ReplayReport, SessionConfig, SessionError};
use kscan::core::{BarcodeFormat, ParseFormatError};
use kscan::formats::{builtins, FormatError, FormatTranslator};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kscan", version, about = "Barcode scan confirmation tools")]
struct Cli {
    #[arg(long, short, global = true, help = "Enable debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded decoder stream through a scan session.
    Replay {
        /// Recorded stream (JSON).
        stream: PathBuf,
        /// Session config (JSON). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the formats a decoder table maps.
    Formats {
        /// Decoder name; all built-in decoders when omitted.
        #[arg(long)]
        decoder: Option<String>,
    },
    /// Show the native mask a format request translates to.
    Mask {
        #[arg(long, default_value = "mlkit")]
        decoder: String,
        /// Requested formats, e.g. `QR_CODE EAN_13`. Empty means all.
        formats: Vec<String>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] ConfigIoError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    ParseFormat(#[from] ParseFormatError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct FormatRow {
    format: BarcodeFormat,
    code: i32,
}

#[derive(Serialize)]
struct DecoderFormats {
    decoder: &'static str,
    all_formats: i32,
    formats: Vec<FormatRow>,
    content_types: Vec<FormatRow>,
}

#[derive(Serialize)]
struct MaskReport {
    decoder: &'static str,
    requested: Vec<BarcodeFormat>,
    /// Single integer for bitmask decoders.
    #[serde(skip_serializing_if = "Option::is_none")]
    mask: Option<i32>,
    codes: Vec<i32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Replay {
            stream,
            config,
            output,
        } => replay(stream, config, output),
        Commands::Formats { decoder } => formats(decoder.as_deref()),
        Commands::Mask { decoder, formats } => mask(&decoder, &formats),
    }
}

fn replay(
    stream: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = match config {
        Some(path) => SessionConfig::load_json(path)?,
        None => SessionConfig::default(),
    };
    let stream = RecordedStream::load_json(&stream)?;
    log::info!("replaying {} decoder messages", stream.messages.len());

    let report = ReplayReport::run(&config, &stream)?;
    log::info!(
        "replay done: {} events, {} frames processed",
        report.events.len(),
        report.summary.tracker.frames_processed
    );

    match output {
        Some(path) => {
            report.write_json(&path)?;
            log::info!("report written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn formats(decoder: Option<&str>) -> Result<(), CliError> {
    let translators = match decoder {
        Some(name) => vec![FormatTranslator::for_decoder(name)?],
        None => builtins::BUILTIN_TABLE_NAMES
            .iter()
            .map(|name| FormatTranslator::for_decoder(name))
            .collect::<Result<Vec<_>, FormatError>>()?,
    };

    let rows: Vec<DecoderFormats> = translators
        .iter()
        .map(|t| {
            let table = t.table();
            DecoderFormats {
                decoder: table.name,
                all_formats: table.all_formats.0,
                formats: table
                    .formats
                    .iter()
                    .map(|&(format, code)| FormatRow { format, code: code.0 })
                    .collect(),
                content_types: table
                    .content_types
                    .iter()
                    .map(|&(format, code)| FormatRow { format, code: code.0 })
                    .collect(),
            }
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn mask(decoder: &str, formats: &[String]) -> Result<(), CliError> {
    let translator = FormatTranslator::for_decoder(decoder)?;
    let requested = formats
        .iter()
        .map(|f| f.parse::<BarcodeFormat>())
        .collect::<Result<Vec<_>, ParseFormatError>>()?;
    let mask = translator.checked_native_mask(&requested)?;

    let report = MaskReport {
        decoder: translator.table().name,
        mask: translator.raw_mask(&mask),
        codes: translator.native_codes(&mask).iter().map(|c| c.0).collect(),
        requested,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: bool) {
    let _ = LogTracer::init();
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let _ = kscan::core::init_with_level(level);
}
