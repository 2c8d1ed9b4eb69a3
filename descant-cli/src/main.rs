mod args;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use descant_core::config::Config;
use descant_core::harmony::harmonize_pitches;
use descant_core::request::{analyze_json, analyze_upload, AnalyzeRequest};
use descant_core::transcribe::{synthesize_test_melody, MockTranscriber};
use descant_core::HarmonyError;

use args::{Command, USAGE};

/// Length of the generated test melody file.
const TEST_WAV_SECONDS: f32 = 2.0;

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("descant")
        .join("descant.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("descant.log")))
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("descant: logging disabled ({})", e);
            return;
        }
    };

    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_err() {
        eprintln!("descant: logger already initialized");
        return;
    }

    log::info!("descant starting (log level: {:?})", log_level);
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match args::parse(&argv) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("descant: {}\n\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };
    init_logging(parsed.verbose);

    let config = match &parsed.config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match run(parsed.command, &config, parsed.pretty) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("descant: {}", e);
            // Caller mistakes and host failures exit differently, like 4xx vs 5xx.
            if e.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn run(command: Command, config: &Config, pretty: bool) -> Result<(), HarmonyError> {
    match command {
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Analyze { wav, key } => {
            let bytes = std::fs::read(&wav)?;
            let key = key.unwrap_or_else(|| config.default_key());
            let transcriber = MockTranscriber::new(config.transcriber());
            let filename = wav.file_name().and_then(|n| n.to_str());
            let response = analyze_upload(&bytes, filename, None, &key, &transcriber)?;
            print_json(&response, pretty)
        }
        Command::AnalyzeJson { source } => {
            let body = read_source(&source)?;
            let request = AnalyzeRequest::from_json(&body)?;
            let transcriber = MockTranscriber::new(config.transcriber());
            let response = analyze_json(request, &transcriber, &config.default_key())?;
            print_json(&response, pretty)
        }
        Command::Harmonize {
            melody,
            key,
            keys_by_index,
        } => {
            let key = key.unwrap_or_else(|| config.default_key());
            let result = harmonize_pitches(&melody, &key, keys_by_index)?;
            print_json(&result, pretty)
        }
        Command::MakeTestWav { out } => {
            let settings = config.transcriber();
            synthesize_test_melody(&out, &settings.melody, settings.sample_rate, TEST_WAV_SECONDS)?;
            log::info!("wrote test melody to {}", out.display());
            println!("{}", out.display());
            Ok(())
        }
    }
}

/// Read a file, or stdin when the path is `-`.
fn read_source(source: &Path) -> Result<String, HarmonyError> {
    if source == Path::new("-") {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), HarmonyError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
