use std::path::PathBuf;

use descant_types::KeyLabel;

pub const USAGE: &str = "\
usage: descant [-v|--verbose] [--pretty] [--config <file>] <command>

commands:
  analyze <file.wav> [--key <label>]
      transcribe a WAV file and harmonize it in one key
  analyze-json <request.json | ->
      handle a JSON request with base64 audio and optional key ranges
  harmonize --melody 60,62,r,64 [--key <label>] [--keys-by-index \"C Major,G Major\"]
      harmonize MIDI pitches directly (r, _ or rest marks a rest)
  make-test-wav <out.wav>
      write the configured test melody as a sine-wave WAV
  help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Analyze {
        wav: PathBuf,
        key: Option<KeyLabel>,
    },
    AnalyzeJson {
        source: PathBuf,
    },
    Harmonize {
        melody: Vec<Option<i32>>,
        key: Option<KeyLabel>,
        keys_by_index: Option<Vec<KeyLabel>>,
    },
    MakeTestWav {
        out: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
    pub verbose: bool,
    pub pretty: bool,
    pub config_path: Option<PathBuf>,
}

/// Parse the arguments after the program name.
pub fn parse(args: &[String]) -> Result<Args, String> {
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let pretty = args.iter().any(|a| a == "--pretty");
    let config_path = option_value(args, "--config")?.map(PathBuf::from);
    let key = option_value(args, "--key")?.map(KeyLabel::new);

    // Positionals are whatever isn't a flag or a flag's value.
    let mut positionals = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--verbose" | "-v" | "--pretty" => {}
            "--config" | "--key" | "--melody" | "--keys-by-index" => i += 1,
            other => positionals.push(other),
        }
        i += 1;
    }

    let command = match positionals.as_slice() {
        [] | ["help"] => Command::Help,
        ["analyze", wav] => Command::Analyze {
            wav: PathBuf::from(*wav),
            key,
        },
        ["analyze-json", source] => Command::AnalyzeJson {
            source: PathBuf::from(*source),
        },
        ["harmonize"] => {
            let melody = option_value(args, "--melody")?
                .ok_or("harmonize needs --melody")?;
            Command::Harmonize {
                melody: parse_melody(melody)?,
                key,
                keys_by_index: option_value(args, "--keys-by-index")?.map(parse_key_list),
            }
        }
        ["make-test-wav", out] => Command::MakeTestWav {
            out: PathBuf::from(*out),
        },
        other => return Err(format!("unrecognized command: {}", other.join(" "))),
    };

    Ok(Args {
        command,
        verbose,
        pretty,
        config_path,
    })
}

fn option_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| format!("{} needs a value", flag)),
    }
}

/// "60, 62,r,64" → [Some(60), Some(62), None, Some(64)]
fn parse_melody(s: &str) -> Result<Vec<Option<i32>>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match t.to_lowercase().as_str() {
            "r" | "_" | "rest" => Ok(None),
            _ => t
                .parse::<i32>()
                .map(Some)
                .map_err(|_| format!("bad pitch '{}' in --melody", t)),
        })
        .collect()
}

fn parse_key_list(s: &str) -> Vec<KeyLabel> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(KeyLabel::new)
        .collect()
}
