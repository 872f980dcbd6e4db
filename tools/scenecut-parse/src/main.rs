//! Scenecut command-line parser
//!
//! Parses release names given as arguments (or one per line on stdin) and
//! prints one JSON envelope per name.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use scenecut_core::{Parser as ReleaseParser, ParserConfig};

const MISSING_INPUT: &str = "requires a single torrent name as an arg";

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "scenecut-parse")]
#[command(about = "Extract structured metadata from scene and fansub release names")]
#[command(version)]
struct Cli {
    /// Release names to parse
    names: Vec<String>,

    /// Read release names from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Include every claimed span in the output
    #[arg(short, long)]
    explain: bool,

    /// TOML file with extra vocabulary entries and the year range
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Success<T> {
    success: bool,
    result: T,
}

#[derive(Debug, Serialize)]
struct Failure<'a> {
    success: bool,
    message: &'a str,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_parser(config: Option<&PathBuf>) -> Result<ReleaseParser> {
    let config = match config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            ParserConfig::from_toml_str(&source)
                .with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => ParserConfig::default(),
    };

    ReleaseParser::new(config).context("failed to build parser")
}

/// Serializes `value`, pretty-printed with four-space indentation if asked.
fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(value)?);
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

fn render_one(parser: &ReleaseParser, name: &str, cli: &Cli) -> Result<String> {
    debug!(name, "parsing");
    if cli.explain {
        render(
            &Success {
                success: true,
                result: parser.explain(name),
            },
            cli.pretty,
        )
    } else {
        render(
            &Success {
                success: true,
                result: parser.parse(name),
            },
            cli.pretty,
        )
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.names.is_empty() && !cli.stdin {
        let message = render(
            &Failure {
                success: false,
                message: MISSING_INPUT,
            },
            cli.pretty,
        )?;
        eprintln!("{message}");
        return Ok(ExitCode::FAILURE);
    }

    let parser = build_parser(cli.config.as_ref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for name in &cli.names {
        writeln!(out, "{}", render_one(&parser, name, cli)?).context("failed to write output")?;
    }

    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            writeln!(out, "{}", render_one(&parser, name, cli)?)
                .context("failed to write output")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_names() {
        let cli = Cli::try_parse_from([
            "scenecut-parse",
            "--pretty",
            "-e",
            "-vv",
            "Movie.2015.720p.mkv",
            "Show.S01E01.mkv",
        ])
        .unwrap();
        assert!(cli.pretty);
        assert!(cli.explain);
        assert!(!cli.stdin);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.names.len(), 2);
    }

    #[test]
    fn config_flag_takes_a_path() {
        let cli = Cli::try_parse_from(["scenecut-parse", "-c", "extra.toml", "--stdin"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("extra.toml")));
        assert!(cli.stdin);
        assert!(cli.names.is_empty());
    }

    #[test]
    fn missing_input_exits_with_failure() {
        let cli = Cli::try_parse_from(["scenecut-parse"]).unwrap();
        let code = run(&cli).unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn failure_envelope() {
        let json = render(
            &Failure {
                success: false,
                message: MISSING_INPUT,
            },
            false,
        )
        .unwrap();
        assert_eq!(
            json,
            r#"{"success":false,"message":"requires a single torrent name as an arg"}"#
        );
    }

    #[test]
    fn success_envelope() {
        let cli = Cli::try_parse_from(["scenecut-parse", "x"]).unwrap();
        let parser = ReleaseParser::with_defaults().unwrap();
        let json = render_one(&parser, "Movie.Title.2015.720p.BluRay.x264-GROUP.mkv", &cli).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["result"]["title"], "Movie Title");
        assert_eq!(value["result"]["year"], 2015);
        assert_eq!(value["result"]["group"], "GROUP");
    }

    #[test]
    fn explain_envelope_lists_claims() {
        let cli = Cli::try_parse_from(["scenecut-parse", "--explain", "x"]).unwrap();
        let parser = ReleaseParser::with_defaults().unwrap();
        let json = render_one(&parser, "The.Show.S02E05.1080p.mkv", &cli).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["release"]["title"], "The Show");
        let claims = value["result"]["claims"].as_array().unwrap();
        assert_eq!(claims[0]["field"], "season_episode");
        assert_eq!(claims[0]["text"], "S02E05");
        assert_eq!(claims[0]["raw"]["start"], 9);
    }

    #[test]
    fn pretty_output_uses_four_spaces() {
        let json = render(&serde_json::json!({"a": 1}), true).unwrap();
        assert_eq!(json, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn missing_config_file_is_reported() {
        let path = PathBuf::from("/nonexistent/scenecut.toml");
        let err = build_parser(Some(&path)).err().unwrap();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
