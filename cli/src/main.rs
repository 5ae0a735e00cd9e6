use std::fs;
use std::io::{self, Read};

use clap::{Parser, Subcommand};
use equalizer::config::{ConfigError, EqualizerConfig};
use equalizer::geometry::{EvenLayout, map_all};
use equalizer::path::{Anchors, PathDescription, build_path};
use equalizer::svg;
use equalizer::thumb::thumbs_from_config;
use serde_json::Value;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{given} values given for {thumbs} thumbs")]
    TooManyValues { given: usize, thumbs: usize },
}

#[derive(Parser, Debug)]
#[command(name = "equalizer", about = "Render equalizer curves without a browser")]
struct Cli {
    #[arg(long, env = "EQUALIZER_CONFIG", help = "Configuration JSON file, or - for stdin")]
    config: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Thumb values overriding the configured defaults")]
    values: Vec<f64>,

    #[arg(short, long, help = "Log debug output to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the `<svg>` document.
    Svg,
    /// Print the path data.
    Path {
        #[arg(long, default_value_t = false, help = "One command per line")]
        split: bool,
    },
    /// Print the effective configuration after merging over the defaults.
    Config,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(thumbs = config.values.len(), aspect_ratio = config.aspect_ratio, "configuration loaded");

    match cli.command {
        Command::Svg => {
            let path = curve(&config, &cli.values)?;
            print!("{}", svg::render_document(&config, &path.to_string()));
        }
        Command::Path { split } => {
            let path = curve(&config, &cli.values)?;
            if split {
                for command in &path.commands {
                    println!("{command}");
                }
            } else {
                println!("{path}");
            }
        }
        Command::Config => print_json(&serde_json::to_value(&config)?)?,
    }
    Ok(())
}

fn load_config(source: Option<&str>) -> Result<EqualizerConfig, CliError> {
    let Some(source) = source else {
        return Ok(EqualizerConfig::default());
    };
    let raw = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| CliError::Read { path: "stdin".to_owned(), source: err })?;
        buf
    } else {
        fs::read_to_string(source).map_err(|err| CliError::Read { path: source.to_owned(), source: err })?
    };
    parse_config(&raw)
}

fn parse_config(raw: &str) -> Result<EqualizerConfig, CliError> {
    if raw.trim().is_empty() {
        return Ok(EqualizerConfig::default());
    }
    let partial: Value = serde_json::from_str(raw)?;
    Ok(EqualizerConfig::from_partial(&partial)?)
}

/// Thumb values at rest, with `overrides` applied in order as if each input
/// had been dragged there.
fn thumb_values(config: &EqualizerConfig, overrides: &[f64]) -> Result<Vec<f64>, CliError> {
    let mut thumbs = thumbs_from_config(config);
    if overrides.len() > thumbs.len() {
        return Err(CliError::TooManyValues { given: overrides.len(), thumbs: thumbs.len() });
    }
    for (thumb, value) in thumbs.iter_mut().zip(overrides) {
        thumb.set_value(*value);
    }
    Ok(thumbs.iter().map(|t| t.value).collect())
}

fn curve(config: &EqualizerConfig, overrides: &[f64]) -> Result<PathDescription, CliError> {
    let values = thumb_values(config, overrides)?;
    let layout = EvenLayout::new(config.curve_width(), values.len());
    let points = map_all(&layout, &values, config.aspect_ratio);
    tracing::debug!(points = points.len(), "curve mapped");
    Ok(build_path(&points, &Anchors::from_config(config)))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
