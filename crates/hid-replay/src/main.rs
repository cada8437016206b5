//! hid-replay - offline Xbox gamepad report tool.
//!
//! Decodes single input reports, prints rumble commands, and replays
//! captured report streams through a driver session.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openpad_hid_replay::{
    CaptureFile, decode_report, describe_state, parse_hex_bytes, parse_intensity, replay,
    rumble_hex,
};
use openpad_hid_xbox_protocol::ControllerVariant;
use openpad_joystick::DriverConfig;

#[derive(Parser)]
#[command(name = "hid-replay")]
#[command(about = "Decode, encode and replay Xbox-family gamepad reports")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one input report into the canonical state
    Decode {
        /// Wire format: original_pad, gen2_wired, gen2_wireless or gen3
        #[arg(short = 't', long)]
        variant: ControllerVariant,

        /// Report bytes, e.g. "0x20 0x00 0x1C 0x0E"
        data: String,
    },

    /// Print the rumble command for an intensity pair
    Rumble {
        #[arg(short = 't', long)]
        variant: ControllerVariant,

        /// Low-frequency motor intensity (decimal or 0x hex)
        #[arg(long, value_parser = parse_intensity)]
        low: u16,

        /// High-frequency motor intensity (decimal or 0x hex)
        #[arg(long, value_parser = parse_intensity)]
        high: u16,
    },

    /// Feed a capture file through a driver session and print the events
    Replay {
        /// Capture JSON file
        capture: PathBuf,

        /// Driver configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("openpad_hid_replay={log_level},openpad_joystick={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let output = run(&cli)?;
    print!("{output}");
    Ok(())
}

fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Decode { variant, data } => {
            let bytes = parse_hex_bytes(data).map_err(anyhow::Error::msg)?;
            let state = decode_report(*variant, &bytes)?;
            if cli.json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&state)?))
            } else {
                Ok(format!("{}\n", describe_state(&state)))
            }
        }
        Commands::Rumble { variant, low, high } => {
            let hex = rumble_hex(*variant, *low, *high);
            if cli.json {
                Ok(format!("{}\n", serde_json::json!({ "variant": variant, "data": hex })))
            } else {
                Ok(format!("{hex}\n"))
            }
        }
        Commands::Replay { capture, config } => {
            let config = match config {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read config {}", path.display()))?;
                    DriverConfig::from_json_str(&text)?
                }
                None => DriverConfig::default(),
            };
            let capture = CaptureFile::load(capture)?;
            let outcome = replay(&capture, config)?;
            if cli.json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&outcome)?))
            } else {
                Ok(outcome.render_text())
            }
        }
    }
}

// ── BDD-style scenario tests ────────────────────────────────────────────────
