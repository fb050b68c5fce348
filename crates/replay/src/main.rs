//! dongle-replay - run captured dongle traffic through the controller stack
//!
//! Replays connect, packet, feedback and disconnect events against a dongle
//! with a recording radio transport and logging virtual devices, and prints
//! every radio frame and input report they produce.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod capture;
mod device;
mod error;
mod output;
mod replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use opendongle_dongle::{DongleConfig, MacAddress, RadioTransport, RecordingTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::capture::CaptureFile;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "dongle-replay")]
#[command(about = "Replay captured wireless dongle traffic and print the resulting radio frames")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a capture file through a simulated dongle
    Replay {
        /// Capture file (JSON)
        capture: PathBuf,
        /// Dongle configuration file (JSON or YAML)
        #[arg(long, env = "OPENDONGLE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the radio frame the dongle would send for one payload
    Frame {
        /// Wireless client id (1-16)
        #[arg(long)]
        wcid: u8,
        /// Client MAC address
        #[arg(long)]
        address: MacAddress,
        /// Dongle MAC address
        #[arg(long)]
        dongle_address: Option<MacAddress>,
        /// GIP payload as hex
        #[arg(long)]
        payload: String,
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
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e
                .downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(1);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Replay { capture, config } => {
            let config = load_config(config.as_deref())?;
            let capture = CaptureFile::from_path(capture)?;
            let log = replay::run(&capture, config)?;
            output::print_replay(&log, cli.json);
            Ok(())
        }
        Commands::Frame {
            wcid,
            address,
            dongle_address,
            payload,
        } => {
            let dongle = dongle_address.unwrap_or_else(|| RecordingTransport::default().mac_address());
            let frame = replay::frame(*wcid, *address, dongle, payload)?;
            output::print_frame(&frame, cli.json);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DongleConfig> {
    let config = match path {
        Some(path) => DongleConfig::from_path(path)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => DongleConfig::default(),
    };
    Ok(config.from_env_overrides().map_err(CliError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::io::Write;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // ═══ Scenario: Argument parsing ════════════════════════════════════════

    /// GIVEN a replay invocation with a config file and verbosity
    /// WHEN the arguments are parsed
    /// THEN the capture, config and verbosity are set
    #[test]
    fn given_replay_args_when_parsed_then_fields_set() -> TestResult {
        let cli = Cli::try_parse_from([
            "dongle-replay",
            "-vv",
            "replay",
            "capture.json",
            "--config",
            "dongle.yaml",
        ])?;
        assert_eq!(cli.verbose, 2);
        assert!(!cli.json);
        match cli.command {
            Commands::Replay { capture, config } => {
                assert_eq!(capture, PathBuf::from("capture.json"));
                assert_eq!(config, Some(PathBuf::from("dongle.yaml")));
            }
            Commands::Frame { .. } => return Err("expected replay".into()),
        }
        Ok(())
    }

    /// GIVEN a frame invocation with --json after the subcommand
    /// WHEN the arguments are parsed
    /// THEN the address is parsed as a MAC and json is set
    #[test]
    fn given_frame_args_when_parsed_then_mac_parsed() -> TestResult {
        let cli = Cli::try_parse_from([
            "dongle-replay",
            "frame",
            "--wcid",
            "2",
            "--address",
            "7c:ed:8d:11:22:33",
            "--payload",
            "05 20 00 01 00",
            "--json",
        ])?;
        assert!(cli.json);
        match cli.command {
            Commands::Frame {
                wcid,
                address,
                dongle_address,
                ..
            } => {
                assert_eq!(wcid, 2);
                assert_eq!(address, MacAddress::new([0x7C, 0xED, 0x8D, 0x11, 0x22, 0x33]));
                assert!(dongle_address.is_none());
            }
            Commands::Replay { .. } => return Err("expected frame".into()),
        }
        Ok(())
    }

    /// GIVEN a malformed MAC address
    /// WHEN the arguments are parsed
    /// THEN parsing fails
    #[test]
    fn given_bad_mac_when_parsed_then_rejected() {
        let result = Cli::try_parse_from([
            "dongle-replay",
            "frame",
            "--wcid",
            "1",
            "--address",
            "7c:ed",
            "--payload",
            "00",
        ]);
        assert!(result.is_err());
    }

    // ═══ Scenario: Replay from disk ════════════════════════════════════════

    /// GIVEN a capture file and a YAML config on disk
    /// WHEN the replay command executes
    /// THEN it succeeds
    #[test]
    fn given_capture_on_disk_when_replayed_then_ok() -> TestResult {
        let dir = tempfile::tempdir()?;
        let capture_path = dir.path().join("capture.json");
        let mut file = std::fs::File::create(&capture_path)?;
        file.write_all(
            br#"{"events": [
                {"type": "connect", "wcid": 1, "address": "7c:ed:8d:11:22:33"},
                {"type": "disconnect", "wcid": 1}
            ]}"#,
        )?;
        let config_path = dir.path().join("dongle.yaml");
        std::fs::write(&config_path, "power_off_on_close: false\n")?;

        let cli = Cli::try_parse_from([
            OsStr::new("dongle-replay"),
            OsStr::new("replay"),
            capture_path.as_os_str(),
            OsStr::new("--config"),
            config_path.as_os_str(),
        ])?;
        execute_command(&cli).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// GIVEN a config path that does not exist
    /// WHEN the config is loaded
    /// THEN the CliError carries the config exit code
    #[test]
    fn given_missing_config_when_loaded_then_config_exit_code() -> TestResult {
        let dir = tempfile::tempdir()?;
        let err = match load_config(Some(&dir.path().join("missing.json"))) {
            Ok(_) => return Err("expected error".into()),
            Err(e) => e,
        };
        let code = err.downcast_ref::<CliError>().map(CliError::exit_code);
        assert_eq!(code, Some(3));
        Ok(())
    }
}
