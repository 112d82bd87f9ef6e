//! check_bgp_peer - Icinga/Nagios plugin checking a RouterOS BGP peer
//!
//! Prints a single `<STATUS> - <message>` line and exits 0/1/2/3.

mod replay;

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use peerwatch_core::{check_peer, ApiTransport, CheckError, ConnectionConfig, TransportError, Verdict};
use tracing_subscriber::EnvFilter;

use crate::replay::ReplayTransport;

#[derive(Parser, Debug)]
#[command(name = "check_bgp_peer", version)]
#[command(about = "Check Mikrotik RouterOS bgp peer status")]
struct Cli {
    /// Enable and print API debugging information
    #[arg(short, long)]
    debug: bool,

    /// IPv4/IPv6 address of API endpoint
    #[arg(short = 'H', long)]
    host: String,

    /// API port (defaults to 8728 (plaintext), 8729 (ssl))
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// Use SSL to connect to API
    #[arg(short, long)]
    ssl: bool,

    /// User for API authentication
    #[arg(short, long)]
    user: String,

    /// Password for API authentication
    #[arg(short, long)]
    password: String,

    /// Answer API queries from a recorded JSON file
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// IPv4/IPv6 remote-address or name of bgp peer
    peer: String,
}

impl Cli {
    fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.clone(),
            port: self.port,
            tls: self.ssl,
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            return report(&Verdict::unknown(usage_summary(&e)));
        }
    };

    if let Err(e) = init_logging(cli.debug) {
        eprintln!("warning: {:#}", e);
    }

    let verdict = match panic::catch_unwind(AssertUnwindSafe(|| run(&cli))) {
        Ok(verdict) => verdict,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            Verdict::unknown(format!("Unhandled error occurred: {}", reason))
        }
    };

    report(&verdict)
}

fn run(cli: &Cli) -> Verdict {
    let config = cli.connection();
    match open_transport(&config, cli.replay.as_deref()) {
        Ok(mut transport) => check_peer(&mut transport, &config, &cli.peer),
        Err(e) => Verdict::unknown(CheckError::from(e).to_string()),
    }
}

/// Pick the transport for this run.
///
/// Only recorded replies are supported; a live RouterOS API client plugs in here.
fn open_transport(
    config: &ConnectionConfig,
    replay: Option<&Path>,
) -> Result<Box<dyn ApiTransport>, TransportError> {
    match replay {
        Some(path) => Ok(Box::new(ReplayTransport::load(path, config)?)),
        None => Err(TransportError::Unavailable(config.endpoint())),
    }
}

/// Stderr logging. Quiet unless `--debug` or `RUST_LOG` is given.
fn init_logging(debug: bool) -> anyhow::Result<()> {
    let filter = if debug {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("off"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

/// Emit the plugin output line and map the verdict to the exit code.
fn report(verdict: &Verdict) -> ExitCode {
    println!("{}", verdict);
    ExitCode::from(verdict.exit_code())
}

/// First lines of a clap error, up to the usage block, on one line.
fn usage_summary(err: &clap::Error) -> String {
    let text = err.to_string();
    text.lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("Usage:"))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
