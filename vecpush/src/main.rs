//! vecpush — entry point.
//!
//! ```text
//! vecpush                        Send one payload using vecpush.toml / defaults
//! vecpush --host H --port P      Override the destination
//! vecpush --count N --tag T      Override the payload shape
//! vecpush --seed S               Reproducible samples
//! vecpush --dry-run              Build and log, do not connect
//! vecpush --gen-config           Write default config to stdout
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vecpush::client::{self, RunOutcome};
use vecpush::config::ClientConfig;

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "vecpush", about = "Send one tagged buffer of f32 samples over TCP")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "vecpush.toml")]
    config: PathBuf,

    /// Receiver host (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Receiver port (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of samples after the tag byte.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Tag byte.
    #[arg(long)]
    tag: Option<u8>,

    /// RNG seed; 0 draws from OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Build and log the payload without connecting.
    #[arg(long)]
    dry_run: bool,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    gen_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(host) = &self.host {
            config.network.host = host.clone();
        }
        if let Some(port) = self.port {
            config.network.port = port;
        }
        if let Some(count) = self.count {
            config.payload.count = count;
        }
        if let Some(tag) = self.tag {
            config.payload.tag = tag;
        }
        if let Some(seed) = self.seed {
            config.payload.seed = seed;
        }
    }
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --gen-config: dump defaults and exit.
    if cli.gen_config {
        let text = toml::to_string_pretty(&ClientConfig::default())?;
        println!("{text}");
        return Ok(ExitCode::SUCCESS);
    }

    // Load config.
    let (mut config, source) = ClientConfig::load(&cli.config);
    cli.apply(&mut config);

    // Init tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("vecpush v{}", env!("CARGO_PKG_VERSION"));
    source.log(&cli.config);
    info!("target: {}:{}", config.network.host, config.network.port);

    match client::run(&config, cli.dry_run).await {
        Ok(RunOutcome::Sent(report)) => {
            info!("done: {} bytes to {}", report.bytes_written, report.addr);
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::Built { encoded_len }) => {
            info!("done: {encoded_len} bytes built");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from([
            "vecpush", "--host", "10.0.0.2", "-p", "4000", "-n", "8", "--tag", "3", "--seed", "9",
        ]);
        let mut cfg = ClientConfig::default();
        cli.apply(&mut cfg);

        assert_eq!(cfg.network.host, "10.0.0.2");
        assert_eq!(cfg.network.port, 4000);
        assert_eq!(cfg.payload.count, 8);
        assert_eq!(cfg.payload.tag, 3);
        assert_eq!(cfg.payload.seed, 9);
    }

    #[test]
    fn cli_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["vecpush"]);
        let mut cfg = ClientConfig::default();
        cli.apply(&mut cfg);

        assert_eq!(cfg.network.port, 3000);
        assert_eq!(cfg.payload.count, 2000);
        assert!(!cli.dry_run);
        assert_eq!(cli.config, PathBuf::from("vecpush.toml"));
    }
}
