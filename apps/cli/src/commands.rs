//! CLI argument definitions, tracing setup, and the notify command.

use std::path::PathBuf;

use buildnotify_core::pipeline::{NotifyOptions, notify};
use buildnotify_shared::{CiFlavor, EnvSnapshot, load_config, load_config_from};
use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// buildnotify — send a CI build summary to Webex.
///
/// Every option can also be set through its environment variable, so a CI
/// step normally runs the binary with no arguments.
#[derive(Parser, Debug)]
#[command(
    name = "buildnotify",
    version,
    about = "Post a Markdown build summary with log excerpts to a Webex room.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// CI system to read build metadata from (drone or jenkins). Detected when omitted.
    #[arg(long, env = "BUILDNOTIFY_FLAVOR")]
    pub flavor: Option<CiFlavor>,

    /// Directory containing the *_output.txt log files.
    #[arg(long, env = "BUILDNOTIFY_WORKDIR", default_value = ".")]
    pub workdir: PathBuf,

    /// Config file (defaults to <workdir>/buildnotify.toml if present).
    #[arg(long, env = "BUILDNOTIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the message instead of posting it.
    #[arg(long, env = "BUILDNOTIFY_DRY_RUN")]
    pub dry_run: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stdout.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "buildnotify=info",
        1 => "buildnotify=debug",
        _ => "buildnotify=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Build and send the notification.
///
/// A failed delivery is logged by the client and still exits 0; only
/// set-up problems such as a bad config file return an error.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let env = EnvSnapshot::capture();

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(&cli.workdir)?,
    };
    debug!(api_url = %config.webex.api_url, "configuration resolved");

    let opts = NotifyOptions {
        flavor: cli.flavor,
        workdir: cli.workdir,
        config,
        dry_run: cli.dry_run,
    };

    let report = notify(&opts, &env).await?;

    match &report.outcome {
        None => println!("{}", report.message),
        Some(outcome) if outcome.is_delivered() => {
            info!(flavor = %report.flavor, sections = report.sections.len(), "done");
        }
        Some(_) => info!("finished without delivering the notification"),
    }

    Ok(())
}
