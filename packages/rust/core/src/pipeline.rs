//! End-to-end notification: environment → context → excerpts → message → Webex.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use buildnotify_shared::{AppConfig, CiFlavor, EnvSnapshot, Result};
use buildnotify_webex::{DeliveryOutcome, WebexClient};

use crate::context::BuildContext;
use crate::message::{self, LogSection};

/// Configuration for one `notify` run.
#[derive(Debug, Clone)]
pub struct NotifyOptions {
    /// CI system; `None` means detect it from the environment.
    pub flavor: Option<CiFlavor>,
    /// Directory holding the `*_output.txt` log files.
    pub workdir: PathBuf,
    /// Loaded (or default) configuration.
    pub config: AppConfig,
    /// Build the message but do not post it.
    pub dry_run: bool,
}

/// Result of a `notify` run.
#[derive(Debug)]
pub struct NotifyReport {
    /// CI system the context was read from.
    pub flavor: CiFlavor,
    /// The Markdown that was (or would have been) posted.
    pub message: String,
    /// Sections that made it into the message.
    pub sections: Vec<LogSection>,
    /// Delivery result; `None` on a dry run.
    pub outcome: Option<DeliveryOutcome>,
}

/// Pick the CI flavor: explicit choice first, then auto-detection, then Drone.
///
/// An undetectable environment still produces a notification; its fields
/// just render empty.
pub fn resolve_flavor(explicit: Option<CiFlavor>, env: &EnvSnapshot) -> CiFlavor {
    explicit.or_else(|| CiFlavor::detect(env)).unwrap_or_else(|| {
        warn!("neither DRONE=true nor JENKINS_URL is set, assuming drone");
        CiFlavor::Drone
    })
}

/// Build the notification from `env` and the log files, then post it.
///
/// Delivery problems never surface as `Err`; they are logged and returned in
/// [`NotifyReport::outcome`]. Errors are reserved for set-up failures.
#[instrument(skip_all, fields(workdir = %opts.workdir.display(), dry_run = opts.dry_run))]
pub async fn notify(opts: &NotifyOptions, env: &EnvSnapshot) -> Result<NotifyReport> {
    let flavor = resolve_flavor(opts.flavor, env);
    let context = BuildContext::from_env(flavor, env, &opts.config.links);
    info!(%flavor, status = %context.status, title = %context.title, "building notification");

    let excerpts = message::collect_excerpts(&opts.workdir);
    let sections: Vec<LogSection> = excerpts
        .iter()
        .filter(|e| !e.text.is_empty())
        .map(|e| e.section)
        .collect();
    let message = message::assemble(&context, &excerpts);

    info!(
        sections = ?sections.iter().map(LogSection::label).collect::<Vec<_>>(),
        len = message.len(),
        "message assembled"
    );

    if opts.dry_run {
        info!("dry run, not posting");
        return Ok(NotifyReport {
            flavor,
            message,
            sections,
            outcome: None,
        });
    }

    let webex = &opts.config.webex;
    let client = WebexClient::new(&webex.api_url, env.get(&webex.token_env))?;
    let outcome = client
        .post_markdown(env.get(&webex.room_id_env), &message)
        .await;

    Ok(NotifyReport {
        flavor,
        message,
        sections,
        outcome: Some(outcome),
    })
}
