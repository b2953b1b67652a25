//! Log excerpt extraction for Ansible-style CI output.
//!
//! Build steps tee their output into plain text files that may carry
//! terminal colour codes. This crate strips those codes and pulls out the
//! interesting blocks: task failures (`fatal:`) with the line that names the
//! failing task, or the `PLAY RECAP` host summary.

mod ansi;

use std::path::Path;

use tracing::{debug, instrument, warn};

pub use ansi::strip_ansi;

/// Line prefix of a failed Ansible task.
pub const FAILURE_MARKER: &str = "fatal:";

/// Line prefix of the Ansible host summary.
pub const SUMMARY_MARKER: &str = "PLAY RECAP";

// ---------------------------------------------------------------------------
// Extraction mode
// ---------------------------------------------------------------------------

/// Which block an excerpt is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// `fatal:` lines, each with its preceding context line and the
    /// non-blank lines that follow.
    Errors,
    /// `PLAY RECAP` lines and the non-blank lines that follow.
    Summary,
}

impl ExtractMode {
    /// Prefix that opens a block in this mode.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Errors => FAILURE_MARKER,
            Self::Summary => SUMMARY_MARKER,
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract the excerpt for `mode` from raw log text.
///
/// A block opens on a line starting with the mode's marker and runs until the
/// first blank (whitespace-only) line. In [`ExtractMode::Errors`] the line
/// right before every marker is included too, since Ansible prints the task
/// name there. Inside an open block that context line was already emitted,
/// so it appears twice.
///
/// Every emitted line ends with `\n`. Returns an empty string when no marker
/// is found.
pub fn extract(text: &str, mode: ExtractMode) -> String {
    let clean = strip_ansi(text);
    let lines: Vec<&str> = clean.lines().collect();
    let marker = mode.marker();

    let mut excerpt = String::new();
    let mut collecting = false;

    for (index, line) in lines.iter().enumerate() {
        if line.starts_with(marker) {
            if mode == ExtractMode::Errors {
                if let Some(context) = index.checked_sub(1).map(|i| lines[i]) {
                    push_line(&mut excerpt, context);
                }
            }
            push_line(&mut excerpt, line);
            collecting = true;
            continue;
        }

        if collecting {
            if line.trim().is_empty() {
                collecting = false;
            } else {
                push_line(&mut excerpt, line);
            }
        }
    }

    excerpt
}

/// Read `path` and extract its excerpt.
///
/// A missing file is "no data" and yields an empty excerpt. So does a file
/// that cannot be read, after a warning. Invalid UTF-8 is decoded lossily.
#[instrument(skip_all, fields(path = %path.display(), mode = ?mode))]
pub fn read_excerpt(path: &Path, mode: ExtractMode) -> String {
    if !path.exists() {
        debug!("log file not present, skipping");
        return String::new();
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to read log file, skipping");
            return String::new();
        }
    };

    let excerpt = extract(&String::from_utf8_lossy(&bytes), mode);
    debug!(lines = excerpt.lines().count(), "excerpt extracted");
    excerpt
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
