//! Markdown message assembly.
//!
//! A message is the rendered build header followed by one fenced block per
//! log file that produced a non-empty excerpt.

use std::path::Path;

use buildnotify_excerpt::{ExtractMode, read_excerpt};
use tracing::debug;

use crate::context::BuildContext;
use crate::template;

/// Header shared by every CI flavor.
pub const BUILD_TEMPLATE: &str = "\
[**[{status}] {title} {build}**]({build_link})
* _Commit_: [{commit_message}]({commit_link})
* _Author_: {author}
* _Branch_: {branch}
* _Event_: {event}
";

// ---------------------------------------------------------------------------
// Log sections
// ---------------------------------------------------------------------------

/// One of the known pipeline log files, in message order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSection {
    Validate,
    Render,
    Nae,
    Deploy,
    Test,
}

impl LogSection {
    /// Every section, in the order they appear in a message.
    pub const ALL: [LogSection; 5] = [
        Self::Validate,
        Self::Render,
        Self::Nae,
        Self::Deploy,
        Self::Test,
    ];

    /// Log file name, relative to the working directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Validate => "validate_output.txt",
            Self::Render => "render_output.txt",
            Self::Nae => "nae_output.txt",
            Self::Deploy => "deploy_output.txt",
            Self::Test => "test_output.txt",
        }
    }

    /// Validation steps report failures; the rest report a play recap.
    pub fn mode(&self) -> ExtractMode {
        match self {
            Self::Validate | Self::Nae => ExtractMode::Errors,
            Self::Render | Self::Deploy | Self::Test => ExtractMode::Summary,
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Render => "render",
            Self::Nae => "nae",
            Self::Deploy => "deploy",
            Self::Test => "test",
        }
    }

    /// Bold title line above the fenced block, may link somewhere.
    fn header_template(&self) -> &'static str {
        match self {
            Self::Validate => "**Validation Errors**",
            Self::Render => "**Render Summary**",
            Self::Nae => "[**NAE Pre-Change Validation**](https://{nae_host})",
            Self::Deploy => {
                "[**Deploy Summary**](https://{git_host}/{config_repo_owner}/{config_repo_name}/commit/master)"
            }
            Self::Test => {
                "**Test Summary** [**APIC**]({test_results_url}lab/apic1/log.html) [**MSO**]({test_results_url}lab/mso1/log.html)"
            }
        }
    }
}

/// Text pulled out of one log file. Empty means "nothing to report".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub section: LogSection,
    pub text: String,
}

/// Read all five log files under `workdir`. Missing files give empty excerpts.
pub fn collect_excerpts(workdir: &Path) -> Vec<Excerpt> {
    LogSection::ALL
        .iter()
        .map(|&section| {
            let text = read_excerpt(&workdir.join(section.file_name()), section.mode());
            debug!(section = section.label(), empty = text.is_empty(), "collected excerpt");
            Excerpt { section, text }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the full Markdown message. Sections with empty excerpts are omitted.
pub fn assemble(context: &BuildContext, excerpts: &[Excerpt]) -> String {
    let mut message = template::render(BUILD_TEMPLATE, context);

    for excerpt in excerpts.iter().filter(|e| !e.text.is_empty()) {
        message.push('\n');
        message.push_str(&template::render(excerpt.section.header_template(), context));
        message.push_str("\n```\n");
        message.push_str(&excerpt.text);
        message.push_str("\n```\n");
    }

    message
}
