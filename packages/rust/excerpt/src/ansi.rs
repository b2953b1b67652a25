//! Terminal escape sequence removal.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Matches 7-bit C1 escapes (`ESC @`..`ESC _`) and CSI sequences such as
/// colour codes (`ESC [ 1;31m`) and cursor movement.
static ANSI_ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("ANSI escape regex")
});

/// Remove ANSI escape sequences, borrowing when there are none.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE_RE.replace_all(text, "")
}
