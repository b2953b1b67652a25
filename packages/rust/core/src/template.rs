//! `{name}` placeholder substitution.
//!
//! Values are inserted verbatim: no Markdown escaping, and placeholders that
//! appear inside a substituted value are left alone.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder regex"));

/// A source of named template values.
pub trait Fields {
    /// Value for `name`, or `None` if the name is unknown.
    fn field(&self, name: &str) -> Option<&str>;
}

/// Substitute every `{name}` in `template`. Unknown names render as `""`.
pub fn render(template: &str, fields: &dyn Fields) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match fields.field(name) {
                Some(value) => value.to_string(),
                None => {
                    debug!(placeholder = name, "unknown placeholder, rendering empty");
                    String::new()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    impl Fields for HashMap<&str, &str> {
        fn field(&self, name: &str) -> Option<&str> {
            self.get(name).copied()
        }
    }

    fn fields<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn substitutes_named_fields() {
        let f = fields(&[("status", "success"), ("title", "org/repo")]);
        assert_eq!(render("[{status}] {title}", &f), "[success] org/repo");
    }

    #[test]
    fn repeated_placeholders() {
        let f = fields(&[("x", "1")]);
        assert_eq!(render("{x}-{x}", &f), "1-1");
    }

    #[test]
    fn unknown_placeholder_renders_empty() {
        let f = fields(&[]);
        assert_eq!(render("a{missing}b", &f), "ab");
    }

    #[test]
    fn markdown_in_values_is_not_escaped() {
        let f = fields(&[("commit_message", "fix *all* the [things]_")]);
        assert_eq!(
            render("_Commit_: {commit_message}", &f),
            "_Commit_: fix *all* the [things]_"
        );
    }

    #[test]
    fn placeholders_inside_values_stay_literal() {
        let f = fields(&[("a", "{b}"), ("b", "nope")]);
        assert_eq!(render("{a}", &f), "{b}");
    }

    #[test]
    fn non_placeholder_braces_untouched() {
        let f = fields(&[]);
        assert_eq!(render("{ not one } {}", &f), "{ not one } {}");
    }
}
