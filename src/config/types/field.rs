//! Config field path.

use owo_colors::{OwoColorize, Stream};
use std::fmt;

/// Dotted path of a config field (e.g. `git.executable`), used to point
/// diagnostics at the offending key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.if_supports_color(Stream::Stdout, |t| t.cyan())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display() {
        owo_colors::set_override(false);
        let field = FieldPath::new("push.branch");
        assert_eq!(field.to_string(), "push.branch");
        assert_eq!(field.as_str(), "push.branch");
    }
}
