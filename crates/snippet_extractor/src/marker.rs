// crates/snippet_extractor/src/marker.rs

use regex::Regex;

use crate::error::ExtractError;

/// Prefix used when no other marker syntax is configured.
pub const DEFAULT_PREFIX: &str = "//gistsnip:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

/// A single line that opens or closes a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub id: String,
    pub line_number: usize,
}

/// Recognises marker lines of the form `<prefix>start:<id>` and `<prefix>end:<id>`.
///
/// Only whole lines are markers: surrounding whitespace is allowed, anything
/// else on the line makes it ordinary text. The prefix and the action match
/// case-insensitively and ids are normalised to lower case.
#[derive(Debug, Clone)]
pub struct MarkerSyntax {
    prefix: String,
    pattern: Regex,
}

impl MarkerSyntax {
    pub fn with_prefix(prefix: &str) -> Result<Self, ExtractError> {
        if prefix.trim().is_empty() {
            return Err(ExtractError::InvalidSyntax(
                "marker prefix must not be empty".to_string(),
            ));
        }
        let source = format!(
            r"(?i)^\s*{}(start|end):([\w.-]+)\s*$",
            regex::escape(prefix)
        );
        let pattern = Regex::new(&source)
            .map_err(|e| ExtractError::InvalidSyntax(e.to_string()))?;
        Ok(Self {
            prefix: prefix.to_string(),
            pattern,
        })
    }

    /// Builds the conventional `<comment>gistsnip:` prefix for another line-comment token.
    pub fn for_comment_token(token: &str) -> Result<Self, ExtractError> {
        Self::with_prefix(&format!("{}gistsnip:", token))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn parse_line(&self, line: &str, line_number: usize) -> Option<Marker> {
        let caps = self.pattern.captures(line)?;
        let kind = if caps[1].eq_ignore_ascii_case("start") {
            MarkerKind::Start
        } else {
            MarkerKind::End
        };
        Some(Marker {
            kind,
            id: caps[2].to_lowercase(),
            line_number,
        })
    }
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX).expect("default marker prefix is a valid pattern")
    }
}
