// crates/snippet_extractor/src/error.rs

use std::fmt;
use thiserror::Error;

/// A region whose start marker was seen but whose end marker never was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRegionInfo {
    pub id: String,
    pub start_line: usize,
}

impl fmt::Display for OpenRegionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` (opened at line {})", self.id, self.start_line)
    }
}

/// Errors raised while extracting regions from a single document.
///
/// Every variant is terminal for the document being processed: no partial
/// extraction is returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("duplicate region `{id}` at line {line} (first opened at line {first_line})")]
    DuplicateRegion {
        id: String,
        line: usize,
        first_line: usize,
    },

    #[error("end marker for region `{id}` at line {line} has no open start marker")]
    UnknownRegion { id: String, line: usize },

    #[error("unclosed region(s) at end of input: {}", join_open(.regions))]
    UnclosedRegion { regions: Vec<OpenRegionInfo> },

    #[error("invalid marker syntax: {0}")]
    InvalidSyntax(String),
}

impl ExtractError {
    /// Ids of the regions still open when input ended, empty for other variants.
    pub fn unclosed_ids(&self) -> Vec<&str> {
        match self {
            ExtractError::UnclosedRegion { regions } => {
                regions.iter().map(|r| r.id.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn join_open(regions: &[OpenRegionInfo]) -> String {
    regions
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_message_lists_every_region() {
        let err = ExtractError::UnclosedRegion {
            regions: vec![
                OpenRegionInfo { id: "a".into(), start_line: 2 },
                OpenRegionInfo { id: "b".into(), start_line: 5 },
            ],
        };
        assert_eq!(
            err.to_string(),
            "unclosed region(s) at end of input: `a` (opened at line 2), `b` (opened at line 5)"
        );
        assert_eq!(err.unclosed_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_message_has_both_lines() {
        let err = ExtractError::DuplicateRegion {
            id: "gist1".into(),
            line: 9,
            first_line: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 9"));
        assert!(msg.contains("line 2"));
        assert!(err.unclosed_ids().is_empty());
    }
}
