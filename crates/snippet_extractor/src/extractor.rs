// crates/snippet_extractor/src/extractor.rs

use std::collections::btree_map::{self, BTreeMap};

use crate::error::{ExtractError, OpenRegionInfo};
use crate::marker::{MarkerKind, MarkerSyntax};
use crate::utils::dedent::render_snippet;

/// A named span of text delimited by a matching start/end marker pair.
///
/// `start_line` and `end_line` are the 1-based line numbers of the marker
/// lines themselves; `lines` holds every non-marker line in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub start_line: usize,
    pub end_line: usize,
    pub lines: Vec<String>,
}

impl Region {
    /// The captured lines joined with `\n`, exactly as they appear in the source.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The publishable form: surrounding blank lines trimmed and common indentation removed.
    pub fn snippet(&self) -> String {
        render_snippet(&self.text())
    }
}

/// All regions closed by the end of a document, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    regions: BTreeMap<String, Region>,
}

impl ExtractionResult {
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Regions ordered by id.
    pub fn iter(&self) -> btree_map::Values<'_, String, Region> {
        self.regions.values()
    }

    /// Regions ordered by the line of their start marker.
    pub fn in_source_order(&self) -> Vec<&Region> {
        let mut regions: Vec<&Region> = self.regions.values().collect();
        regions.sort_by_key(|r| r.start_line);
        regions
    }
}

impl IntoIterator for ExtractionResult {
    type Item = Region;
    type IntoIter = btree_map::IntoValues<String, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_values()
    }
}

struct OpenRegion {
    id: String,
    start_line: usize,
    lines: Vec<String>,
}

/// Single-pass region tracker.
///
/// Regions may nest or interleave freely; the only ordering constraint is
/// that each id is opened once and then closed once.
pub struct Extractor<'a> {
    syntax: &'a MarkerSyntax,
    open: Vec<OpenRegion>,
    closed: BTreeMap<String, Region>,
}

impl<'a> Extractor<'a> {
    pub fn new(syntax: &'a MarkerSyntax) -> Self {
        Self {
            syntax,
            open: Vec::new(),
            closed: BTreeMap::new(),
        }
    }

    /// Ids are case-insensitive: `id` is lower-cased before lookup.
    pub fn open_region(&mut self, id: &str, line_number: usize) -> Result<(), ExtractError> {
        let id = id.to_lowercase();
        let first_line = self
            .open
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.start_line)
            .or_else(|| self.closed.get(&id).map(|r| r.start_line));
        if let Some(first_line) = first_line {
            return Err(ExtractError::DuplicateRegion {
                id,
                line: line_number,
                first_line,
            });
        }
        log::debug!("opening region `{}` at line {}", id, line_number);
        self.open.push(OpenRegion {
            id,
            start_line: line_number,
            lines: Vec::new(),
        });
        Ok(())
    }

    pub fn close_region(&mut self, id: &str, line_number: usize) -> Result<(), ExtractError> {
        let id = id.to_lowercase();
        let index = match self.open.iter().position(|r| r.id == id) {
            Some(index) => index,
            None => {
                return Err(ExtractError::UnknownRegion {
                    id,
                    line: line_number,
                })
            }
        };
        let open = self.open.remove(index);
        log::debug!(
            "closing region `{}` at line {} ({} line(s))",
            id,
            line_number,
            open.lines.len()
        );
        self.closed.insert(
            open.id.clone(),
            Region {
                id: open.id,
                start_line: open.start_line,
                end_line: line_number,
                lines: open.lines,
            },
        );
        Ok(())
    }

    pub fn append_line(&mut self, text: &str) {
        for region in &mut self.open {
            region.lines.push(text.to_string());
        }
    }

    /// Routes one source line: markers open or close regions, anything else is captured.
    pub fn feed_line(&mut self, line_number: usize, text: &str) -> Result<(), ExtractError> {
        match self.syntax.parse_line(text, line_number) {
            Some(marker) => match marker.kind {
                MarkerKind::Start => self.open_region(&marker.id, marker.line_number),
                MarkerKind::End => self.close_region(&marker.id, marker.line_number),
            },
            None => {
                self.append_line(text);
                Ok(())
            }
        }
    }

    pub fn finalize(self) -> Result<ExtractionResult, ExtractError> {
        if !self.open.is_empty() {
            return Err(ExtractError::UnclosedRegion {
                regions: self
                    .open
                    .into_iter()
                    .map(|r| OpenRegionInfo {
                        id: r.id,
                        start_line: r.start_line,
                    })
                    .collect(),
            });
        }
        Ok(ExtractionResult {
            regions: self.closed,
        })
    }
}

/// Extracts every region from `content` in a single pass.
pub fn extract(content: &str, syntax: &MarkerSyntax) -> Result<ExtractionResult, ExtractError> {
    let mut extractor = Extractor::new(syntax);
    for (index, line) in content.lines().enumerate() {
        extractor.feed_line(index + 1, line)?;
    }
    extractor.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str) -> Result<ExtractionResult, ExtractError> {
        extract(content, &MarkerSyntax::default())
    }

    #[test]
    fn test_single_region() {
        let content = "before\n//gistsnip:start:a\none\ntwo\n//gistsnip:end:a\nafter\n";
        let result = run(content).unwrap();
        let region = result.get("a").unwrap();
        assert_eq!(region.lines, vec!["one", "two"]);
        assert_eq!(region.start_line, 2);
        assert_eq!(region.end_line, 5);
        assert_eq!(region.text(), "one\ntwo");
    }

    #[test]
    fn test_no_markers_yields_empty_result() {
        let result = run("just\nsome\ntext").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_region() {
        let result = run("//gistsnip:start:a\n//gistsnip:end:a").unwrap();
        let region = result.get("a").unwrap();
        assert!(region.lines.is_empty());
        assert_eq!(region.text(), "");
    }

    #[test]
    fn test_interleaved_regions() {
        let content = "\
//gistsnip:start:a
1
//gistsnip:start:b
2
//gistsnip:end:a
3
//gistsnip:end:b";
        let result = run(content).unwrap();
        assert_eq!(result.get("a").unwrap().lines, vec!["1", "2"]);
        assert_eq!(result.get("b").unwrap().lines, vec!["2", "3"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "//gistsnip:start:a\r\nline\r\n//gistsnip:end:a\r\n";
        let result = run(content).unwrap();
        assert_eq!(result.get("a").unwrap().lines, vec!["line"]);
    }

    #[test]
    fn test_reopening_open_region_is_duplicate() {
        let content = "//gistsnip:start:a\n//gistsnip:start:a\n//gistsnip:end:a";
        assert_eq!(
            run(content).unwrap_err(),
            ExtractError::DuplicateRegion {
                id: "a".into(),
                line: 2,
                first_line: 1
            }
        );
    }

    #[test]
    fn test_reopening_closed_region_is_duplicate() {
        let content = "\
//gistsnip:start:a
//gistsnip:end:a
//gistsnip:start:A
//gistsnip:end:a";
        let err = run(content).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::DuplicateRegion { line: 3, first_line: 1, .. }
        ));
    }

    #[test]
    fn test_end_without_start_is_unknown() {
        let err = run("x\n//gistsnip:end:ghost").unwrap_err();
        assert_eq!(
            err,
            ExtractError::UnknownRegion {
                id: "ghost".into(),
                line: 2
            }
        );
    }

    #[test]
    fn test_second_end_is_unknown() {
        let content = "//gistsnip:start:a\n//gistsnip:end:a\n//gistsnip:end:a";
        assert!(matches!(
            run(content).unwrap_err(),
            ExtractError::UnknownRegion { line: 3, .. }
        ));
    }

    #[test]
    fn test_unclosed_regions_are_all_reported() {
        let content = "//gistsnip:start:a\n//gistsnip:start:b\n//gistsnip:start:c\n//gistsnip:end:b";
        let err = run(content).unwrap_err();
        assert_eq!(err.unclosed_ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_manual_operations() {
        let syntax = MarkerSyntax::default();
        let mut extractor = Extractor::new(&syntax);
        extractor.open_region("outer", 1).unwrap();
        extractor.append_line("a");
        extractor.open_region("inner", 3).unwrap();
        extractor.append_line("b");
        extractor.close_region("inner", 5).unwrap();
        extractor.close_region("outer", 6).unwrap();
        let result = extractor.finalize().unwrap();
        assert_eq!(result.get("outer").unwrap().lines, vec!["a", "b"]);
        assert_eq!(result.get("inner").unwrap().lines, vec!["b"]);
    }

    #[test]
    fn test_manual_ids_match_marker_ids_case_insensitively() {
        let syntax = MarkerSyntax::default();
        let mut extractor = Extractor::new(&syntax);
        extractor.open_region("Setup", 1).unwrap();
        let err = extractor.feed_line(2, "//gistsnip:start:setup").unwrap_err();
        assert_eq!(
            err,
            ExtractError::DuplicateRegion {
                id: "setup".into(),
                line: 2,
                first_line: 1,
            }
        );

        extractor.append_line("x");
        extractor.close_region("SETUP", 4).unwrap();
        let result = extractor.finalize().unwrap();
        assert_eq!(result.get("setup").unwrap().lines, vec!["x"]);
    }

    #[test]
    fn test_source_order() {
        let content = "\
//gistsnip:start:zeta
//gistsnip:end:zeta
//gistsnip:start:alpha
//gistsnip:end:alpha";
        let result = run(content).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        let ordered: Vec<&str> = result.in_source_order().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ordered, vec!["zeta", "alpha"]);
    }
}
