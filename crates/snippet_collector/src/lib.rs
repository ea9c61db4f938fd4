// crates/snippet_collector/src/lib.rs

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use snippet_extractor::processor::FileProcessor;
use walkdir::WalkDir;

/// One extracted region, named after the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub name: String,
    /// Source file, with `/` separators.
    pub file: String,
    /// Line of the start marker.
    pub line: usize,
    /// `file` with `#<name>` spliced in before the extension.
    pub path: String,
    pub content: String,
}

/// Names a snippet after its source file: `dir/example.swift` + `gist1` → `dir/example#gist1.swift`.
pub fn snippet_path(file: &str, name: &str) -> String {
    let file = to_slash(file);
    let base_start = file.rfind('/').map(|i| i + 1).unwrap_or(0);
    match file[base_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let split = base_start + dot;
            format!("{}#{}{}", &file[..split], name, &file[split..])
        }
        _ => format!("{}#{}", file, name),
    }
}

fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

fn display_path(path: &Path) -> String {
    let slashed = to_slash(&path.to_string_lossy());
    match slashed.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => slashed,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Gathers snippets from globs, directories and files, keyed by snippet path.
pub struct SnippetCollector<'a> {
    processor: &'a dyn FileProcessor,
    visited: BTreeSet<PathBuf>,
    snippets: BTreeMap<String, Snippet>,
}

impl<'a> SnippetCollector<'a> {
    pub fn new(processor: &'a dyn FileProcessor) -> Self {
        Self {
            processor,
            visited: BTreeSet::new(),
            snippets: BTreeMap::new(),
        }
    }

    /// Includes everything a glob pattern matches. `.` stands for the current directory.
    pub fn include_pattern(&mut self, pattern: &str) -> Result<()> {
        if pattern == "." {
            return self.include_dir(Path::new("."));
        }

        let matches = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern {}", pattern))?;
        let mut matched_any = false;
        for entry in matches {
            let path = entry.with_context(|| format!("Error reading match of {}", pattern))?;
            matched_any = true;
            if is_hidden(&path) {
                log::debug!("skipping hidden path {}", path.display());
                continue;
            }
            if path.is_dir() {
                self.include_dir(&path)?;
            } else {
                self.include_file(&path)?;
            }
        }
        if !matched_any {
            log::warn!("no files match {}", pattern);
        }
        Ok(())
    }

    /// Walks a directory recursively, skipping hidden files and directories.
    pub fn include_dir(&mut self, dir: &Path) -> Result<()> {
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));
        for entry in walker {
            let entry = entry.with_context(|| format!("Error walking {}", dir.display()))?;
            if entry.file_type().is_file() {
                self.include_file(entry.path())?;
            }
        }
        Ok(())
    }

    /// Processes one file; a file already reached under another spelling is skipped.
    pub fn include_file(&mut self, file_path: &Path) -> Result<()> {
        let key = fs::canonicalize(file_path).unwrap_or_else(|_| file_path.to_path_buf());
        if !self.visited.insert(key) {
            log::debug!("already visited {}", file_path.display());
            return Ok(());
        }
        let result = match self.processor.process_file(file_path)? {
            Some(result) => result,
            None => return Ok(()),
        };

        let file = display_path(file_path);
        for region in result {
            let path = snippet_path(&file, &region.id);
            if self.snippets.contains_key(&path) {
                bail!("Snippet {} is defined more than once", path);
            }
            log::debug!("found snippet {} at {}:{}", region.id, file, region.start_line);
            let snippet = Snippet {
                content: region.snippet(),
                name: region.id,
                file: file.clone(),
                line: region.start_line,
                path: path.clone(),
            };
            self.snippets.insert(path, snippet);
        }
        Ok(())
    }

    pub fn into_snippets(self) -> BTreeMap<String, Snippet> {
        self.snippets
    }
}

/// Collects snippets from every pattern in order.
pub fn collect_snippets(
    patterns: &[String],
    processor: &dyn FileProcessor,
) -> Result<BTreeMap<String, Snippet>> {
    let mut collector = SnippetCollector::new(processor);
    for pattern in patterns {
        collector.include_pattern(pattern)?;
    }
    Ok(collector.into_snippets())
}
