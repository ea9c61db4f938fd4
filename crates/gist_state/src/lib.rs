// crates/gist_state/src/lib.rs

//! The `.gistsnip` state file: what was published on the previous run, so
//! unchanged snippets can be skipped and published ones updated in place.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use snippet_collector::Snippet;

/// Default name of the state file.
pub const DEFAULT_STATE_FILE: &str = ".gistsnip";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnippetRecord {
    pub name: String,
    pub file: String,
    pub line: usize,
    pub path: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
    /// Where the snippet was last published, as reported by the sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<Snippet> for SnippetRecord {
    fn from(snippet: Snippet) -> Self {
        Self {
            name: snippet.name,
            file: snippet.file,
            line: snippet.line,
            path: snippet.path,
            description: String::new(),
            content: snippet.content,
            location: None,
        }
    }
}

/// What publishing a snippet requires, relative to the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    Create,
    Update,
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GistState {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub snippets: BTreeMap<String, SnippetRecord>,
}

impl GistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snippets<I: IntoIterator<Item = Snippet>>(snippets: I) -> Self {
        Self {
            description: String::new(),
            snippets: snippets
                .into_iter()
                .map(|s| (s.path.clone(), SnippetRecord::from(s)))
                .collect(),
        }
    }

    /// Loads a state file; a missing file is an empty state.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no state file at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Error opening {}", path.display()))
            }
        };
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Error parsing state file {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Error creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)
            .with_context(|| format!("Error writing state file {}", path.display()))?;
        writeln!(writer)?;
        writer
            .flush()
            .with_context(|| format!("Error writing state file {}", path.display()))?;
        Ok(())
    }

    /// Snippets that are new or whose content differs from `old`.
    pub fn changed_snippets<'a>(&'a self, old: &GistState) -> Vec<&'a SnippetRecord> {
        self.snippets
            .iter()
            .filter(|(key, record)| match old.snippets.get(*key) {
                Some(previous) => previous.content != record.content,
                None => true,
            })
            .map(|(_, record)| record)
            .collect()
    }

    pub fn equal_content(&self, old: &GistState) -> bool {
        self.snippets.len() == old.snippets.len()
            && self.snippets.keys().all(|k| old.snippets.contains_key(k))
            && self.changed_snippets(old).is_empty()
    }

    /// Keys of snippets recorded in `old` that no longer exist.
    pub fn removed_snippets<'a>(&self, old: &'a GistState) -> Vec<&'a str> {
        old.snippets
            .keys()
            .filter(|k| !self.snippets.contains_key(*k))
            .map(String::as_str)
            .collect()
    }

    /// Copies recorded publish locations over from the previous run.
    pub fn carry_over_locations(&mut self, old: &GistState) {
        for (key, record) in self.snippets.iter_mut() {
            if let Some(previous) = old.snippets.get(key) {
                record.location = previous.location.clone();
            }
        }
    }
}

/// Decides how `record` must be published given the previous run's state.
pub fn plan(old: &GistState, record: &SnippetRecord) -> PublishAction {
    match old.snippets.get(&record.path) {
        Some(previous)
            if previous.content == record.content
                && previous.description == record.description
                && previous.location.is_some() =>
        {
            PublishAction::Skip
        }
        Some(_) => PublishAction::Update,
        None => PublishAction::Create,
    }
}
