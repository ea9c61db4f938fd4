// crates/gistsnip/src/services.rs

//! Side-effect interfaces used by the publishing run.
//! - SnippetSink: where snippets are published
//! - LinkResolver: repository permalinks for a snippet's source line

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use git_links::{github_link_to_file, GithubLink};
use gist_state::SnippetRecord;

/// Publishes one snippet.
pub trait SnippetSink {
    /// Returns the location to record for the snippet, or `None` if nothing persistent was written.
    fn publish(&self, record: &SnippetRecord) -> Result<Option<String>>;

    /// Whether the location recorded on a previous run still holds the published snippet.
    fn is_current(&self, _record: &SnippetRecord) -> bool {
        true
    }
}

/// Writes each snippet to `<root>/<snippet path>`.
pub struct DirectorySink {
    pub root: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Target file for a snippet; only the normal components of its path are kept.
    pub fn target(&self, record: &SnippetRecord) -> PathBuf {
        let relative: PathBuf = Path::new(&record.path)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part),
                _ => None,
            })
            .collect();
        self.root.join(relative)
    }
}

impl SnippetSink for DirectorySink {
    fn publish(&self, record: &SnippetRecord) -> Result<Option<String>> {
        let target = self.target(record);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Error creating directory {}", parent.display()))?;
        }
        let mut content = record.content.clone();
        content.push('\n');
        fs::write(&target, content)
            .with_context(|| format!("Error writing snippet {}", target.display()))?;
        Ok(Some(target.to_string_lossy().into_owned()))
    }

    fn is_current(&self, record: &SnippetRecord) -> bool {
        let target = self.target(record);
        record.location.as_deref() == Some(&*target.to_string_lossy()) && target.is_file()
    }
}

/// Prints each snippet to stdout under a header line.
pub struct StdoutSink;

impl SnippetSink for StdoutSink {
    fn publish(&self, record: &SnippetRecord) -> Result<Option<String>> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "==> {}", record.path)?;
        if !record.description.is_empty() {
            writeln!(out, "# {}", record.description)?;
        }
        writeln!(out, "{}\n", record.content)?;
        Ok(None)
    }
}

/// Publishes nothing and keeps whatever location was recorded before.
pub struct DryRunSink;

impl SnippetSink for DryRunSink {
    fn publish(&self, record: &SnippetRecord) -> Result<Option<String>> {
        log::info!("(dry run) would publish {}", record.path);
        Ok(record.location.clone())
    }
}

/// Resolves repository links for a snippet's source line.
pub trait LinkResolver {
    fn resolve(&self, file: &Path, line: usize) -> Result<GithubLink>;
}

/// Git-backed GitHub link resolver.
pub struct GitLinkResolver;

impl LinkResolver for GitLinkResolver {
    fn resolve(&self, file: &Path, line: usize) -> Result<GithubLink> {
        github_link_to_file(file, line)
    }
}

/// Resolver used with `--no-links`.
pub struct NoLinks;

impl LinkResolver for NoLinks {
    fn resolve(&self, _file: &Path, _line: usize) -> Result<GithubLink> {
        Ok(GithubLink::default())
    }
}
