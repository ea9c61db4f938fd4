// crates/git_links/src/lib.rs

use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// One of:
//   https://github.com/owner/repo.git
//   git@github.com:owner/repo.git
static GITHUB_REMOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https://github\.com/|git@github\.com:)(.*)\.git$").unwrap()
});

/// Permalinks for a snippet's repository and its exact source line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubLink {
    pub repository: String,
    pub source: String,
}

/// Returns `owner/repo` for a GitHub remote URL, or `None` for any other remote.
pub fn parse_github_remote(remote_url: &str) -> Option<String> {
    GITHUB_REMOTE
        .captures(remote_url.trim())
        .map(|caps| caps[1].to_string())
}

/// Builds the permalink pair from its parts.
pub fn build_link(repository: &str, hash: &str, file: &str, line: usize) -> GithubLink {
    let repository = format!("https://github.com/{}", repository);
    let source = format!("{}/blob/{}/{}#L{}", repository, hash, file, line);
    GithubLink { repository, source }
}

/// Resolves the GitHub permalinks of `path` at `line`, pinned to the current `HEAD`.
///
/// # Errors
///
/// Returns an error if any `git` command fails or `origin` is not a GitHub remote.
pub fn github_link_to_file(path: &Path, line: usize) -> Result<GithubLink> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let basename = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Invalid file path {}", path.display()))?;

    let remote_url = git(dir, &["remote", "get-url", "origin"])?;
    let file = git(dir, &["ls-files", "--full-name", basename])?;
    let hash = git(dir, &["rev-parse", "HEAD"])?;

    if file.is_empty() {
        bail!("{} is not tracked by git", path.display());
    }
    let repository = parse_github_remote(&remote_url)
        .ok_or_else(|| anyhow!("not a github repository: {}", remote_url))?;

    log::debug!("resolved {} to {}@{}", path.display(), repository, hash);
    Ok(build_link(&repository, &hash, &file, line))
}

fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| anyhow!("Failed to execute git: {}", e))?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
