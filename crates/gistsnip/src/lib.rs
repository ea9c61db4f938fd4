// crates/gistsnip/src/lib.rs

use std::path::Path;

use anyhow::{Context, Result};
use gist_state::{plan, GistState, PublishAction};
use snippet_collector::collect_snippets;
use snippet_extractor::processor::DefaultFileProcessor;
use snippet_extractor::MarkerSyntax;

pub mod config;
pub mod description;
pub mod services;

use config::AppConfig;
use description::DescriptionTemplate;
use services::{DirectorySink, DryRunSink, LinkResolver, SnippetSink, StdoutSink};

/// Outcome of one publishing run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Snippets recorded by the previous run that no longer exist.
    pub dropped: Vec<String>,
    /// `(snippet path, location)` for every current snippet, sorted by path.
    pub snippets: Vec<(String, Option<String>)>,
}

/// Picks the sink matching the configuration.
pub fn sink_for(config: &AppConfig) -> Box<dyn SnippetSink> {
    if config.dry_run {
        Box::new(DryRunSink)
    } else if let Some(dir) = &config.out_dir {
        Box::new(DirectorySink::new(dir.clone()))
    } else {
        Box::new(StdoutSink)
    }
}

/// Extracts every snippet under the configured paths and publishes what changed since the last run.
///
/// Any error aborts the run before the state file is written.
pub fn run(config: &AppConfig, sink: &dyn SnippetSink, links: &dyn LinkResolver) -> Result<RunSummary> {
    let template = DescriptionTemplate::parse(&config.description)?;
    let syntax = MarkerSyntax::with_prefix(&config.prefix)?;
    let processor = DefaultFileProcessor::new(syntax);

    let old = GistState::load(&config.state_file)?;
    let snippets = collect_snippets(&config.paths, &processor)?;
    log::debug!("collected {} snippet(s)", snippets.len());

    let mut new = GistState::from_snippets(snippets.into_values());
    new.description = old.description.clone();
    new.carry_over_locations(&old);

    let mut summary = RunSummary::default();
    for record in new.snippets.values_mut() {
        let link = match links.resolve(Path::new(&record.file), record.line) {
            Ok(link) => link,
            Err(err) => {
                log::warn!("Failed to create github link for {}: {:#}", record.file, err);
                Default::default()
            }
        };
        record.description = template.render(record, &link);

        let mut action = plan(&old, record);
        if action == PublishAction::Skip && !sink.is_current(record) {
            action = PublishAction::Update;
        }
        match action {
            PublishAction::Skip => {
                log::info!("Skipping {}", record.path);
                summary.skipped += 1;
                continue;
            }
            PublishAction::Update => {
                log::info!("Updating {}", record.path);
                summary.updated += 1;
            }
            PublishAction::Create => {
                log::info!("Creating {}", record.path);
                summary.created += 1;
            }
        }
        record.location = sink
            .publish(record)
            .with_context(|| format!("Failed to publish {}", record.path))?;
    }

    for removed in new.removed_snippets(&old) {
        log::info!("Dropping {}", removed);
        summary.dropped.push(removed.to_string());
    }

    if config.dry_run {
        log::info!("(dry run) leaving {} untouched", config.state_file.display());
    } else {
        new.save(&config.state_file)?;
    }

    summary.snippets = new
        .snippets
        .into_values()
        .map(|record| (record.path, record.location))
        .collect();
    Ok(summary)
}
