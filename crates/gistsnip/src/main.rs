// crates/gistsnip/src/main.rs

use anyhow::Result;

use gistsnip::config::{build_cli, AppConfig};
use gistsnip::services::{GitLinkResolver, LinkResolver, NoLinks};
use gistsnip::{run, sink_for};

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let config = AppConfig::from_matches(&matches);
    init_logging(config.verbose);
    log::debug!("{:?}", config);

    let sink = sink_for(&config);
    let links: Box<dyn LinkResolver> = if config.links {
        Box::new(GitLinkResolver)
    } else {
        Box::new(NoLinks)
    };

    let summary = run(&config, sink.as_ref(), links.as_ref())?;
    log::info!(
        "{} created, {} updated, {} skipped, {} dropped",
        summary.created,
        summary.updated,
        summary.skipped,
        summary.dropped.len()
    );

    if config.out_dir.is_some() || config.dry_run {
        for (path, location) in &summary.snippets {
            println!("{} {}", path, location.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}
