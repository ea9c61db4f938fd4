// crates/gistsnip/src/config.rs

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use gist_state::DEFAULT_STATE_FILE;
use snippet_extractor::DEFAULT_PREFIX;

pub const DEFAULT_DESCRIPTION: &str = "{repository} {source}";

/// Runtime configuration composed from CLI flags and environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub paths: Vec<String>,
    pub description: String,
    pub state_file: PathBuf,
    pub prefix: String,
    pub out_dir: Option<PathBuf>, // None == print snippets to stdout
    pub dry_run: bool,
    pub links: bool,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: vec![".".to_string()],
            description: DEFAULT_DESCRIPTION.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            prefix: DEFAULT_PREFIX.to_string(),
            out_dir: None,
            dry_run: false,
            links: true,
            verbose: false,
        }
    }
}

pub fn build_cli() -> Command {
    Command::new("gistsnip")
        .version("0.1.0")
        .about("Extracts marker-delimited snippets from source files and publishes them")
        .arg(
            Arg::new("paths")
                .num_args(0..)
                .help("Files, directories or glob patterns to scan (default: .)"),
        )
        .arg(
            Arg::new("description")
                .long("description")
                .num_args(1)
                .default_value(DEFAULT_DESCRIPTION)
                .help("Snippet description template ({repository} {source} {name} {file} {line})"),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .num_args(1)
                .env("GISTSNIP_STATE")
                .default_value(DEFAULT_STATE_FILE)
                .help("State file recording what was published"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .num_args(1)
                .env("GISTSNIP_PREFIX")
                .default_value(DEFAULT_PREFIX)
                .help("Marker prefix preceding start:<id> and end:<id>"),
        )
        .arg(
            Arg::new("out_dir")
                .long("out-dir")
                .num_args(1)
                .env("GISTSNIP_OUT_DIR")
                .help("Write each snippet as a file under this directory"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Report what would be published without writing anything"),
        )
        .arg(
            Arg::new("no_links")
                .long("no-links")
                .action(ArgAction::SetTrue)
                .help("Do not look up GitHub links with git"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
}

impl AppConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        let paths: Vec<String> = matches
            .get_many::<String>("paths")
            .unwrap_or_default()
            .cloned()
            .collect();
        Self {
            paths: if paths.is_empty() { defaults.paths } else { paths },
            description: matches
                .get_one::<String>("description")
                .cloned()
                .unwrap_or(defaults.description),
            state_file: matches
                .get_one::<String>("state")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
            prefix: matches
                .get_one::<String>("prefix")
                .cloned()
                .unwrap_or(defaults.prefix),
            out_dir: matches.get_one::<String>("out_dir").map(PathBuf::from),
            dry_run: matches.get_flag("dry_run"),
            links: !matches.get_flag("no_links"),
            verbose: matches.get_flag("verbose"),
        }
    }
}
