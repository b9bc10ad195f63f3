use clap::Parser;
use git_authors::commands::authors::{authors_command, Views};
use git_authors::config::{Backend, Config};
use git_authors::report::SortMode;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "git-authors")]
#[command(about = "Reconcile git history with the AUTHORS file and rank contributors", long_about = None)]
struct Cli {
    /// Name of canonical AUTHORS file
    #[arg(long, value_name = "PATH")]
    read_authors: Option<PathBuf>,

    /// Print the AUTHORS list
    #[arg(long)]
    authors: bool,

    /// Print the name list
    #[arg(long)]
    names: bool,

    /// Print the statistics
    #[arg(long)]
    stats: bool,

    /// Print contributors as JSON
    #[arg(long)]
    json: bool,

    /// Minimum number of contributions to show up in lists [default: 1]
    #[arg(long)]
    min: Option<usize>,

    /// Sort contributors by geekrank
    #[arg(long)]
    geekrank: bool,

    /// File containing commit hashes to ignore
    #[arg(long, value_name = "PATH")]
    exclude_commits: Option<PathBuf>,

    /// Skip names containing this string [default: "[bot]"]
    #[arg(long, value_name = "STRING", conflicts_with = "no_exclude_pattern")]
    exclude_pattern: Option<String>,

    /// Don't filter contributors by name
    #[arg(long)]
    no_exclude_pattern: bool,

    /// Count commits listed in --exclude-commits anyway (they are still
    /// ignored when discovering new authors)
    #[arg(long)]
    count_excluded_commits: bool,

    /// Repository to read history from [default: .]
    #[arg(long, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// How to read git history
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// TOML config file; command-line flags take precedence
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(Config, Views)> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(path) = self.read_authors {
            config.read_authors = Some(path);
        }
        if let Some(path) = self.exclude_commits {
            config.exclude_commits = Some(path);
        }
        if let Some(pattern) = self.exclude_pattern {
            config.exclude_pattern = pattern;
        }
        if self.no_exclude_pattern {
            config.no_exclude_pattern = true;
        }
        if let Some(min) = self.min {
            config.min_commits = min;
        }
        if self.geekrank {
            config.sort = SortMode::Geekrank;
        }
        if self.count_excluded_commits {
            config.count_excluded_commits = true;
        }
        if let Some(repo) = self.repo {
            config.history.repo = repo;
        }
        if let Some(backend) = self.backend {
            config.history.backend = backend;
        }

        let views = Views {
            names: self.names,
            stats: self.stats,
            authors: self.authors,
            json: self.json,
        };

        Ok((config, views))
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the rendered lists
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let (config, views) = Cli::parse().into_config()?;
    tracing::debug!(?config, "Resolved configuration");

    authors_command(&config, views)
}
