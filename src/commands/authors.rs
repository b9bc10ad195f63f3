//! Authors command: reconciles git history against the AUTHORS roster.
//!
//! Loads the roster and exclusion list, discovers identities in history,
//! merges them into the roster, counts commits, then filters, sorts and
//! renders the requested views.

use crate::config::{Backend, Config};
use crate::exclusion::ExclusionSet;
use crate::git::{discover_identities, GitCommand, GitRepository, HistorySource};
use crate::reconcile::reconcile;
use crate::report::{
    filter_contributors, render_authors, render_json, render_names, render_stats,
    sort_contributors,
};
use crate::roster::{load_roster, Contributor};
use crate::stats::count_contributions;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

/// Which output views to print. Any combination is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Views {
    pub names: bool,
    pub stats: bool,
    pub authors: bool,
    pub json: bool,
}

/// Run the authors command, writing the selected views to stdout.
pub fn authors_command(config: &Config, views: Views) -> Result<()> {
    let source: Box<dyn HistorySource> = match config.history.backend {
        Backend::Git2 => Box::new(GitRepository::new(&config.history.repo)),
        Backend::GitCli => Box::new(GitCommand::new(&config.history.repo)),
    };

    let contributors = collect_contributors(config, source.as_ref())?;
    let output = render(&contributors, views)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    stdout.flush().context("Failed to write output")?;

    Ok(())
}

/// Build the filtered, sorted contributor list from a roster and history.
pub fn collect_contributors(
    config: &Config,
    source: &dyn HistorySource,
) -> Result<Vec<Contributor>> {
    let exclude = match config.exclusion_path() {
        Some(path) => ExclusionSet::load(path)
            .with_context(|| format!("Failed to load excluded commits from {}", path.display()))?,
        None => ExclusionSet::default(),
    };
    debug!("{} commits excluded", exclude.len());

    let roster = match config.roster_path() {
        Some(path) => load_roster(path)
            .with_context(|| format!("Failed to load roster from {}", path.display()))?,
        None => Vec::new(),
    };
    info!("Loaded {} roster entries", roster.len());

    let records = source
        .commits()
        .with_context(|| format!("Failed to read history via {}", source.name()))?;
    let identities = discover_identities(&records, &exclude);
    info!(
        "Found {} distinct author emails in {} commits",
        identities.len(),
        records.len()
    );

    let reconciliation = reconcile(roster, &identities);
    let mut contributors = reconciliation.contributors;
    info!(
        "{} contributors after reconciliation ({} emails merged, {} new)",
        contributors.len(),
        reconciliation.merged,
        reconciliation.added
    );

    let authored = source
        .author_emails()
        .with_context(|| format!("Failed to read author emails via {}", source.name()))?;
    let counted = authored
        .iter()
        .filter(|c| config.count_excluded_commits || !exclude.contains(&c.hash))
        .map(|c| c.email.as_str());
    count_contributions(&mut contributors, counted);

    let mut contributors = filter_contributors(contributors, &config.filter());
    sort_contributors(&mut contributors, config.sort);
    info!("{} contributors listed", contributors.len());

    Ok(contributors)
}

/// Render the selected views in a fixed order: names, stats, authors, json.
pub fn render(contributors: &[Contributor], views: Views) -> Result<String> {
    let mut out = String::new();
    if views.names {
        out.push_str(&render_names(contributors));
    }
    if views.stats {
        out.push_str(&render_stats(contributors));
    }
    if views.authors {
        out.push_str(&render_authors(contributors));
    }
    if views.json {
        out.push_str(&render_json(contributors).context("Failed to serialize contributors")?);
    }
    Ok(out)
}
