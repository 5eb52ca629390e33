use chrono::NaiveDate;
use tracing::{error, info};

use crate::context::Context;
use crate::error::Result;
use crate::fetch::{fetch_traffic, RepoFilter, TrafficSource};
use crate::github::GitHubClient;
use crate::writer::{self, DetailStats};

/// What one run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub repositories: usize,
    pub details: DetailStats,
    pub summaries: usize,
}

/// Read the credential from `ctx.secret_file` and run against GitHub
pub async fn run_github(ctx: &Context, today: NaiveDate) -> Result<RunReport> {
    let token = match ctx.read_credential().await {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to load access token: {}", err);
            return Err(err);
        }
    };

    let client = GitHubClient::new(&token, ctx.api_url.as_str())?;
    info!("Using GitHub API at {}", client.base_url());
    run(ctx, &client, today).await
}

/// Fetch everything from `source`, then write both CSV files.
///
/// `today` decides which detail rows are still incomplete and is the run date
/// stamped on every summary row. No file is opened until the fetch succeeded.
pub async fn run(ctx: &Context, source: &dyn TrafficSource, today: NaiveDate) -> Result<RunReport> {
    let filter = RepoFilter::only(ctx.repo_filter.iter().cloned());
    if !filter.is_all() {
        info!("Restricting to repositories: {:?}", ctx.repo_filter);
    }

    let tables = fetch_traffic(source, &filter).await?;

    if ctx.debug > 0 {
        for (day, repo, row) in tables.details() {
            info!("Detail: {} {} {:?}", day, repo, row);
        }
    }

    info!("===== Writing to {}", ctx.details_file.display());
    info!("Now: {}", today);
    let details = match writer::write_details_file(&ctx.details_file, &tables, today) {
        Ok(stats) => stats,
        Err(err) => {
            error!("Failed to write '{}': {}", ctx.details_file.display(), err);
            return Err(err);
        }
    };

    info!("===== Writing to {}", ctx.summary_file.display());
    let summaries = match writer::write_summary_file(&ctx.summary_file, &tables, today) {
        Ok(written) => written,
        Err(err) => {
            error!("Failed to append to '{}': {}", ctx.summary_file.display(), err);
            return Err(err);
        }
    };

    Ok(RunReport {
        repositories: tables.summary_len(),
        details,
        summaries,
    })
}
