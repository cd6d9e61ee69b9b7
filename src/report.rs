use std::io::Write;

use log::{debug, error, info, warn};

use crate::{
    Result,
    api::GitHubApi,
    humanize::humanize,
    model::{Issue, RateLimits, Repository},
    paginate::{self, PageOptions},
    target::RepoTarget,
};

/// Branch asked for the combined status when the repository names none.
const FALLBACK_BRANCH: &str = "master";

/// Fetches statistics for `target` and writes them to `out`.
///
/// Nothing is written unless the repository and all of its closed issues
/// were fetched. A failed rate-limit query is reported in the output but
/// does not fail the report.
pub fn report(
    api: &impl GitHubApi,
    target: &RepoTarget,
    options: PageOptions,
    out: &mut impl Write,
) -> Result<()> {
    let repo = api.get_repository(&target.owner, &target.name)?;
    info!(
        "fetched {}: {} stars, issues enabled: {}",
        repo.full_name, repo.stargazers_count, repo.has_issues
    );

    let branch = repo.default_branch.as_deref().unwrap_or(FALLBACK_BRANCH);
    match api.get_combined_status(&target.owner, &target.name, branch) {
        Ok(status) => {
            debug!("combined status of {branch}: {} ({} statuses)", status.state, status.total_count)
        }
        Err(err) => warn!("could not fetch combined status of {branch}: {err}"),
    }

    let issues = if repo.has_issues {
        paginate::closed_issues(api, target, options)?
    } else {
        info!("issues are disabled for {}, skipping", repo.full_name);
        Vec::new()
    };

    writeln!(out, "{}", summary(&repo, issues.len()))?;
    for issue in &issues {
        writeln!(out, "{}", issue_line(issue))?;
    }

    match api.get_rate_limit() {
        Ok(rate) => writeln!(out, "{}", rate_limit_line(&rate))?,
        Err(err) => {
            error!("fetching rate limit failed: {err}");
            writeln!(out, "Error fetching rate limit: {err}")?;
        }
    }
    Ok(())
}

fn summary(repo: &Repository, closed: usize) -> String {
    format!(
        "repository: {}\n\nstars: {}, open issues: {}, closed issues: {closed}",
        repo.full_name, repo.stargazers_count, repo.open_issues_count
    )
}

fn issue_line(issue: &Issue) -> String {
    let closed = match issue.closed_at {
        Some(closed_at) => closed_at.to_string(),
        None => {
            warn!("issue #{} has no close time", issue.number);
            "-".to_string()
        }
    };
    let ttc = match issue.time_to_close() {
        Some(elapsed) => humanize(elapsed),
        None => {
            if issue.closed_at.is_some() {
                warn!("issue #{} was closed before it was created", issue.number);
            }
            "n/a".to_string()
        }
    };
    format!(
        "{:03}, {}: created: {}, closed: {closed}, TTC: {ttc}",
        issue.number, issue.state, issue.created_at
    )
}

fn rate_limit_line(rate: &RateLimits) -> String {
    format!(
        "API Rate Limit: {:05}/{:05}, Search: {:05}",
        rate.core.remaining, rate.core.limit, rate.search.limit
    )
}
