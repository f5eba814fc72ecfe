use clap::ArgMatches;
use tracing::warn;

use super::teams_filter;
use crate::cli_context::CliContext;
use crate::config::EmptyTeamsPolicy;
use crate::error::{NotifyError, NotifyResult};
use crate::filtering::SlugFilter;
use crate::models::Team;
use crate::notifier::DispatchSummary;

pub async fn handle_notify(matches: &ArgMatches, context: &CliContext) -> NotifyResult<DispatchSummary> {
    let dry_run = matches.get_flag("dry-run");
    let filter = teams_filter(matches, context.config());
    run_notify(context, &filter, dry_run).await
}

/// Fetches the team directory and notifies every team in it. Only a failed
/// fetch (or an unexpectedly empty directory) fails the run; send failures
/// are reported in the summary and the logs.
pub async fn run_notify(context: &CliContext, filter: &SlugFilter, dry_run: bool) -> NotifyResult<DispatchSummary> {
    let teams = context.directory_client()?.fetch_teams(filter).await?;
    check_teams(&teams, filter, context.config().dispatch.empty_teams_policy)?;

    let summary = context
        .notifier(dry_run)?
        .notify_teams(&teams, context.cancellation())
        .await;
    Ok(summary)
}

pub fn check_teams(teams: &[Team], filter: &SlugFilter, policy: EmptyTeamsPolicy) -> NotifyResult<()> {
    if !teams.is_empty() {
        return Ok(());
    }

    if !filter.is_empty() {
        warn!(filter = %filter, "no teams matched the teams filter");
        return Ok(());
    }

    match policy {
        EmptyTeamsPolicy::Error => Err(NotifyError::NoTeams),
        EmptyTeamsPolicy::Warn => {
            warn!("no teams returned from the API");
            Ok(())
        }
    }
}
