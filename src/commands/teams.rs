use clap::ArgMatches;

use super::teams_filter;
use crate::cli_context::CliContext;
use crate::error::NotifyResult;
use crate::formatting::print_teams;

pub async fn handle_teams(matches: &ArgMatches, context: &CliContext) -> NotifyResult<()> {
    let filter = teams_filter(matches, context.config());
    let teams = context.directory_client()?.fetch_teams(&filter).await?;

    if teams.is_empty() {
        println!("No teams found.");
    } else {
        println!("Found {} teams:", teams.len());
        print_teams(&teams);
    }

    Ok(())
}
