pub mod notify;
pub mod teams;

use clap::ArgMatches;

use crate::config::Config;
use crate::filtering::SlugFilter;

pub use notify::{check_teams, handle_notify, run_notify};
pub use teams::handle_teams;

/// `--teams` on the command line replaces `TEAMS_FILTER` from the environment.
pub fn teams_filter(matches: &ArgMatches, config: &Config) -> SlugFilter {
    matches
        .try_get_one::<String>("teams")
        .ok()
        .flatten()
        .map(|value| SlugFilter::parse(value))
        .unwrap_or_else(|| config.nais_api.teams_filter.clone())
}
