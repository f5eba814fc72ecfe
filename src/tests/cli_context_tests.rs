use std::collections::HashMap;

use clap::{Arg, Command};
use tokio_util::sync::CancellationToken;

use crate::cli_context::CliContext;
use crate::commands::{check_teams, teams_filter};
use crate::config::{Config, EmptyTeamsPolicy};
use crate::error::NotifyError;
use crate::filtering::SlugFilter;
use crate::models::Team;

fn test_config() -> Config {
    let vars: HashMap<&str, &str> = [
        ("SLACK_API_TOKEN", "xoxb-test"),
        ("NAIS_API_TOKEN", "nais-test"),
        ("TEAMS_FILTER", "team-a,team-b"),
    ]
    .into_iter()
    .collect();
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

fn teams_command() -> Command {
    Command::new("test").arg(Arg::new("teams").long("teams"))
}

#[test]
fn test_context_builds_clients() {
    let context = CliContext::new(test_config());
    assert!(context.directory_client().is_ok());
    assert!(context.notifier(false).is_ok());
    assert!(context.notifier(true).is_ok());
}

#[test]
fn test_context_shares_cancellation() {
    let cancel = CancellationToken::new();
    let context = CliContext::new(test_config()).with_cancellation(cancel.clone());

    assert!(!context.cancellation().is_cancelled());
    cancel.cancel();
    assert!(context.cancellation().is_cancelled());
}

#[test]
fn test_teams_filter_defaults_to_config() {
    let config = test_config();
    let matches = teams_command().get_matches_from(["test"]);

    let filter = teams_filter(&matches, &config);
    assert_eq!(filter, SlugFilter::new(["team-a", "team-b"]));
}

#[test]
fn test_teams_flag_overrides_config() {
    let config = test_config();
    let matches = teams_command().get_matches_from(["test", "--teams", "team-c"]);

    let filter = teams_filter(&matches, &config);
    assert!(filter.matches("team-c"));
    assert!(!filter.matches("team-a"));
}

#[test]
fn test_check_teams_policies() {
    let none: Vec<Team> = Vec::new();
    let unfiltered = SlugFilter::default();

    assert!(matches!(
        check_teams(&none, &unfiltered, EmptyTeamsPolicy::Error),
        Err(NotifyError::NoTeams)
    ));
    assert!(check_teams(&none, &unfiltered, EmptyTeamsPolicy::Warn).is_ok());
    assert!(check_teams(&none, &SlugFilter::parse("gone"), EmptyTeamsPolicy::Error).is_ok());
    assert!(check_teams(&[Team::new("a", None)], &unfiltered, EmptyTeamsPolicy::Error).is_ok());
}
