use std::path::Path;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use slack_teams_notification::cli_context::CliContext;
use slack_teams_notification::commands::{handle_notify, handle_teams};
use slack_teams_notification::config::{load_env_file, Config};
use slack_teams_notification::error::NotifyResult;
use slack_teams_notification::logging::init_logging;

const EXIT_CODE_SUCCESS: i32 = 0;
const EXIT_CODE_ENV_FILE_ERROR: i32 = 1;
const EXIT_CODE_CONFIG_ERROR: i32 = 2;
const EXIT_CODE_LOGGER_ERROR: i32 = 3;
const EXIT_CODE_RUN_ERROR: i32 = 4;

fn teams_arg() -> Arg {
    Arg::new("teams")
        .long("teams")
        .value_name("SLUGS")
        .help("Comma separated team slugs, overrides TEAMS_FILTER")
}

fn cli() -> Command {
    Command::new("slack-teams-notification")
        .about("Remind team owners on Slack to keep their team memberships up to date")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("env-file")
                .long("env-file")
                .value_name("PATH")
                .default_value(".env")
                .global(true)
                .help("Dotenv file to load before reading configuration"),
        )
        .subcommand(
            Command::new("notify")
                .about("Send membership reminders to the owners of every team")
                .arg(teams_arg())
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the messages instead of sending them")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("teams")
                .about("List teams with their owners")
                .arg(teams_arg()),
        )
}

async fn run(matches: &ArgMatches, context: &CliContext) -> NotifyResult<()> {
    match matches.subcommand() {
        Some(("notify", sub_matches)) => {
            let summary = handle_notify(sub_matches, context).await?;
            if summary.is_incomplete() {
                warn!(
                    failed = summary.failed,
                    lookup_failures = summary.lookup_failures,
                    cancelled = summary.cancelled,
                    "some notifications could not be delivered"
                );
            }
            Ok(())
        }
        Some(("teams", sub_matches)) => handle_teams(sub_matches, context).await,
        _ => {
            eprintln!("Unknown command. Use 'slack-teams-notification --help' for available commands.");
            process::exit(EXIT_CODE_RUN_ERROR);
        }
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    let env_file = matches
        .get_one::<String>("env-file")
        .map(String::as_str)
        .unwrap_or(".env");
    let env_loaded = match load_env_file(Path::new(env_file)) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading {}: {}", env_file, e);
            process::exit(EXIT_CODE_ENV_FILE_ERROR);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error when loading config: {}", e);
            process::exit(EXIT_CODE_CONFIG_ERROR);
        }
    };

    if let Err(e) = init_logging(&config.log.format, &config.log.level) {
        eprintln!("Error creating application logger: {}", e);
        process::exit(EXIT_CODE_LOGGER_ERROR);
    }

    if env_loaded {
        info!(path = env_file, "loaded env file");
    } else {
        info!(path = env_file, "no env file found");
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight request and stopping");
            ctrl_c.cancel();
        }
    });

    let context = CliContext::new(config).with_cancellation(cancel);
    if let Err(e) = run(&matches, &context).await {
        error!(error = %e, fetch_error = e.is_fetch_error(), "error in run");
        process::exit(EXIT_CODE_RUN_ERROR);
    }

    process::exit(EXIT_CODE_SUCCESS);
}
