use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{NotifyError, NotifyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            other => Err(NotifyError::Logging(format!("unsupported log format: {:?}", other))),
        }
    }
}

/// Parses a level or filter directive such as `debug` or `slack_teams_notification=trace`.
pub fn parse_filter(level: &str) -> NotifyResult<EnvFilter> {
    let level = level.trim();
    // A bare word would be accepted as a target name, so plain levels are checked first
    if !level.contains('=') && !level.contains(',') {
        let level_filter: LevelFilter = level
            .parse()
            .map_err(|e| NotifyError::Logging(format!("unsupported log level {:?}: {}", level, e)))?;
        return Ok(EnvFilter::default().add_directive(level_filter.into()));
    }

    EnvFilter::try_new(level)
        .map_err(|e| NotifyError::Logging(format!("unsupported log level {:?}: {}", level, e)))
}

/// Installs the process wide subscriber. Logs go to stderr so stdout stays
/// free for command output.
pub fn init_logging(format: &str, level: &str) -> NotifyResult<()> {
    let format: LogFormat = format.parse()?;
    let filter = parse_filter(level)?;

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    result.map_err(|e| NotifyError::Logging(e.to_string()))
}
