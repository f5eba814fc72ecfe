use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::client::Pagination;
use crate::constants::{
    DEFAULT_CONSOLE_URL, DEFAULT_NAIS_API_ENDPOINT, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SLACK_API_URL, DEFAULT_SLEEP_MS,
};
use crate::error::{ErrorContext, NotifyError, NotifyResult};
use crate::filtering::{EmailFilter, SlugFilter};
use crate::notify_error;

/// A credential that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

/// What to do when an unfiltered fetch returns no teams at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyTeamsPolicy {
    /// Fail the run, an empty directory almost always means the API is broken.
    #[default]
    Error,
    /// Log a warning and finish successfully.
    Warn,
}

impl FromStr for EmptyTeamsPolicy {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(EmptyTeamsPolicy::Error),
            "warn" => Ok(EmptyTeamsPolicy::Warn),
            other => Err(notify_error!(
                Config,
                "unsupported empty teams policy {:?}, expected \"error\" or \"warn\"",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `json` or `text`
    pub format: String,
    /// Any tracing filter directive, e.g. `info` or `slack_teams_notification=debug`
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub api_token: Secret,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct NaisApiConfig {
    pub api_token: Secret,
    /// URL to the GraphQL API.
    pub endpoint: String,
    /// Root of the Console frontend, used for links in the reminders.
    pub console_url: String,
    /// Only these teams are notified when non-empty.
    pub teams_filter: SlugFilter,
    pub pagination: Pagination,
    pub page_size: usize,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Only owners with these emails are notified when non-empty.
    pub owner_emails_filter: EmailFilter,
    pub sleep_duration: Duration,
    pub empty_teams_policy: EmptyTeamsPolicy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log: LogConfig,
    pub slack: SlackConfig,
    pub nais_api: NaisApiConfig,
    pub dispatch: DispatchConfig,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> NotifyResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> NotifyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let config = Config {
            log: LogConfig {
                format: var("LOG_FORMAT", "json"),
                level: var("LOG_LEVEL", "info"),
            },
            slack: SlackConfig {
                api_token: Secret::new(var("SLACK_API_TOKEN", "")),
                api_url: var("SLACK_API_URL", DEFAULT_SLACK_API_URL),
            },
            nais_api: NaisApiConfig {
                api_token: Secret::new(var("NAIS_API_TOKEN", "")),
                endpoint: var("NAIS_API_ENDPOINT", DEFAULT_NAIS_API_ENDPOINT),
                console_url: var("CONSOLE_URL", DEFAULT_CONSOLE_URL),
                teams_filter: SlugFilter::parse(&var("TEAMS_FILTER", "")),
                pagination: var("PAGINATION_MODE", "cursor").parse()?,
                page_size: parse_number("PAGE_SIZE", &var("PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string()))?,
                request_timeout: Duration::from_secs(parse_number(
                    "REQUEST_TIMEOUT_SECS",
                    &var("REQUEST_TIMEOUT_SECS", &DEFAULT_REQUEST_TIMEOUT_SECS.to_string()),
                )?),
            },
            dispatch: DispatchConfig {
                owner_emails_filter: EmailFilter::parse(&var("OWNER_EMAILS_FILTER", "")),
                sleep_duration: Duration::from_millis(parse_number(
                    "NOTIFY_SLEEP_MS",
                    &var("NOTIFY_SLEEP_MS", &DEFAULT_SLEEP_MS.to_string()),
                )?),
                empty_teams_policy: var("EMPTY_TEAMS_POLICY", "error").parse()?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> NotifyResult<()> {
        if self.slack.api_token.is_empty() {
            return Err(notify_error!(Config, "missing Slack API token (SLACK_API_TOKEN)"));
        }
        if self.nais_api.api_token.is_empty() {
            return Err(notify_error!(Config, "missing Nais API token (NAIS_API_TOKEN)"));
        }
        if self.nais_api.page_size == 0 {
            return Err(notify_error!(Config, "PAGE_SIZE must be greater than zero"));
        }
        if self.nais_api.request_timeout.is_zero() {
            return Err(notify_error!(Config, "REQUEST_TIMEOUT_SECS must be greater than zero"));
        }
        Ok(())
    }
}

fn parse_number<T>(key: &str, value: &str) -> NotifyResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, value))
}

/// Loads variables from a dotenv file into the process environment if the
/// file exists. Returns whether a file was loaded. Variables already set in
/// the environment win.
pub fn load_env_file(path: &Path) -> NotifyResult<bool> {
    if !path.exists() {
        return Ok(false);
    }

    dotenvy::from_path(path)
        .with_context(|| format!("load env file {}", path.display()))?;
    Ok(true)
}
