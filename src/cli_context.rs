use tokio_util::sync::CancellationToken;
use tracing::info_span;

use crate::client::{SlackClient, TeamDirectoryClient};
use crate::config::Config;
use crate::error::NotifyResult;
use crate::notifier::Notifier;

/// Central context for CLI operations: the validated configuration, the
/// cancellation signal, and factories for the clients built from them.
pub struct CliContext {
    config: Config,
    cancel: CancellationToken,
}

impl CliContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn directory_client(&self) -> NotifyResult<TeamDirectoryClient> {
        let api = &self.config.nais_api;
        Ok(TeamDirectoryClient::new(
            &api.endpoint,
            api.api_token.expose(),
            api.request_timeout,
            info_span!("nais_api_client", component = "nais-api-client"),
        )?
        .with_pagination(api.pagination)
        .with_page_size(api.page_size))
    }

    pub fn notifier(&self, dry_run: bool) -> NotifyResult<Notifier> {
        let slack = SlackClient::new(
            self.config.slack.api_token.expose(),
            self.config.nais_api.request_timeout,
        )?
        .with_api_url(&self.config.slack.api_url);

        Ok(Notifier::new(
            slack,
            &self.config.nais_api.console_url,
            info_span!("slack_notifier", component = "slack-notifier"),
        )
        .with_sleep_duration(self.config.dispatch.sleep_duration)
        .with_owner_filter(self.config.dispatch.owner_emails_filter.clone())
        .with_dry_run(dry_run))
    }
}
