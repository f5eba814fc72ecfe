use std::fmt;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Span};

use crate::client::SlackClient;
use crate::constants::DEFAULT_SLEEP_MS;
use crate::error::NotifyError;
use crate::filtering::EmailFilter;
use crate::formatting::{print_message_preview, team_reminder};
use crate::models::{Member, Message, Team};

/// Where a reminder ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A team owner, by Slack user ID.
    Owner { slack_id: String, email: String },
    /// The team channel, used when no owner can be reached.
    Channel(String),
}

impl Recipient {
    pub fn id(&self) -> &str {
        match self {
            Recipient::Owner { slack_id, .. } => slack_id,
            Recipient::Channel(channel) => channel,
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Outcome counters of one dispatch run. Failures are only reported here
/// and in the logs; they never fail the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
    pub lookup_failures: usize,
    pub skipped_teams: usize,
    pub cancelled: bool,
}

impl DispatchSummary {
    /// True when some reminder was not delivered or the run stopped early.
    pub fn is_incomplete(&self) -> bool {
        self.failed > 0 || self.lookup_failures > 0 || self.cancelled
    }
}

/// Sends membership reminders to team owners, one message at a time.
pub struct Notifier {
    slack: SlackClient,
    console_url: String,
    sleep_duration: Duration,
    owner_filter: EmailFilter,
    dry_run: bool,
    span: Span,
}

impl Notifier {
    pub fn new(slack: SlackClient, console_url: &str, span: Span) -> Self {
        Self {
            slack,
            console_url: console_url.to_string(),
            sleep_duration: Duration::from_millis(DEFAULT_SLEEP_MS),
            owner_filter: EmailFilter::default(),
            dry_run: false,
            span,
        }
    }

    /// Delay after every send. Slack rate limits `chat.postMessage` hard.
    pub fn with_sleep_duration(mut self, sleep_duration: Duration) -> Self {
        self.sleep_duration = sleep_duration;
        self
    }

    pub fn with_owner_filter(mut self, owner_filter: EmailFilter) -> Self {
        self.owner_filter = owner_filter;
        self
    }

    /// Print messages instead of sending them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Notifies every team in order. Stops issuing new requests as soon as
    /// `cancel` fires.
    pub async fn notify_teams(&self, teams: &[Team], cancel: &CancellationToken) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for team in teams {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            self.notify_team(team, cancel, &mut summary).await;
            if summary.cancelled {
                break;
            }
        }

        if summary.cancelled {
            warn!(parent: &self.span, "notification run cancelled");
        }
        info!(
            parent: &self.span,
            sent = summary.sent,
            failed = summary.failed,
            lookup_failures = summary.lookup_failures,
            skipped_teams = summary.skipped_teams,
            "done notifying teams"
        );
        summary
    }

    async fn notify_team(&self, team: &Team, cancel: &CancellationToken, summary: &mut DispatchSummary) {
        let recipients = match self.resolve_recipients(team, cancel, summary).await {
            Some(recipients) => recipients,
            None => return,
        };
        if recipients.is_empty() {
            summary.skipped_teams += 1;
            return;
        }

        let message = team_reminder(team, &self.console_url);
        for recipient in &recipients {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                return;
            }

            if self.dry_run {
                print_message_preview(team, recipient.id(), &message);
                info!(parent: &self.span, team_slug = %team.slug, recipient_id = %recipient, "dry run, notification not sent");
                summary.sent += 1;
                continue;
            }

            match self.send(recipient, &message).await {
                Ok(()) => {
                    info!(parent: &self.span, team_slug = %team.slug, recipient_id = %recipient, "notification sent");
                    summary.sent += 1;
                }
                Err(e) => {
                    error!(parent: &self.span, team_slug = %team.slug, recipient_id = %recipient, error = %e, "post message to Slack");
                    summary.failed += 1;
                }
            }

            if !self.pause(cancel).await {
                summary.cancelled = true;
                return;
            }
        }
    }

    /// Owners reachable on Slack, or the team channel when none are and no
    /// owner filter is set. `None` means the run was cancelled.
    async fn resolve_recipients(
        &self,
        team: &Team,
        cancel: &CancellationToken,
        summary: &mut DispatchSummary,
    ) -> Option<Vec<Recipient>> {
        let owners: Vec<&Member> = team.owners().collect();
        if owners.is_empty() {
            info!(parent: &self.span, team_slug = %team.slug, "unable to find team owner");
        }

        let mut recipients = Vec::new();
        for owner in owners {
            let email = owner.user.email.as_str();
            if !self.owner_filter.allows(email) {
                continue;
            }
            if cancel.is_cancelled() {
                summary.cancelled = true;
                return None;
            }

            if self.dry_run {
                recipients.push(Recipient::Owner {
                    slack_id: email.to_string(),
                    email: email.to_string(),
                });
                continue;
            }

            match self.slack.lookup_user_by_email(email).await {
                Ok(user) => {
                    debug!(
                        parent: &self.span,
                        team_slug = %team.slug,
                        user_email = %email,
                        user_slack_id = %user.id,
                        user_slack_name = user.real_name.as_deref().unwrap_or(""),
                        "resolved Slack user"
                    );
                    recipients.push(Recipient::Owner {
                        slack_id: user.id,
                        email: email.to_string(),
                    });
                }
                Err(e) => {
                    let e = NotifyError::RecipientLookup {
                        email: email.to_string(),
                        reason: e.to_string(),
                    };
                    error!(parent: &self.span, team_slug = %team.slug, user_email = %email, error = %e, "unable to look up Slack user");
                    summary.lookup_failures += 1;
                }
            }
        }

        if !recipients.is_empty() {
            return Some(recipients);
        }

        if !self.owner_filter.is_empty() {
            debug!(parent: &self.span, team_slug = %team.slug, "no owners matching the owner emails filter");
            return Some(recipients);
        }

        match team.fallback_channel() {
            Some(channel) => {
                debug!(parent: &self.span, team_slug = %team.slug, slack_channel = %channel, "falling back to team channel");
                recipients.push(Recipient::Channel(channel.to_string()));
            }
            None => {
                warn!(parent: &self.span, team_slug = %team.slug, "team has no reachable owner and no Slack channel, skipping");
            }
        }
        Some(recipients)
    }

    async fn send(&self, recipient: &Recipient, message: &Message) -> Result<(), NotifyError> {
        self.slack
            .post_message(recipient.id(), message)
            .await
            .map_err(|e| NotifyError::Send {
                recipient: recipient.id().to_string(),
                reason: e.to_string(),
            })
    }

    /// Waits out the send delay. Returns `false` if cancelled meanwhile.
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        if self.sleep_duration.is_zero() {
            return !cancel.is_cancelled();
        }
        tokio::select! {
            _ = tokio::time::sleep(self.sleep_duration) => true,
            _ = cancel.cancelled() => false,
        }
    }
}
