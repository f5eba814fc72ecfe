pub mod message;
pub mod mrkdwn;
pub mod teams;
pub mod utils;

pub use message::{fallback_text, team_members_admin_url, team_reminder};
pub use mrkdwn::{format_blocks, format_mrkdwn};
pub use teams::{print_message_preview, print_teams};
pub use utils::{pluralize, truncate};
