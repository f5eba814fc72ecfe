pub const DEFAULT_NAIS_API_ENDPOINT: &str = "https://console.nav.cloud.nais.io/graphql";
pub const DEFAULT_CONSOLE_URL: &str = "https://console.nav.cloud.nais.io/";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api/";

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_SLEEP_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = concat!("slack-teams-notification/", env!("CARGO_PKG_VERSION"));

pub const OWNER_ROLE: &str = "OWNER";
pub const SUPPORT_CHANNEL: &str = "#nais";

