use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("request to {endpoint:?} failed: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status code {status} from {endpoint:?}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("decode response: {0}")]
    Decode(String),

    #[error("GraphQL error: {0}")]
    GraphQL(String),

    #[error("Pagination error: {0}")]
    Pagination(String),

    #[error("no teams returned from the API, this is most likely an error")]
    NoTeams,

    #[error("unable to look up Slack user {email:?}: {reason}")]
    RecipientLookup { email: String, reason: String },

    #[error("unable to post message to {recipient:?}: {reason}")]
    Send { recipient: String, reason: String },

    #[error("Slack API error: {0}")]
    Slack(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type NotifyResult<T> = Result<T, NotifyError>;

impl NotifyError {
    /// Errors raised while reading the team directory abort the whole run.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            NotifyError::Connection { .. }
                | NotifyError::UnexpectedStatus { .. }
                | NotifyError::Decode(_)
                | NotifyError::GraphQL(_)
                | NotifyError::Pagination(_)
        )
    }
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> NotifyResult<T>;
    fn with_context<F>(self, f: F) -> NotifyResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> NotifyResult<T> {
        self.map_err(|e| NotifyError::Config(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> NotifyResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| NotifyError::Config(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> NotifyResult<T> {
        self.ok_or_else(|| NotifyError::Config(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> NotifyResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| NotifyError::Config(f()))
    }
}

#[macro_export]
macro_rules! notify_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::NotifyError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::NotifyError::$error_type(format!($fmt, $($arg)*))
    };
}
