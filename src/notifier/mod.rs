pub mod dispatcher;

pub use dispatcher::{DispatchSummary, Notifier, Recipient};
