use crate::error::{ErrorContext, NotifyError};
use crate::notify_error;

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found"
    ));

    let notify_result = result.context("Failed to read env file");
    assert!(notify_result.is_err());

    match notify_result {
        Err(NotifyError::Config(msg)) => {
            assert!(msg.contains("Failed to read env file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected NotifyError::Config"),
    }
}

#[test]
fn test_error_context_on_option() {
    let option: Option<String> = None;
    let result = option.context("Slack token not found");

    match result {
        Err(NotifyError::Config(msg)) => assert_eq!(msg, "Slack token not found"),
        _ => panic!("Expected NotifyError::Config"),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<u64, std::num::ParseIntError> = "soon".parse::<u64>();

    let notify_result = result.with_context(|| format!("{} must be a number", "NOTIFY_SLEEP_MS"));
    match notify_result {
        Err(NotifyError::Config(msg)) => {
            assert!(msg.starts_with("NOTIFY_SLEEP_MS must be a number: "));
        }
        _ => panic!("Expected NotifyError::Config"),
    }
}

#[test]
fn test_notify_error_macro() {
    let error = notify_error!(Decode, "unexpected end of input");
    match error {
        NotifyError::Decode(msg) => assert_eq!(msg, "unexpected end of input"),
        _ => panic!("Expected NotifyError::Decode"),
    }

    let error = notify_error!(Config, "invalid value for {}: {}", "PAGE_SIZE", "zero");
    match error {
        NotifyError::Config(msg) => assert_eq!(msg, "invalid value for PAGE_SIZE: zero"),
        _ => panic!("Expected NotifyError::Config"),
    }
}

#[test]
fn test_unexpected_status_message() {
    let error = NotifyError::UnexpectedStatus {
        status: 400,
        endpoint: "http://localhost:3000/query".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("HTTP status code 400"));
    assert!(message.contains("http://localhost:3000/query"));
}

#[test]
fn test_fetch_errors_are_classified() {
    assert!(NotifyError::Decode("EOF".to_string()).is_fetch_error());
    assert!(NotifyError::GraphQL("forbidden".to_string()).is_fetch_error());
    assert!(NotifyError::UnexpectedStatus { status: 500, endpoint: String::new() }.is_fetch_error());
    assert!(!NotifyError::NoTeams.is_fetch_error());
    assert!(!NotifyError::Send { recipient: "U1".to_string(), reason: "channel_not_found".to_string() }.is_fetch_error());
}
