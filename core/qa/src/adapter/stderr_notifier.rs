//! stderr へ失敗を知らせる Notifier

use crate::ports::outbound::Notifier;
use common::error::Error;

#[derive(Debug, Clone, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify_failure(&self, error: &Error) {
        eprintln!("{}", failure_message(error));
    }
}

/// 失敗の種類ごとのユーザー向け文言
pub fn failure_message(error: &Error) -> String {
    match error {
        Error::EmptyInput => "Please type a question first.".to_string(),
        Error::Upstream { status: 401 | 403, .. } => format!(
            "Could not get an answer: the provider rejected the API key ({}). Check your API key and try again.",
            error
        ),
        Error::Upstream { .. } | Error::Http(_) => format!(
            "Could not get an answer ({}). Please try again.",
            error
        ),
        _ => format!("Could not get an answer: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(failure_message(&Error::EmptyInput), "Please type a question first.");
        assert!(failure_message(&Error::upstream(401, "bad key")).contains("API key"));
        assert!(failure_message(&Error::upstream(500, "boom")).contains("HTTP 500"));
        assert!(failure_message(&Error::http("timed out")).contains("timed out"));
    }
}
