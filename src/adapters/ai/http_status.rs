//! Shared classification of provider HTTP failures.

use crate::ports::AIError;

/// Maps a non-2xx status and its body to an error.
///
/// `default_retry_secs` is used for 429 responses whose message carries no
/// "try again in N" hint.
pub(crate) fn classify_status(status: u16, error_body: &str, default_retry_secs: u32) -> AIError {
    match status {
        401 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(
            parse_retry_after(error_body).unwrap_or(default_retry_secs),
        ),
        400 => AIError::InvalidRequest(error_body.to_string()),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Reads the seconds out of `{"error":{"message":"... try again in 12s"}}`.
fn parse_retry_after(error_body: &str) -> Option<u32> {
    let parsed: serde_json::Value = serde_json::from_str(error_body).ok()?;
    let message = parsed.get("error")?.get("message")?.as_str()?;
    let idx = message.find("try again in ")?;
    let digits: String = message[idx + 13..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recovery::ErrorKind;

    #[test]
    fn status_classification() {
        assert!(matches!(classify_status(401, "", 60), AIError::AuthenticationFailed));
        assert!(matches!(classify_status(400, "bad", 60), AIError::InvalidRequest(_)));
        assert!(matches!(classify_status(500, "boom", 60), AIError::Unavailable { .. }));
        assert!(matches!(classify_status(418, "", 60), AIError::Network(_)));
        assert_eq!(classify_status(503, "", 60).kind(), ErrorKind::ProviderError);
    }

    #[test]
    fn rate_limit_reads_retry_hint() {
        let body = r#"{"error":{"message":"Rate limited, try again in 12 seconds"}}"#;
        assert!(matches!(
            classify_status(429, body, 60),
            AIError::RateLimited { retry_after_secs: 12 }
        ));
    }

    #[test]
    fn rate_limit_falls_back_to_default() {
        let body = r#"{"error":{"message":"slow down"}}"#;
        assert!(matches!(
            classify_status(429, body, 30),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
        assert!(matches!(
            classify_status(429, "not json", 60),
            AIError::RateLimited { retry_after_secs: 60 }
        ));
    }
}
