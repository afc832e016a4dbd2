//! Shared plumbing for the HTTP-based channels
//!
//! All HTTP channels build the same kind of agent and classify transport
//! failures the same way; keeping that here keeps the channel modules down
//! to their provider-specific wire formats.

use std::time::Duration;

use crate::AlertError;

/// Build the blocking HTTP agent every channel uses
///
/// The timeout bounds the whole request so a dispatch can never stall the
/// evaluation cycle past it.
pub(crate) fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(concat!("scaffguard/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Reject endpoints that aren't HTTP(S) URLs
pub(crate) fn check_endpoint(endpoint: &str) -> Result<(), AlertError> {
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        return Err(AlertError::Config(format!(
            "endpoint must start with http:// or https://, got '{endpoint}'"
        )));
    }
    Ok(())
}

/// Map a ureq error onto the alert error taxonomy
///
/// A status-code answer means the provider spoke and refused; anything
/// below that is a transport failure.
pub(crate) fn classify(error: ureq::Error) -> AlertError {
    match error {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            AlertError::Rejected(format!("HTTP {}: {}", code, provider_detail(&body)))
        }
        ureq::Error::Transport(transport) => AlertError::Transport(transport.to_string()),
    }
}

/// Pull a human-readable detail out of a provider error body
///
/// Providers disagree on the field name ("error" for Textbelt, "message"
/// for Twilio); fall back to the raw body, clipped so a misbehaving
/// gateway can't flood the logs.
pub(crate) fn provider_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(detail) = value.get(key).and_then(|v| v.as_str()) {
                return detail.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no detail from provider".to_string();
    }

    trimmed.chars().take(200).collect()
}
