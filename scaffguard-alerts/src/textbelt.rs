//! Textbelt SMS channel
//!
//! Plain HTTP POST of form fields `phone`, `message`, `key` to the
//! Textbelt API. The HTTP answer is 200 even for refused messages; the
//! JSON body's `success` field is what decides delivery, with the `error`
//! field carrying the reason on refusal.

use std::time::Duration;

use crate::{utils, AlertChannel, AlertError, AlertMessage, DEFAULT_TIMEOUT, SMS_MAX_CHARS};

/// Default Textbelt API endpoint
pub const TEXTBELT_ENDPOINT: &str = "https://textbelt.com/text";

/// Textbelt channel configuration
#[derive(Debug, Clone)]
pub struct TextbeltConfig {
    /// API endpoint; override for a self-hosted Textbelt or for tests
    pub endpoint: String,
    /// Destination phone number in E.164 form
    pub phone: String,
    /// API key; the literal "textbelt" uses the free tier
    pub key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl TextbeltConfig {
    /// Configuration for the public Textbelt endpoint
    pub fn new(phone: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            endpoint: TEXTBELT_ENDPOINT.to_string(),
            phone: phone.into(),
            key: key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// SMS channel backed by the Textbelt API
pub struct TextbeltChannel {
    config: TextbeltConfig,
    agent: ureq::Agent,
}

impl TextbeltChannel {
    /// Validate the configuration and build the channel
    pub fn new(config: TextbeltConfig) -> Result<Self, AlertError> {
        utils::check_endpoint(&config.endpoint)?;

        if config.phone.is_empty() {
            return Err(AlertError::Config("destination phone number is empty".into()));
        }
        if config.key.is_empty() {
            return Err(AlertError::Config("Textbelt API key is empty".into()));
        }

        let agent = utils::agent(config.timeout);

        Ok(Self { config, agent })
    }
}

impl AlertChannel for TextbeltChannel {
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError> {
        if message.char_len() > SMS_MAX_CHARS {
            return Err(AlertError::Rejected(format!(
                "message is {} characters, SMS limit is {}",
                message.char_len(),
                SMS_MAX_CHARS
            )));
        }

        let response = self
            .agent
            .post(&self.config.endpoint)
            .send_form(&[
                ("phone", self.config.phone.as_str()),
                ("message", message.body()),
                ("key", self.config.key.as_str()),
            ])
            .map_err(utils::classify)?;

        let text = response
            .into_string()
            .map_err(|e| AlertError::Transport(format!("failed to read response: {e}")))?;

        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| AlertError::Transport(format!("malformed response: {e}")))?;

        if body.get("success").and_then(|v| v.as_bool()).unwrap_or(false) {
            Ok(())
        } else {
            Err(AlertError::Rejected(utils::provider_detail(&text)))
        }
    }

    fn name(&self) -> &'static str {
        "sms-textbelt"
    }
}
