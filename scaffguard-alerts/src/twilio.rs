//! Twilio SMS channel
//!
//! POST of form fields `To`, `From`, `Body` to the account's Messages
//! endpoint, authenticated with the account SID and auth token as HTTP
//! basic auth. Twilio answers 2xx with the message resource on success
//! and 4xx JSON (with a `message` field) on refusal.

use std::time::Duration;

use base64::Engine as _;

use crate::{utils, AlertChannel, AlertError, AlertMessage, DEFAULT_TIMEOUT, SMS_MAX_CHARS};

/// Default Twilio API base
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Twilio channel configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// API base; override for tests
    pub api_base: String,
    /// Account SID
    pub account_sid: String,
    /// Auth token
    pub auth_token: String,
    /// Sending phone number owned by the account
    pub from: String,
    /// Destination phone number in E.164 form
    pub to: String,
    /// Request timeout
    pub timeout: Duration,
}

impl TwilioConfig {
    /// Configuration for the public Twilio API
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            api_base: TWILIO_API_BASE.to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from: from.into(),
            to: to.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API base
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// SMS channel backed by the Twilio Messages API
pub struct TwilioChannel {
    config: TwilioConfig,
    endpoint: String,
    authorization: String,
    agent: ureq::Agent,
}

impl TwilioChannel {
    /// Validate the configuration and build the channel
    pub fn new(config: TwilioConfig) -> Result<Self, AlertError> {
        utils::check_endpoint(&config.api_base)?;

        for (value, what) in [
            (&config.account_sid, "account SID"),
            (&config.auth_token, "auth token"),
            (&config.from, "sending number"),
            (&config.to, "destination number"),
        ] {
            if value.is_empty() {
                return Err(AlertError::Config(format!("Twilio {what} is empty")));
            }
        }

        let endpoint = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            config.api_base, config.account_sid
        );

        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", config.account_sid, config.auth_token));
        let authorization = format!("Basic {credentials}");

        let agent = utils::agent(config.timeout);

        Ok(Self {
            config,
            endpoint,
            authorization,
            agent,
        })
    }
}

impl AlertChannel for TwilioChannel {
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError> {
        if message.char_len() > SMS_MAX_CHARS {
            return Err(AlertError::Rejected(format!(
                "message is {} characters, SMS limit is {}",
                message.char_len(),
                SMS_MAX_CHARS
            )));
        }

        self.agent
            .post(&self.endpoint)
            .set("Authorization", &self.authorization)
            .send_form(&[
                ("To", self.config.to.as_str()),
                ("From", self.config.from.as_str()),
                ("Body", message.body()),
            ])
            .map_err(utils::classify)?;

        // 2xx means Twilio queued the message; the body is the message
        // resource and carries nothing we act on
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sms-twilio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TwilioConfig {
        TwilioConfig::new("AC123", "token", "+15005550006", "+250788886315")
    }

    #[test]
    fn endpoint_is_account_scoped() {
        let channel = TwilioChannel::new(config()).unwrap();
        assert_eq!(
            channel.endpoint,
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn basic_auth_header() {
        let channel = TwilioChannel::new(config()).unwrap();
        // base64("AC123:token")
        assert_eq!(channel.authorization, "Basic QUMxMjM6dG9rZW4=");
    }

    #[test]
    fn rejects_missing_fields() {
        let bad = TwilioConfig::new("", "token", "+1500", "+1555");
        assert!(matches!(TwilioChannel::new(bad), Err(AlertError::Config(_))));

        let bad = TwilioConfig::new("AC123", "token", "+1500", "");
        assert!(matches!(TwilioChannel::new(bad), Err(AlertError::Config(_))));
    }

    #[test]
    fn api_base_override() {
        let channel = TwilioChannel::new(config().api_base("http://localhost:4010")).unwrap();
        assert!(channel.endpoint.starts_with("http://localhost:4010/"));
    }
}
