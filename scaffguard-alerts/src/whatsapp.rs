//! WhatsApp gateway channel
//!
//! CallMeBot-style gateway: a single GET with `phone`, `text` and
//! `apikey` query parameters. The gateway answers 200 with an HTML page
//! we don't inspect; any 2xx counts as delivered.

use std::time::Duration;

use crate::{utils, AlertChannel, AlertError, AlertMessage, DEFAULT_TIMEOUT};

/// Default CallMeBot WhatsApp endpoint
pub const WHATSAPP_ENDPOINT: &str = "https://api.callmebot.com/whatsapp.php";

/// WhatsApp gateway configuration
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Gateway endpoint; override for a different gateway or for tests
    pub endpoint: String,
    /// Destination phone number in E.164 form
    pub phone: String,
    /// Gateway API key issued to that phone number
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl WhatsAppConfig {
    /// Configuration for the public CallMeBot endpoint
    pub fn new(phone: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: WHATSAPP_ENDPOINT.to_string(),
            phone: phone.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the gateway endpoint
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

/// WhatsApp channel backed by a CallMeBot-style gateway
pub struct WhatsAppChannel {
    config: WhatsAppConfig,
    agent: ureq::Agent,
}

impl WhatsAppChannel {
    /// Validate the configuration and build the channel
    pub fn new(config: WhatsAppConfig) -> Result<Self, AlertError> {
        utils::check_endpoint(&config.endpoint)?;

        if config.phone.is_empty() {
            return Err(AlertError::Config("destination phone number is empty".into()));
        }
        if config.api_key.is_empty() {
            return Err(AlertError::Config("WhatsApp gateway API key is empty".into()));
        }

        let agent = utils::agent(config.timeout);

        Ok(Self { config, agent })
    }
}

impl AlertChannel for WhatsAppChannel {
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError> {
        self.agent
            .get(&self.config.endpoint)
            .query("phone", &self.config.phone)
            .query("text", message.body())
            .query("apikey", &self.config.api_key)
            .call()
            .map_err(utils::classify)?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "whatsapp-http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = WhatsAppConfig::new("+250788886315", "123456")
            .endpoint("http://localhost:8088/whatsapp.php")
            .timeout_secs(5);

        assert_eq!(config.endpoint, "http://localhost:8088/whatsapp.php");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_empty_credentials() {
        assert!(WhatsAppChannel::new(WhatsAppConfig::new("", "key")).is_err());
        assert!(WhatsAppChannel::new(WhatsAppConfig::new("+1555", "")).is_err());
    }

    #[test]
    fn valid_config_builds() {
        assert!(WhatsAppChannel::new(WhatsAppConfig::new("+1555", "key")).is_ok());
    }
}
