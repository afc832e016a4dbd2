//! SMTP email channel
//!
//! Authenticated SMTP submission over TLS (lettre). Addresses are parsed
//! once at construction so a typo in the deployment config fails at
//! process start, not in the middle of a danger cycle.

use std::time::Duration;

use lettre::{
    message::Mailbox,
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use crate::{AlertChannel, AlertError, AlertMessage, DEFAULT_TIMEOUT};

/// SMTP channel configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay host, e.g. "smtp.gmail.com"
    pub host: String,
    /// Relay port override; the TLS default is used when unset
    pub port: Option<u16>,
    /// Account username
    pub username: String,
    /// Account password or app password
    pub password: String,
    /// Sender address
    pub from: String,
    /// Destination address
    pub to: String,
    /// Connection and command timeout
    pub timeout: Duration,
}

impl SmtpConfig {
    /// Configuration for an authenticated TLS relay
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: None,
            username: username.into(),
            password: password.into(),
            from: from.into(),
            to: to.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the relay port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the transport timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Email channel backed by an SMTP relay
pub struct SmtpChannel {
    from: Mailbox,
    to: Mailbox,
    mailer: SmtpTransport,
}

impl SmtpChannel {
    /// Validate the configuration and build the channel
    pub fn new(config: SmtpConfig) -> Result<Self, AlertError> {
        if config.host.is_empty() {
            return Err(AlertError::Config("SMTP relay host is empty".into()));
        }
        if config.username.is_empty() || config.password.is_empty() {
            return Err(AlertError::Config("SMTP credentials are empty".into()));
        }

        let from: Mailbox = config.from.parse().map_err(|e| {
            AlertError::Config(format!("invalid sender address '{}': {e}", config.from))
        })?;
        let to: Mailbox = config.to.parse().map_err(|e| {
            AlertError::Config(format!("invalid destination address '{}': {e}", config.to))
        })?;

        let mut builder = SmtpTransport::relay(&config.host)
            .map_err(|e| AlertError::Config(format!("invalid SMTP relay: {e}")))?
            .credentials(Credentials::new(config.username, config.password))
            .timeout(Some(config.timeout));

        if let Some(port) = config.port {
            builder = builder.port(port);
        }

        Ok(Self {
            from,
            to,
            mailer: builder.build(),
        })
    }
}

impl AlertChannel for SmtpChannel {
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(message.subject())
            .body(message.body().to_string())
            .map_err(|e| AlertError::Transport(format!("failed to build message: {e}")))?;

        match self.mailer.send(&email) {
            Ok(response) if response.is_positive() => Ok(()),
            Ok(response) => Err(AlertError::Rejected(format!(
                "SMTP relay replied {}",
                response.code()
            ))),
            Err(e) => Err(AlertError::Transport(e.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "email-smtp"
    }
}
