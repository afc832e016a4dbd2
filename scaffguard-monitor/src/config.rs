//! Daemon configuration
//!
//! Everything deployment-specific (channel choice, destination,
//! credentials, thresholds, cadence) comes from the environment at
//! process start; a `.env` file works too. Nothing here is ever
//! hard-coded, and the selected channel's variables are the only ones
//! required.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use scaffguard_alerts::{
    AlertChannel, AlertError, SmtpChannel, SmtpConfig, TextbeltChannel, TextbeltConfig,
    TwilioChannel, TwilioConfig, WhatsAppChannel, WhatsAppConfig,
};
use scaffguard_core::{
    constants::{DEFAULT_CYCLE_INTERVAL_SECS, DEFAULT_SAFE_MAX_DEG, DEFAULT_WARNING_MAX_DEG},
    StatusEvaluator, VibrationPolicy,
};

/// The notification channel this deployment uses
///
/// A deployment decision made at process start; never switched per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Textbelt HTTP SMS
    SmsTextbelt,
    /// Twilio SMS
    SmsTwilio,
    /// Authenticated SMTP email
    EmailSmtp,
    /// CallMeBot-style WhatsApp gateway
    WhatsAppHttp,
}

impl FromStr for ChannelKind {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms-textbelt" => Ok(ChannelKind::SmsTextbelt),
            "sms-twilio" => Ok(ChannelKind::SmsTwilio),
            "email-smtp" => Ok(ChannelKind::EmailSmtp),
            "whatsapp-http" => Ok(ChannelKind::WhatsAppHttp),
            other => Err(AlertError::Config(format!(
                "unknown channel '{other}' (expected sms-textbelt, sms-twilio, email-smtp or whatsapp-http)"
            ))),
        }
    }
}

/// Daemon configuration assembled from the environment
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Selected notification channel
    pub channel: ChannelKind,
    /// Evaluation cycle cadence
    pub interval: Duration,
    /// Upper bound of the SAFE tilt band
    pub safe_max_deg: f32,
    /// Upper bound of the WARNING tilt band
    pub warning_max_deg: f32,
    /// Vibration level that escalates to at least WARNING, if enabled
    pub vibration_warning: Option<f32>,
    /// Vibration level that escalates to DANGER, if enabled
    pub vibration_danger: Option<f32>,
}

impl MonitorConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, AlertError> {
        dotenv::dotenv().ok();

        let channel: ChannelKind = required("SCAFFGUARD_CHANNEL")?.parse()?;

        let interval_secs = parse_u64(
            env::var("SCAFFGUARD_INTERVAL_SECS").ok(),
            "SCAFFGUARD_INTERVAL_SECS",
            DEFAULT_CYCLE_INTERVAL_SECS,
        )?;
        if interval_secs == 0 {
            return Err(AlertError::Config(
                "SCAFFGUARD_INTERVAL_SECS must be at least 1".into(),
            ));
        }

        let safe_max_deg = parse_f32(
            env::var("SCAFFGUARD_SAFE_MAX_DEG").ok(),
            "SCAFFGUARD_SAFE_MAX_DEG",
            DEFAULT_SAFE_MAX_DEG,
        )?;
        let warning_max_deg = parse_f32(
            env::var("SCAFFGUARD_WARNING_MAX_DEG").ok(),
            "SCAFFGUARD_WARNING_MAX_DEG",
            DEFAULT_WARNING_MAX_DEG,
        )?;

        let vibration_warning = parse_opt_f32(
            env::var("SCAFFGUARD_VIBRATION_WARNING").ok(),
            "SCAFFGUARD_VIBRATION_WARNING",
        )?;
        let vibration_danger = parse_opt_f32(
            env::var("SCAFFGUARD_VIBRATION_DANGER").ok(),
            "SCAFFGUARD_VIBRATION_DANGER",
        )?;
        if vibration_warning.is_some() != vibration_danger.is_some() {
            return Err(AlertError::Config(
                "SCAFFGUARD_VIBRATION_WARNING and SCAFFGUARD_VIBRATION_DANGER must be set together"
                    .into(),
            ));
        }

        Ok(Self {
            channel,
            interval: Duration::from_secs(interval_secs),
            safe_max_deg,
            warning_max_deg,
            vibration_warning,
            vibration_danger,
        })
    }

    /// Build the evaluator for this deployment
    pub fn evaluator(&self) -> StatusEvaluator {
        let evaluator =
            StatusEvaluator::new_with_thresholds(self.safe_max_deg, self.warning_max_deg);

        match (self.vibration_warning, self.vibration_danger) {
            (Some(warning), Some(danger)) => evaluator
                .with_vibration_policy(VibrationPolicy::Escalate { warning, danger }),
            _ => evaluator,
        }
    }

    /// Build the configured notification channel
    ///
    /// Reads the selected channel's variables only, so an SMS deployment
    /// doesn't need SMTP credentials in its environment.
    pub fn build_channel(&self) -> Result<Box<dyn AlertChannel + Send>, AlertError> {
        match self.channel {
            ChannelKind::SmsTextbelt => {
                let mut config = TextbeltConfig::new(
                    required("SCAFFGUARD_ALERT_TO")?,
                    required("SCAFFGUARD_TEXTBELT_KEY")?,
                );
                if let Ok(endpoint) = env::var("SCAFFGUARD_TEXTBELT_URL") {
                    config = config.endpoint(endpoint);
                }
                Ok(Box::new(TextbeltChannel::new(config)?))
            }
            ChannelKind::SmsTwilio => {
                let config = TwilioConfig::new(
                    required("SCAFFGUARD_TWILIO_SID")?,
                    required("SCAFFGUARD_TWILIO_TOKEN")?,
                    required("SCAFFGUARD_TWILIO_FROM")?,
                    required("SCAFFGUARD_ALERT_TO")?,
                );
                Ok(Box::new(TwilioChannel::new(config)?))
            }
            ChannelKind::EmailSmtp => {
                let mut config = SmtpConfig::new(
                    required("SCAFFGUARD_SMTP_HOST")?,
                    required("SCAFFGUARD_SMTP_USER")?,
                    required("SCAFFGUARD_SMTP_PASSWORD")?,
                    required("SCAFFGUARD_SMTP_FROM")?,
                    required("SCAFFGUARD_ALERT_TO")?,
                );
                if let Some(port) =
                    parse_opt_u16(env::var("SCAFFGUARD_SMTP_PORT").ok(), "SCAFFGUARD_SMTP_PORT")?
                {
                    config = config.port(port);
                }
                Ok(Box::new(SmtpChannel::new(config)?))
            }
            ChannelKind::WhatsAppHttp => {
                let mut config = WhatsAppConfig::new(
                    required("SCAFFGUARD_ALERT_TO")?,
                    required("SCAFFGUARD_WHATSAPP_KEY")?,
                );
                if let Ok(endpoint) = env::var("SCAFFGUARD_WHATSAPP_URL") {
                    config = config.endpoint(endpoint);
                }
                Ok(Box::new(WhatsAppChannel::new(config)?))
            }
        }
    }
}

fn required(name: &str) -> Result<String, AlertError> {
    env::var(name).map_err(|_| AlertError::Config(format!("{name} is not set")))
}

fn parse_f32(value: Option<String>, name: &str, default: f32) -> Result<f32, AlertError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AlertError::Config(format!("{name} is not a number: '{raw}'"))),
    }
}

fn parse_opt_f32(value: Option<String>, name: &str) -> Result<Option<f32>, AlertError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AlertError::Config(format!("{name} is not a number: '{raw}'"))),
    }
}

fn parse_u64(value: Option<String>, name: &str, default: u64) -> Result<u64, AlertError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AlertError::Config(format!("{name} is not a whole number: '{raw}'"))),
    }
}

fn parse_opt_u16(value: Option<String>, name: &str) -> Result<Option<u16>, AlertError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AlertError::Config(format!("{name} is not a port number: '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names_parse() {
        assert_eq!(
            "sms-textbelt".parse::<ChannelKind>().unwrap(),
            ChannelKind::SmsTextbelt
        );
        assert_eq!(
            "sms-twilio".parse::<ChannelKind>().unwrap(),
            ChannelKind::SmsTwilio
        );
        assert_eq!(
            "email-smtp".parse::<ChannelKind>().unwrap(),
            ChannelKind::EmailSmtp
        );
        assert_eq!(
            "whatsapp-http".parse::<ChannelKind>().unwrap(),
            ChannelKind::WhatsAppHttp
        );
        assert!("carrier-pigeon".parse::<ChannelKind>().is_err());
    }

    #[test]
    fn numeric_parsing_defaults_and_errors() {
        assert_eq!(parse_f32(None, "X", 5.0).unwrap(), 5.0);
        assert_eq!(parse_f32(Some("7.5".into()), "X", 5.0).unwrap(), 7.5);
        assert_eq!(parse_f32(Some(" 7.5 ".into()), "X", 5.0).unwrap(), 7.5);
        assert!(parse_f32(Some("steep".into()), "X", 5.0).is_err());

        assert_eq!(parse_u64(None, "X", 5).unwrap(), 5);
        assert!(parse_u64(Some("-3".into()), "X", 5).is_err());

        assert_eq!(parse_opt_f32(None, "X").unwrap(), None);
        assert_eq!(parse_opt_f32(Some("1.5".into()), "X").unwrap(), Some(1.5));
    }

    #[test]
    fn evaluator_reflects_thresholds() {
        let config = MonitorConfig {
            channel: ChannelKind::SmsTextbelt,
            interval: Duration::from_secs(5),
            safe_max_deg: 3.0,
            warning_max_deg: 8.0,
            vibration_warning: None,
            vibration_danger: None,
        };

        let evaluator = config.evaluator();
        assert_eq!(evaluator.safe_max_deg(), 3.0);
        assert_eq!(evaluator.warning_max_deg(), 8.0);
    }
}
