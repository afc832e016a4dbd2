//! Notification Channels for Scaffold Danger Alerts
//!
//! ## Overview
//!
//! This crate carries a DANGER classification out of the evaluation core
//! and into somebody's pocket. It provides one module per notification
//! channel, a channel trait the dispatcher works against, and the
//! dispatcher itself, which turns every transport outcome (success,
//! provider rejection, network failure) into a plain [`AlertOutcome`]
//! that can never take the evaluation cycle down with it.
//!
//! ## Channel Selection Guide
//!
//! Exactly one channel is active per deployment; the choice is made in
//! configuration at process start, never per cycle.
//!
//! - **`sms-textbelt`**: plain HTTP POST to the Textbelt API. No account
//!   setup beyond an API key; the free-tier key works for trials.
//! - **`sms-twilio`**: Twilio Messages API with account SID/token basic
//!   auth. The production-grade SMS option.
//! - **`email-smtp`**: authenticated SMTP submission. For sites where the
//!   responsible engineer watches a mailbox, not a phone.
//! - **`whatsapp-http`**: CallMeBot-style WhatsApp gateway, a single GET
//!   with query parameters.
//!
//! ## Dispatch Semantics
//!
//! The caller invokes [`AlertDispatcher::dispatch`] only for DANGER
//! cycles; the dispatcher does not re-check the status. One call means
//! exactly one transport attempt: no retry, no backoff, no cooldown, and
//! an identical alert moments later is sent again. Every transport error
//! is caught at this boundary and reported through the outcome.
//!
//! ```
//! use scaffguard_alerts::{AlertChannel, AlertDispatcher, AlertError, AlertMessage};
//! use scaffguard_core::Reading;
//!
//! struct NullChannel;
//!
//! impl AlertChannel for NullChannel {
//!     fn send(&mut self, _message: &AlertMessage) -> Result<(), AlertError> {
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "null"
//!     }
//! }
//!
//! let mut dispatcher = AlertDispatcher::new(NullChannel);
//! let outcome = dispatcher.dispatch(&Reading::new(12.0, 2.1, 0));
//! assert!(outcome.delivered);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::time::Duration;

use thiserror::Error;

use scaffguard_core::Reading;

#[cfg(feature = "sms-textbelt")]
pub mod textbelt;

#[cfg(feature = "sms-twilio")]
pub mod twilio;

#[cfg(feature = "email-smtp")]
pub mod smtp;

#[cfg(feature = "whatsapp-http")]
pub mod whatsapp;

#[cfg(any(
    feature = "sms-textbelt",
    feature = "sms-twilio",
    feature = "whatsapp-http"
))]
mod utils;

// Re-export channel types
#[cfg(feature = "sms-textbelt")]
pub use textbelt::{TextbeltChannel, TextbeltConfig};

#[cfg(feature = "sms-twilio")]
pub use twilio::{TwilioChannel, TwilioConfig};

#[cfg(feature = "email-smtp")]
pub use smtp::{SmtpChannel, SmtpConfig};

#[cfg(feature = "whatsapp-http")]
pub use whatsapp::{WhatsAppChannel, WhatsAppConfig};

/// Character ceiling for SMS-class channels
///
/// A single GSM segment. Messages over this are rejected rather than
/// silently truncated, so a garbled alert never reaches the site crew.
pub const SMS_MAX_CHARS: usize = 160;

/// Default network timeout for all channels
///
/// Dispatch blocks the evaluation cycle, so every transport must give up
/// well before the next cycle is due.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors a channel can produce
///
/// All three variants are caught at the dispatcher boundary; none escape
/// to the evaluation cycle.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Network, HTTP or SMTP failure before the provider answered
    #[error("transport failure: {0}")]
    Transport(String),

    /// The provider answered and refused the message
    #[error("channel rejected alert: {0}")]
    Rejected(String),

    /// Missing or invalid credential, destination or endpoint
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result of one dispatch attempt
///
/// Produced once per DANGER evaluation; not retried and not persisted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlertOutcome {
    /// Whether the transport reported success
    pub delivered: bool,
    /// Human-readable failure detail, present iff not delivered
    pub error_detail: Option<String>,
}

impl AlertOutcome {
    /// Successful delivery
    pub fn delivered() -> Self {
        Self {
            delivered: true,
            error_detail: None,
        }
    }

    /// Failed delivery with a human-readable reason
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            delivered: false,
            error_detail: Some(detail.into()),
        }
    }
}

/// A formatted alert ready for a channel
///
/// The body is a fixed template embedding tilt and vibration with their
/// units; channels only ever see the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    body: String,
}

impl AlertMessage {
    /// Build the danger alert for the given levels
    pub fn danger(tilt_deg: f32, vibration: f32) -> Self {
        Self {
            body: format!(
                "ALERT! Scaffold danger. Tilt:{:.1}°, Vib:{:.1}.",
                tilt_deg, vibration
            ),
        }
    }

    /// Build the danger alert for a reading
    pub fn from_reading(reading: &Reading) -> Self {
        Self::danger(reading.tilt_deg, reading.vibration)
    }

    /// Rendered message body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Subject line for channels that carry one (email)
    pub fn subject(&self) -> &'static str {
        "Scaffold DANGER alert"
    }

    /// Message length in characters, as SMS providers count it
    pub fn char_len(&self) -> usize {
        self.body.chars().count()
    }
}

/// A notification transport
///
/// Implementations perform exactly one send attempt per call and surface
/// every failure as an [`AlertError`]; they never panic on transport
/// problems.
pub trait AlertChannel {
    /// Send the message through this channel
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError>;

    /// Channel name for logs and the dashboard
    fn name(&self) -> &'static str;
}

impl<T: AlertChannel + ?Sized> AlertChannel for Box<T> {
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError> {
        (**self).send(message)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Running dispatch counters for the presentation layer
#[derive(Debug, Default, Clone)]
pub struct DispatchStats {
    /// Alerts the transport accepted
    pub sent: u64,
    /// Alerts that failed to send
    pub failed: u64,
    /// Most recent failure detail
    pub last_error: Option<String>,
}

/// Formats and sends danger alerts through one configured channel
///
/// The dispatcher owns its channel for the life of the deployment. It is
/// invoked by the caller only when a cycle classified DANGER and performs
/// exactly one send attempt per invocation.
pub struct AlertDispatcher<C> {
    channel: C,
    stats: DispatchStats,
}

impl<C: AlertChannel> AlertDispatcher<C> {
    /// Wrap a channel
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            stats: DispatchStats::default(),
        }
    }

    /// Send the danger alert for this reading
    ///
    /// Never fails from the caller's point of view: every transport error
    /// is converted into a not-delivered outcome.
    pub fn dispatch(&mut self, reading: &Reading) -> AlertOutcome {
        let message = AlertMessage::from_reading(reading);

        match self.channel.send(&message) {
            Ok(()) => {
                self.stats.sent += 1;
                log::debug!("alert delivered via {}", self.channel.name());
                AlertOutcome::delivered()
            }
            Err(e) => {
                self.stats.failed += 1;
                let detail = e.to_string();
                log::warn!(
                    "alert dispatch via {} failed: {}",
                    self.channel.name(),
                    detail
                );
                self.stats.last_error = Some(detail.clone());
                AlertOutcome::failed(detail)
            }
        }
    }

    /// Name of the wrapped channel
    pub fn channel_name(&self) -> &'static str {
        self.channel.name()
    }

    /// Dispatch counters
    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }
}
