//! Integration tests for the evaluate-then-dispatch cycle
//!
//! Drives full cycles the way the monitor does (classify a reading, and
//! only on DANGER hand it to the dispatcher) against a recording stub
//! channel, so both the dispatch gating and the outcome conversion are
//! observable.

use scaffguard_alerts::{
    AlertChannel, AlertDispatcher, AlertError, AlertMessage, AlertOutcome,
};
use scaffguard_core::{Reading, SafetyStatus, StatusEvaluator};

/// Stub transport that records every message it is asked to send
#[derive(Default)]
struct RecordingChannel {
    sent: Vec<String>,
    fail_next: Option<AlertError>,
}

impl AlertChannel for RecordingChannel {
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError> {
        self.sent.push(message.body().to_string());
        match self.fail_next.take() {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    fn name(&self) -> &'static str {
        "recording-stub"
    }
}

/// One monitor cycle: evaluate, dispatch iff DANGER
fn run_cycle(
    evaluator: &StatusEvaluator,
    dispatcher: &mut AlertDispatcher<RecordingChannel>,
    reading: Reading,
) -> (SafetyStatus, Option<AlertOutcome>) {
    let status = evaluator.evaluate_reading(&reading);

    if status.is_danger() {
        let outcome = dispatcher.dispatch(&reading);
        (status, Some(outcome))
    } else {
        (status, None)
    }
}

#[test]
fn safe_reading_makes_no_dispatch_call() {
    let evaluator = StatusEvaluator::default();
    let mut dispatcher = AlertDispatcher::new(RecordingChannel::default());

    let (status, outcome) = run_cycle(&evaluator, &mut dispatcher, Reading::new(3.0, 1.0, 0));

    assert_eq!(status, SafetyStatus::Safe);
    assert!(outcome.is_none());
    assert_eq!(dispatcher.stats().sent + dispatcher.stats().failed, 0);
}

#[test]
fn warning_reading_makes_no_dispatch_call() {
    let evaluator = StatusEvaluator::default();
    let mut dispatcher = AlertDispatcher::new(RecordingChannel::default());

    let (status, outcome) = run_cycle(&evaluator, &mut dispatcher, Reading::new(7.5, 1.0, 0));

    assert_eq!(status, SafetyStatus::Warning);
    assert!(outcome.is_none());
    assert_eq!(dispatcher.stats().sent + dispatcher.stats().failed, 0);
}

#[test]
fn danger_reading_dispatches_exactly_once_with_levels_in_message() {
    let evaluator = StatusEvaluator::default();
    let mut dispatcher = AlertDispatcher::new(RecordingChannel::default());

    let (status, outcome) = run_cycle(&evaluator, &mut dispatcher, Reading::new(12.0, 2.1, 0));

    assert_eq!(status, SafetyStatus::Danger);
    let outcome = outcome.expect("danger cycle must dispatch");
    assert!(outcome.delivered);

    assert_eq!(dispatcher.stats().sent, 1);
    assert_eq!(dispatcher.stats().failed, 0);
}

#[test]
fn dispatched_message_embeds_both_levels() {
    let mut channel = RecordingChannel::default();
    let reading = Reading::new(12.0, 2.1, 0);

    channel
        .send(&AlertMessage::from_reading(&reading))
        .unwrap();

    assert_eq!(channel.sent.len(), 1);
    let body = &channel.sent[0];
    assert!(body.contains("12.0"), "message was: {body}");
    assert!(body.contains("2.1"), "message was: {body}");
}

#[test]
fn outcome_mirrors_stub_transport_failure() {
    let evaluator = StatusEvaluator::default();
    let mut dispatcher = AlertDispatcher::new(RecordingChannel {
        sent: Vec::new(),
        fail_next: Some(AlertError::Transport("simulated network error".into())),
    });

    let (_, outcome) = run_cycle(&evaluator, &mut dispatcher, Reading::new(12.0, 2.1, 0));

    let outcome = outcome.expect("danger cycle must dispatch");
    assert!(!outcome.delivered);
    let detail = outcome.error_detail.expect("failed outcome carries detail");
    assert!(detail.contains("simulated network error"));
}

#[test]
fn repeated_danger_cycles_each_dispatch_again() {
    // No cooldown or de-duplication: back-to-back danger cycles each send
    let evaluator = StatusEvaluator::default();
    let mut dispatcher = AlertDispatcher::new(RecordingChannel::default());

    for i in 0..3 {
        let reading = Reading::new(12.0, 2.1, i * 5000);
        let (_, outcome) = run_cycle(&evaluator, &mut dispatcher, reading);
        assert!(outcome.expect("danger cycle must dispatch").delivered);
    }

    assert_eq!(dispatcher.stats().sent, 3);
}

#[test]
fn cycle_survives_dispatch_failure() {
    // A failed dispatch never poisons the next cycle
    let evaluator = StatusEvaluator::default();
    let mut dispatcher = AlertDispatcher::new(RecordingChannel {
        sent: Vec::new(),
        fail_next: Some(AlertError::Rejected("quota exceeded".into())),
    });

    let (_, first) = run_cycle(&evaluator, &mut dispatcher, Reading::new(12.0, 2.1, 0));
    assert!(!first.expect("danger cycle must dispatch").delivered);

    let (_, second) = run_cycle(&evaluator, &mut dispatcher, Reading::new(12.0, 2.1, 5000));
    assert!(second.expect("danger cycle must dispatch").delivered);

    assert_eq!(dispatcher.stats().failed, 1);
    assert_eq!(dispatcher.stats().sent, 1);
    assert_eq!(
        dispatcher.stats().last_error.as_deref(),
        Some("channel rejected alert: quota exceeded")
    );
}
