//! Structured log events emitted by the runtime.

use std::sync::{Arc, Mutex};

use folio_runtime::simulator::SessionSimulator;
use folio_runtime::sound::SoundError;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Clone, Default)]
struct Capture {
    messages: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}

fn captured(run: impl FnOnce()) -> Vec<String> {
    let capture = Capture::default();
    let subscriber = Registry::default().with(capture.clone());
    tracing::subscriber::with_default(subscriber, run);
    let messages = capture.messages.lock().unwrap();
    messages.clone()
}

#[test]
fn transitions_are_logged() {
    let messages = captured(|| {
        let mut sim = SessionSimulator::new();
        sim.start();
        sim.press_enter();
    });
    assert!(messages.iter().any(|m| m == "session started"));
    assert!(messages.iter().any(|m| m == "scene transition"));
}

#[test]
fn swallowed_sound_failures_are_logged() {
    let messages = captured(|| {
        let mut sim = SessionSimulator::with_failing_sound(SoundError::Unavailable);
        sim.start();
        sim.press_enter();
    });
    let failures = messages
        .iter()
        .filter(|m| *m == "sound playback failed")
        .count();
    assert_eq!(failures, 2);
}
