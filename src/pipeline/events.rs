//! Ordered event delivery to the presentation layer
//!
//! A single-consumer channel replaces a raw callback: events arrive in the
//! order they were emitted and each is received at most once.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::Serialize;

use crate::consensus::RecognitionEvent;

/// Everything the recognizer reports to its caller
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignEvent {
    Recognized(RecognitionEvent),
    /// Sent exactly once per lesson
    LessonCompleted { target: String },
}

pub type EventReceiver = Receiver<SignEvent>;

/// Sending half owned by the recognizer
#[derive(Default)]
pub struct EventPublisher {
    tx: Option<Sender<SignEvent>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a fresh subscription; any previous receiver is disconnected
    pub fn subscribe(&mut self) -> EventReceiver {
        let (tx, rx) = unbounded();
        self.tx = Some(tx);
        rx
    }

    pub fn publish(&mut self, event: SignEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            log::debug!("event subscriber dropped, unsubscribing");
            self.tx = None;
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.tx.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognized(label: &str) -> SignEvent {
        SignEvent::Recognized(RecognitionEvent {
            label: label.to_string(),
            confidence: 0.9,
        })
    }

    #[test]
    fn test_events_delivered_in_order() {
        let mut publisher = EventPublisher::new();
        let rx = publisher.subscribe();
        publisher.publish(recognized("A"));
        publisher.publish(recognized("B"));
        publisher.publish(SignEvent::LessonCompleted { target: "B".into() });

        let received: Vec<SignEvent> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                recognized("A"),
                recognized("B"),
                SignEvent::LessonCompleted { target: "B".into() },
            ]
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_resubscribe_disconnects_previous() {
        let mut publisher = EventPublisher::new();
        let old = publisher.subscribe();
        let new = publisher.subscribe();
        publisher.publish(recognized("A"));
        assert!(old.try_recv().is_err());
        assert_eq!(new.try_recv().ok(), Some(recognized("A")));
    }

    #[test]
    fn test_dropped_receiver_unsubscribes() {
        let mut publisher = EventPublisher::new();
        drop(publisher.subscribe());
        publisher.publish(recognized("A"));
        assert!(!publisher.has_subscriber());
    }
}
