//! Event channel for session subscribers
//!
//! The session is the single producer. Any number of subscribers (console,
//! tests, loggers) receive every event through a broadcast channel.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::core::SessionEvent;

/// Default buffer size for the event broadcast channel
pub const EVENT_CHANNEL_SIZE: usize = 256;

/// Sender half of the event channel (held by the session)
pub type EventSender = broadcast::Sender<SessionEvent>;

/// Receiver half of the event channel (held by subscribers)
pub type EventReceiver = broadcast::Receiver<SessionEvent>;

/// Create a new event broadcast channel
///
/// Returns the sender. Receivers are created by calling `sender.subscribe()`.
pub fn create_event_channel() -> EventSender {
    let (tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
    tx
}

/// Collect every event currently buffered for a receiver
///
/// A lagging receiver skips the overwritten events and keeps the buffered tail.
pub fn drain_events(rx: &mut EventReceiver) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("[Events] Subscriber lagged, skipped {} events", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_broadcast() {
        let tx = create_event_channel();
        let mut rx1 = tx.subscribe();
        let mut rx2 = tx.subscribe();

        tx.send(SessionEvent::Error("boom".into())).unwrap();

        assert!(matches!(rx1.recv().await.unwrap(), SessionEvent::Error(_)));
        assert_eq!(drain_events(&mut rx2).len(), 1);
        assert!(drain_events(&mut rx2).is_empty());
    }

    #[test]
    fn test_drain_after_lag_keeps_tail() {
        let tx = create_event_channel();
        let mut rx = tx.subscribe();

        for i in 0..EVENT_CHANNEL_SIZE + 44 {
            tx.send(SessionEvent::Error(format!("event {}", i))).unwrap();
        }

        let events = drain_events(&mut rx);
        assert_eq!(events.len(), EVENT_CHANNEL_SIZE);
        assert!(matches!(&events[0], SessionEvent::Error(msg) if msg == "event 44"));
        assert!(matches!(
            events.last(),
            Some(SessionEvent::Error(msg)) if *msg == format!("event {}", EVENT_CHANNEL_SIZE + 43)
        ));
        assert!(drain_events(&mut rx).is_empty());
    }
}
