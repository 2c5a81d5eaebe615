//! Live check-in notification channel
//!
//! Fire-and-forget broadcast to every connected admin dashboard. There is
//! no delivery guarantee and no retry; a dashboard that is not connected
//! simply misses the event.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::visitor::Visitor;

/// Event pushed to admin dashboards when a visitor checks in
#[derive(Debug, Clone, Serialize)]
pub struct CheckInNotification {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub visitor: Visitor,
    pub badge_id: String,
    pub purpose: Option<String>,
    /// False for first-time visitors
    pub returning: bool,
    pub checked_in_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<CheckInNotification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe a new dashboard connection
    pub fn subscribe(&self) -> broadcast::Receiver<CheckInNotification> {
        self.sender.subscribe()
    }

    /// Broadcast a check-in to all connected dashboards
    pub fn broadcast_check_in(&self, visitor: &Visitor, purpose: Option<&str>, returning: bool) {
        if self.sender.receiver_count() == 0 {
            tracing::debug!("No dashboard connected, dropping check-in notification");
            return;
        }

        let event = CheckInNotification {
            kind: "check_in",
            badge_id: visitor.badge_id(),
            visitor: visitor.clone(),
            purpose: purpose.map(|p| p.to_string()),
            returning,
            checked_in_at: Utc::now(),
        };

        if let Err(e) = self.sender.send(event) {
            tracing::debug!("Failed to broadcast check-in notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::visitor::Sex;

    fn visitor() -> Visitor {
        Visitor {
            id: 7,
            full_name: "Jean Mukendi".to_string(),
            year_of_birth: 1990,
            sex: Some(Sex::Male),
            municipality: None,
            email: None,
            phone_number: "0812345678".to_string(),
            verified: false,
            visit_count: 1,
            deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let notifier = Notifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.broadcast_check_in(&visitor(), Some("Meeting"), false);

        let event = rx.recv().await.expect("event");
        assert_eq!(event.kind, "check_in");
        assert_eq!(event.badge_id, "V-000007");
        assert_eq!(event.purpose.as_deref(), Some("Meeting"));
        assert!(!event.returning);
    }

    #[test]
    fn test_broadcast_without_subscribers_is_silent() {
        let notifier = Notifier::new(8);
        // Must not panic or error
        notifier.broadcast_check_in(&visitor(), None, true);
    }
}
