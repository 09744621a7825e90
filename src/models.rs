use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from portal.messages. Only the 'scheduled' -> 'sent' transition
/// is ever applied here; every other status belongs to the portal UI.
#[allow(dead_code)]
#[derive(Debug, FromRow)]
pub struct ScheduledMessage {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub subject: String,
    pub body: String,
    pub message_type: String,
    pub status: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// What we report back per dispatched message. The body stays out of
/// responses and logs.
#[derive(Debug, Clone, Serialize)]
pub struct MessageSummary {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub subject: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub message_type: String,
}

impl From<&ScheduledMessage> for MessageSummary {
    fn from(message: &ScheduledMessage) -> Self {
        MessageSummary {
            id: message.id,
            recipient_id: message.recipient_id,
            subject: message.subject.clone(),
            scheduled_for: message.scheduled_for,
            message_type: message.message_type.clone(),
        }
    }
}
