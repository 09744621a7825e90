use crate::messages;
use crate::models::MessageSummary;
use sqlx::PgPool;
use tracing::{Span, info, instrument, warn};

/// Runs one dispatch pass: selects every due message and flips the whole
/// batch from 'scheduled' to 'sent' in a single update.
///
/// Returns a redacted summary for each message the pass picked up. An
/// empty result is a normal outcome, not an error. Any store error on the
/// read or the write aborts the pass; rows not yet flipped stay
/// 'scheduled' and the next pass picks them up again.
#[instrument(skip_all, fields(messages_due = 0))]
pub async fn dispatch_due_messages(db_pool: &PgPool) -> Result<Vec<MessageSummary>, sqlx::Error> {
    info!("Checking for due scheduled messages...");

    let due = messages::get_due_messages(db_pool).await?;

    let messages_due = due.len();
    if messages_due == 0 {
        info!("No scheduled messages to process.");
        return Ok(Vec::new());
    }
    Span::current().record("messages_due", messages_due);
    info!(messages_due, "Found due messages to send.");

    let message_ids = due.iter().map(|m| m.id).collect();
    let updated = messages::mark_messages_sent(db_pool, message_ids).await?;

    if updated != messages_due as u64 {
        warn!(
            messages_due,
            updated, "Some due messages were already picked up by an overlapping run."
        );
    }
    info!(messages_sent = updated, "Dispatch pass complete.");

    Ok(due.iter().map(MessageSummary::from).collect())
}
