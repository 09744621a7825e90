use crate::config::Config;
use crate::models::ScheduledMessage;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, query_as};
use uuid::Uuid;

/// Creates and returns a new database connection pool.
pub async fn setup_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url())
        .await
}

/// Fetches every message that is due: status 'scheduled' with a
/// scheduled_for at or before the current time. A null scheduled_for
/// is never due.
pub async fn get_due_messages(db_pool: &PgPool) -> Result<Vec<ScheduledMessage>, sqlx::Error> {
    let messages = query_as::<_, ScheduledMessage>(
        r#"
        SELECT id, recipient_id, subject, body, message_type, status, scheduled_for, sent_at, created_at
        FROM portal.messages
        WHERE status = 'scheduled'
            AND scheduled_for IS NOT NULL
            AND scheduled_for <= NOW()
        ORDER BY scheduled_for
        "#,
    )
        .fetch_all(db_pool)
        .await?;

    Ok(messages)
}

/// Marks the given messages as sent, stamping sent_at with the dispatch
/// time. The status guard means a row already taken by an overlapping
/// run matches zero times and is left alone.
///
/// Returns the number of rows actually updated.
pub async fn mark_messages_sent(
    db_pool: &PgPool,
    message_ids: Vec<Uuid>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE portal.messages
        SET status = 'sent', sent_at = NOW()
        WHERE id = Any($1)
            AND status = 'scheduled'
        "#,
    )
        .bind(message_ids)
        .execute(db_pool)
        .await?;

    Ok(result.rows_affected())
}
