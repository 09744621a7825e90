use actix_web::http::Method;
use actix_web::{HttpResponse, HttpResponseBuilder, web};
use serde::Serialize;
use sqlx::PgPool;
use tracing::error;

use crate::dispatcher::dispatch_due_messages;
use crate::models::MessageSummary;

#[derive(Debug, Serialize)]
struct DispatchResponse {
    success: bool,
    message: String,
    #[serde(rename = "processedCount")]
    processed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<Vec<MessageSummary>>,
}

#[derive(Debug, Serialize)]
struct DispatchFailure {
    success: bool,
    error: String,
    details: &'static str,
}

// Permissive CORS on every dispatch response so the browser-based admin
// portal can trigger a pass directly.
fn cors(builder: &mut HttpResponseBuilder) -> &mut HttpResponseBuilder {
    builder
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .insert_header((
            "Access-Control-Allow-Headers",
            "authorization, content-type",
        ))
}

async fn preflight() -> HttpResponse {
    cors(&mut HttpResponse::Ok()).finish()
}

/// Runs one dispatch pass. The request method and body are irrelevant to
/// the logic; the route exists so an external scheduler (or an operator)
/// can trigger a pass over HTTP.
async fn send_scheduled_messages(db_pool: web::Data<PgPool>) -> HttpResponse {
    match dispatch_due_messages(&db_pool).await {
        Ok(processed) if processed.is_empty() => {
            cors(&mut HttpResponse::Ok()).json(DispatchResponse {
                success: true,
                message: "No scheduled messages to process".to_string(),
                processed_count: 0,
                messages: None,
            })
        }
        Ok(processed) => cors(&mut HttpResponse::Ok()).json(DispatchResponse {
            success: true,
            message: format!("Successfully sent {} scheduled messages", processed.len()),
            processed_count: processed.len(),
            messages: Some(processed),
        }),
        Err(e) => {
            error!("Scheduled message dispatch failed: {}", e);
            cors(&mut HttpResponse::InternalServerError()).json(DispatchFailure {
                success: false,
                error: e.to_string(),
                details: "Check function logs for more information",
            })
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/send-scheduled-messages",
        web::method(Method::OPTIONS).to(preflight),
    )
    .route(
        "/send-scheduled-messages",
        web::route().to(send_scheduled_messages),
    );
}
