mod config;
mod dispatcher;
mod handlers;
mod messages;
mod models;

use crate::config::Config;
use crate::dispatcher::dispatch_due_messages;
use crate::messages::setup_db_pool;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use sqlx::PgPool;
use std::time::Duration;
use tokio::time;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[get("/health")]
async fn health_check() -> impl Responder {
    // Just return a 200 OK response
    HttpResponse::Ok().body("OK")
}

// Graceful shutdown signal future
async fn shutdown_signal() {
    use tokio::signal;
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let mut term_signal = signal::unix::signal(signal::unix::SignalKind::terminate())
        .expect("Failed to install SIGTERM handler");
    #[cfg(unix)]
    let terminate = term_signal.recv();
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received. Exiting dispatch timer.");
}

/// Stands in for the platform's time-based trigger: runs one dispatch
/// pass per interval until shutdown. The cadence comes from
/// DISPATCH_INTERVAL_MS, not a hidden cron string.
async fn run_dispatch_timer(db_pool: PgPool, interval_ms: u64) {
    info!(interval_ms, "Starting scheduled message dispatch timer...");
    let mut interval = time::interval(Duration::from_millis(interval_ms));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let db_pool_clone = db_pool.clone();

                tokio::spawn(async move {
                    if let Err(e) = dispatch_due_messages(&db_pool_clone).await {
                        error!("Error during scheduled message dispatch: {}", e);
                    }
                });
            },
            _ = shutdown_signal() => {
                break;
            }
        }
    }
    info!("Dispatch timer shutting down.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Loading configuration...");
    let config = Config::load().expect("Failed to load configuration");
    info!("Configuration loaded.");

    // The guard has to stay alive for the lifetime of the process.
    let _sentry_guard = config.sentry_dsn.as_deref().map(sentry::init);

    info!("Connecting to database...");
    let db_pool = setup_db_pool(&config)
        .await
        .expect("failed to create database connection.");
    info!("Database connection established.");

    let timer_pool = db_pool.clone();
    let interval_ms = config.dispatch_interval_ms;
    let timer_handle = tokio::spawn(async move {
        run_dispatch_timer(timer_pool, interval_ms).await;
    });

    let server_pool = db_pool.clone();
    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .service(health_check)
            .configure(handlers::configure)
    })
    .bind(("0.0.0.0", config.http_port))?
    .run();

    println!("HTTP server running on http://0.0.0.0:{}", config.http_port);

    // Keep both tasks running
    // This will error out if either the server or the dispatch timer fails
    let _ = tokio::try_join!(
        async { http_server.await },
        async { timer_handle.await.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e)) }
    )?;

    Ok(())
}
