// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, collaborators and optional database, then start the HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use db::{GuideStore, NoopGuideStore, PgGuideStore};
use dotenv::dotenv;
use handlers::AppState;
use services::{
    ChatCompletionClient, DisabledMailer, ExtractionBackend, FirecrawlClient, GoogleMapsClient,
    Mailer, SendGridMailer,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting travel-guide service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Guide history store (optional)
    let store: Arc<dyn GuideStore> = if config.database_url.is_empty() {
        Arc::new(NoopGuideStore)
    } else {
        let pool = match config::init_db_pool(&config).await {
            Ok(pool) => pool,
            Err(e) => {
                log::error!("Failed to connect to database: {}", e);
                std::process::exit(1);
            }
        };
        let store = PgGuideStore::new(pool);
        if let Err(e) = store.ensure_schema().await {
            log::error!("Failed to prepare guide table: {}", e);
            std::process::exit(1);
        }
        Arc::new(store)
    };

    // 5. External collaborators
    let maps = Arc::new(GoogleMapsClient::new(config.google_maps_api_key.clone()));
    let completion = Arc::new(ChatCompletionClient::new(
        config.completion_api_key.clone(),
        config.completion_base_url.clone(),
        config.completion_model.clone(),
        config.completion_temperature,
    ));

    let extraction: Option<Arc<dyn ExtractionBackend>> =
        match FirecrawlClient::new(config.firecrawl_api_key.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                log::warn!("Safety alerts unavailable: {}", e);
                None
            }
        };

    let mailer: Arc<dyn Mailer> =
        if config.sendgrid_api_key.is_empty() || config.mail_default_sender.is_empty() {
            Arc::new(DisabledMailer)
        } else {
            Arc::new(SendGridMailer::new(
                config.sendgrid_api_key.clone(),
                config.mail_default_sender.clone(),
                config.mail_sender_name.clone(),
            ))
        };

    let state = web::Data::new(AppState::new(
        maps,
        completion,
        extraction,
        mailer,
        store,
        Duration::from_millis(config.safety_query_interval_ms),
    ));

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state
            .app_data(state.clone())
            .app_data(handlers::json_config())
            .app_data(handlers::query_config())
            // Middleware
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
            .configure(handlers::routes_config)
            .configure(handlers::guides_config)
            .configure(handlers::safety_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
