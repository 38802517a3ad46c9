//! Shade Finder - pick any color from your photo and get AI-matched
//! lipstick shades, self-hosted.

#![allow(dead_code)]

mod api;
mod config;
mod core;
mod models;
mod plugins;
mod stores;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::plugins::{GeminiProvider, ShadeProvider};
use crate::stores::SessionStore;

/// Shade Finder - self-hosted lipstick shade matcher
#[derive(Parser, Debug)]
#[command(name = "shadefinder")]
#[command(author = "shadefinder")]
#[command(version = "1.0.0")]
#[command(about = "Pick any color from your photo and get AI-matched lipstick shades")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = config::DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to the static web client
    #[arg(long)]
    client: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };

    // quiet the per-connection noise from the web stack unless debugging
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},actix_server=warn,hyper=warn,reqwest=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Shade Finder v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = config::ServerSettings::new(args.host, args.port, args.client);

    if !settings.client_dir.join("index.html").exists() {
        warn!(
            "No web client at {:?}; the API will run without the UI",
            settings.client_dir
        );
    }

    start_server(settings).await
}

async fn start_server(settings: config::ServerSettings) -> Result<()> {
    use actix_cors::Cors;
    use actix_web::{middleware, web, App, HttpServer};

    let store = web::Data::new(SessionStore::new());
    let provider: Arc<dyn ShadeProvider> = Arc::new(GeminiProvider::new());
    let provider = web::Data::from(provider);

    let addr = settings.bind_addr();
    let client_dir = settings.client_dir.clone();

    info!("Server listening on http://{}", addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(store.clone())
            .app_data(provider.clone())
            .configure(api::configure)
            .service(actix_files::Files::new("/", client_dir.clone()).index_file("index.html"))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
