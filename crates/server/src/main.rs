//! Pokedex Server
//!
//! Axum server exposing the catalog resolvers as a JSON API, plus one-shot
//! CLI commands for the same operations.

mod api;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pokedex_core::domain::EntityKey;
use pokedex_core::resolve::DEFAULT_PAGE_SIZE;
use pokedex_core::Resolver;
use serde::Serialize;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::AppState;
use settings::PersistedConfig;

#[derive(Parser, Clone)]
#[command(author, version, about = "Pokedex - catalog aggregation server")]
struct Args {
    /// JSON file with catalog overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Catalog base endpoint (overrides config and POKEDEX_CATALOG_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Maximum concurrent detail fetches
    #[arg(long, global = true)]
    max_in_flight: Option<usize>,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the HTTP server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
    /// Print one page of the catalog
    List {
        #[arg(long, default_value = "0")]
        offset: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
    },
    /// Print full detail for an id or name
    Show { key: String },
    /// Print members of a type (e.g. fire)
    Type { category: String },
    /// Search by id or name; prints null when nothing matches
    Search { query: String },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_core=info,pokedex_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_server(resolver: Resolver, port: u16) -> Result<()> {
    let state = Arc::new(AppState { resolver });
    let app = api::app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!(%addr, "Pokedex server listening");
    println!("🚀 Pokedex Server running at http://{}", addr);
    println!("   Health:  /health");
    println!("   List:    /api/v1/pokemon?offset=&limit=");
    println!("   Detail:  /api/v1/pokemon/{{id|name}}");
    println!("   Types:   /api/v1/types, /api/v1/types/{{type}}");
    println!("   Search:  /api/v1/search?q=");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let overrides = PersistedConfig {
        base_url: args.base_url.clone(),
        max_in_flight: args.max_in_flight,
        ..Default::default()
    };
    let config = settings::resolve_config(args.config.as_deref(), overrides).await?;
    tracing::debug!(base_url = %config.base_url, "Catalog configured");

    let resolver = Resolver::new(&config).context("Failed to create catalog client")?;

    match args.command {
        None => run_server(resolver, 3001).await,
        Some(CliCommand::Serve { port }) => run_server(resolver, port).await,
        Some(CliCommand::List { offset, limit }) => {
            print_json(&resolver.fetch_page(offset, limit).await?)
        }
        Some(CliCommand::Show { key }) => {
            let key = EntityKey::parse(&key).context("Key must not be blank")?;
            print_json(&resolver.fetch_detail(&key).await?)
        }
        Some(CliCommand::Type { category }) => {
            print_json(&resolver.fetch_by_category(&category).await?)
        }
        Some(CliCommand::Search { query }) => print_json(&resolver.fetch_by_key(&query).await?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    init_tracing();

    run(Args::parse()).await
}
