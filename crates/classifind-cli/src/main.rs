mod output;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use classifind_catalog::CatalogClient;
use classifind_core::{AppConfig, GeoBounds, GeoPoint};
use classifind_search::{
    parse_bbox, FixedLocator, GeoScope, SearchEngine, SearchError, SearchEvent, SearchRequest,
    SearchSettings,
};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "classifind")]
#[command(about = "Search marketplace listings by text, place, or map region")]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Free-text search within a country or map area
    Search {
        /// Query words (e.g. "apto 2 quartos")
        #[arg(required = true)]
        text: Vec<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,
    },
    /// Listings around a street address or place name
    Address {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Listings around a fixed position, as a GPS search would see it
    Near {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Listings inside a map rectangle
    Region {
        /// Rectangle as "minLat,maxLat,minLng,maxLng"
        #[arg(long, allow_hyphen_values = true)]
        bbox: String,
    },
    /// All listings in one country
    Country {
        /// ISO alpha-2 code (e.g. BR)
        code: String,
    },
    /// All listings in one category
    Category {
        name: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Countries that currently have listings
    Countries,
}

#[derive(Debug, Args)]
struct ScopeArgs {
    /// ISO alpha-2 country code; defaults to CLASSIFIND_DEFAULT_COUNTRY
    #[arg(long, conflicts_with = "bbox")]
    country: Option<String>,
    /// Map rectangle as "minLat,maxLat,minLng,maxLng"
    #[arg(long, allow_hyphen_values = true)]
    bbox: Option<String>,
}

impl ScopeArgs {
    fn resolve(&self, config: &AppConfig) -> anyhow::Result<GeoScope> {
        if let Some(bbox) = &self.bbox {
            return bbox_arg(bbox).map(GeoScope::Bbox);
        }
        let code = self.country.as_deref().unwrap_or(&config.default_country);
        GeoScope::country(code).with_context(|| format!("invalid country code '{code}'"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = classifind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, catalog = %config.catalog_base_url, "starting");

    let client = CatalogClient::new(
        &config.catalog_base_url,
        config.http_timeout_secs,
        &config.user_agent,
        config.catalog_api_key.as_deref(),
    )?;
    let engine = SearchEngine::new(client, SearchSettings::from_app_config(&config));

    tokio::spawn(log_events(engine.subscribe()));

    match cli.command {
        Commands::Search {
            text,
            scope,
            category,
        } => {
            let request = SearchRequest {
                text: Some(text.join(" ")),
                scope: scope.resolve(&config)?,
                category,
            };
            let outcome = engine.run_search(request).await;
            report(outcome, cli.json, output::print_result)
        }
        Commands::Address { text } => {
            let outcome = engine.run_address_search(&text.join(" ")).await;
            report(outcome, cli.json, output::print_result)
        }
        Commands::Near { lat, lng } => {
            let point = GeoPoint::new(lat, lng).context("--lat and --lng must be finite")?;
            let outcome = engine.run_gps_search(&FixedLocator::new(point)).await;
            report(outcome, cli.json, output::print_result)
        }
        Commands::Region { bbox } => {
            let outcome = engine.run_region_search(bbox_arg(&bbox)?).await;
            report(outcome, cli.json, |region| output::print_result(&region.result))
        }
        Commands::Country { code } => {
            let outcome = engine.run_country_filter(&code).await;
            report(outcome, cli.json, output::print_result)
        }
        Commands::Category { name, scope } => {
            let scope = if scope.country.is_some() || scope.bbox.is_some() {
                Some(scope.resolve(&config)?)
            } else {
                None
            };
            let outcome = engine.run_category_filter(&name, scope).await;
            report(outcome, cli.json, output::print_result)
        }
        Commands::Countries => {
            let outcome = engine.list_countries().await;
            report(outcome, cli.json, |countries| output::print_countries(countries))
        }
    }
}

/// Prints a successful outcome; an empty one is reported but not an error.
fn report<T, F>(outcome: Result<T, SearchError>, json: bool, print: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match outcome {
        Ok(value) if json => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Ok(value) => {
            print(&value);
            Ok(())
        }
        Err(e @ SearchError::NoResults(_)) => {
            println!("{}", e.user_message());
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("search failed")),
    }
}

fn bbox_arg(bbox: &str) -> anyhow::Result<GeoBounds> {
    parse_bbox(bbox)
        .with_context(|| format!("invalid --bbox '{bbox}', expected minLat,maxLat,minLng,maxLng"))
}

/// Logs engine events until the engine is dropped. Returns how many were
/// logged.
async fn log_events(mut events: broadcast::Receiver<SearchEvent>) -> usize {
    let mut logged = 0;
    loop {
        match events.recv().await {
            Ok(event) => {
                log_event(&event);
                logged += 1;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "search event log fell behind");
            }
            Err(RecvError::Closed) => return logged,
        }
    }
}

fn log_event(event: &SearchEvent) {
    let generation = event.generation();
    let kind = event.kind();
    match event {
        SearchEvent::Started { .. } => {
            tracing::debug!(generation, %kind, "search event: started");
        }
        SearchEvent::Completed { label, count, .. } => {
            tracing::debug!(generation, %kind, label = %label, count, "search event: completed");
        }
        SearchEvent::Empty { label, .. } => {
            tracing::debug!(generation, %kind, label = %label, "search event: empty");
        }
        SearchEvent::Failed { message, .. } => {
            tracing::debug!(generation, %kind, message = %message, "search event: failed");
        }
        SearchEvent::Discarded { .. } => {
            tracing::debug!(generation, %kind, "search event: discarded");
        }
    }
}
