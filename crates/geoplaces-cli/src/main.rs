mod search;

use clap::{Parser, Subcommand};
use geoplaces_client::PlacesClient;
use geoplaces_core::Position;
use geoplaces_geocoder::{build_places_geocoder, GeocoderOptions};
use tracing_subscriber::EnvFilter;

use crate::search::{FilterArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "geoplaces")]
#[command(about = "Search, geocode and look up places")]
struct Cli {
    #[command(flatten)]
    filters: FilterArgs,

    /// Language tag for results (defaults to GEOPLACES_LANGUAGE)
    #[arg(long, global = true)]
    language: Option<String>,

    /// Maximum number of results to show
    #[arg(long, global = true)]
    max_results: Option<u32>,

    /// Print results as JSON
    #[arg(long, global = true, conflicts_with = "html")]
    json: bool,

    /// Print each result as the markup the search control renders
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Free-text search
    Forward {
        /// Text to search for, e.g. "central park"
        query: String,
    },
    /// Places nearest a position
    Reverse {
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },
    /// Look up a place by id
    Place {
        /// Place id as returned by a search or suggestion
        id: String,
    },
    /// Type-ahead suggestions
    Suggest {
        /// Partial text, e.g. "centr"
        query: String,
    },
    /// List the accepted category filters
    Categories,
    /// List the accepted country filters
    Countries,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.html {
            OutputFormat::Html
        } else {
            OutputFormat::Text
        }
    }
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let format = cli.output_format();

    match cli.command {
        Commands::Categories => {
            init_tracing("warn")?;
            return search::print_categories(format);
        }
        Commands::Countries => {
            init_tracing("warn")?;
            return search::print_countries(format);
        }
        _ => {}
    }

    let config = geoplaces_core::load_places_config_from_env()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    let client = PlacesClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build places client: {e}"))?;
    let options = GeocoderOptions {
        enable_all: true,
        language: Some(
            cli.language
                .clone()
                .unwrap_or_else(|| config.language.clone()),
        ),
        ..GeocoderOptions::default()
    };
    let mut geocoder = build_places_geocoder(client, &options)?;
    search::apply_filters(&mut geocoder, &cli.filters)?;

    let limit = cli.max_results;
    match cli.command {
        Commands::Forward { query } => search::run_forward(&geocoder, &query, limit, format).await,
        Commands::Reverse { lon, lat } => {
            let position = Position::try_new(lon, lat)?;
            search::run_reverse(&geocoder, position, limit, format).await
        }
        Commands::Place { id } => search::run_place(&geocoder, &id, format).await,
        Commands::Suggest { query } => search::run_suggest(&geocoder, &query, limit, format).await,
        Commands::Categories | Commands::Countries => Ok(()),
    }
}
