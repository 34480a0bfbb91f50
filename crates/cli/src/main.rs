//! Cartwheel CLI - Browse a Shopify catalog and drive a cart.
//!
//! # Usage
//!
//! ```bash
//! # Look up a product
//! cartwheel product classic-tee
//!
//! # Search the catalog
//! cartwheel products --search shirt --sort price-asc
//!
//! # Add to the cart (creates one on first use)
//! cartwheel cart add gid://shopify/ProductVariant/1 --quantity 2
//!
//! # Change a line's quantity (0 removes it)
//! cartwheel cart update gid://shopify/CartLine/1 3
//! ```
//!
//! The cart id is kept in a cookie file between runs (`--cookie-jar`).
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain (e.g., `my-store.myshopify.com`)
//! - `SHOPIFY_STOREFRONT_PUBLIC_TOKEN` / `SHOPIFY_STOREFRONT_PRIVATE_TOKEN`
//! - `SENTRY_DSN` - Optional error reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use cartwheel_storefront::catalog::SortOrder;
use cartwheel_storefront::config::StorefrontConfig;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel storefront tools")]
struct Cli {
    /// File holding the cart identity cookies
    #[arg(long, env = "CARTWHEEL_COOKIE_JAR", default_value = ".cartwheel-cookies")]
    cookie_jar: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a product by handle
    Product {
        /// Product handle
        slug: String,
    },
    /// Search products
    Products {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Collection id to list
        #[arg(short, long)]
        category: Option<String>,

        /// Vendor name
        #[arg(short, long)]
        brand: Option<String>,

        /// Sort order (`trending-desc`, `price-asc`, `price-desc`, `latest-desc`)
        #[arg(long)]
        sort: Option<SortOrder>,
    },
    /// List categories
    Categories {
        /// How many to list
        #[arg(short = 'n', long, default_value_t = 250)]
        first: i64,
    },
    /// List brands
    Brands,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add a variant to the cart
    Add {
        /// Product variant id
        variant_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Set a line's quantity
    Update {
        /// Cart line id
        line_id: String,

        /// New quantity; 0 removes the line
        quantity: f64,
    },
    /// Remove a line
    Remove {
        /// Cart line id
        line_id: String,
    },
    /// Forget the current cart
    Forget,
}

/// Initialize Sentry error tracking.
///
/// Returns a guard that must be kept alive for the duration of the process.
/// Returns `None` if `SENTRY_DSN` is not configured.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = StorefrontConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_storefront=info,cartwheel_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(CliError::from(e)),
    };

    if let Err(e) = result {
        sentry::capture_error(&e);
        tracing::error!("Command failed: {e}");
        // process::exit skips destructors, so flush Sentry first
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let commerce = commands::connect(config, cli.cookie_jar);

    match cli.command {
        Commands::Product { slug } => commands::catalog::product(&commerce, &slug).await,
        Commands::Products {
            search,
            category,
            brand,
            sort,
        } => commands::catalog::products(&commerce, search, category, brand, sort).await,
        Commands::Categories { first } => commands::catalog::categories(&commerce, first).await,
        Commands::Brands => commands::catalog::brands(&commerce).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&commerce).await,
            CartAction::Add {
                variant_id,
                quantity,
            } => commands::cart::add(&commerce, variant_id, quantity).await,
            CartAction::Update { line_id, quantity } => {
                commands::cart::update(&commerce, line_id, quantity).await
            }
            CartAction::Remove { line_id } => commands::cart::remove(&commerce, line_id).await,
            CartAction::Forget => commands::cart::forget(&commerce),
        },
    }
}
