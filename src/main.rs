use clap::{Args, Parser, Subcommand};
use hotel_storefront::application::checkout::CheckoutSessionController;
use hotel_storefront::application::filter::ListingFilterEngine;
use hotel_storefront::config::{CheckoutConfig, DEFAULT_BACKEND_URL};
use hotel_storefront::domain::checkout::{BookingReference, CheckoutSessionState};
use hotel_storefront::domain::listing::{
    FilterSpec, ListingRecord, RatingRounding, SortOrder, MAX_STAR_RATING,
};
use hotel_storefront::domain::ports::{CheckoutTransportRef, CredentialProviderRef};
use hotel_storefront::infrastructure::credentials::StaticTokenProvider;
use hotel_storefront::infrastructure::http::HttpCheckoutTransport;
use hotel_storefront::interfaces::csv::listing_reader::ListingReader;
use hotel_storefront::interfaces::csv::listing_writer::ListingWriter;
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storefront", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter and sort a listings CSV, writing the result to stdout
    Filter(FilterArgs),
    /// Count listings per featured destination tab
    Locations {
        /// Input listings CSV file
        input: PathBuf,
    },
    /// Create a hosted checkout session for a booking
    Checkout(CheckoutArgs),
}

#[derive(Args)]
struct FilterArgs {
    /// Input listings CSV file
    input: PathBuf,

    /// Location substring, or ALL
    #[arg(long, default_value = "ALL")]
    location: String,

    #[arg(long, default_value_t = Decimal::ZERO)]
    min_price: Decimal,

    #[arg(long)]
    max_price: Option<Decimal>,

    /// Minimum rounded star rating, 0 disables the filter
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=MAX_STAR_RATING as i64))]
    min_rating: u8,

    /// default, asc or desc
    #[arg(long, default_value = "default")]
    sort: SortOrder,

    /// Round ratings half-to-even instead of half-up
    #[arg(long)]
    half_even: bool,

    /// 1-based page to print
    #[arg(long)]
    page: Option<usize>,

    #[arg(long, default_value_t = 20)]
    page_size: usize,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    booking_id: String,

    /// Base URL of the booking backend
    #[arg(long, env = "STOREFRONT_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// Bearer token of the signed-in user
    #[arg(long, env = "STOREFRONT_AUTH_TOKEN", hide_env_values = true)]
    auth_token: String,

    /// Give up on the payment service after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Filter(args) => run_filter(args),
        Command::Locations { input } => run_locations(input),
        Command::Checkout(args) => run_checkout(args).await,
    }
}

fn read_listings(input: PathBuf) -> Result<Vec<ListingRecord>> {
    let file = File::open(input).into_diagnostic()?;
    let reader = ListingReader::new(file);
    let mut listings = Vec::new();
    for listing in reader.listings() {
        match listing {
            Ok(listing) => listings.push(listing),
            Err(e) => eprintln!("Error reading listing: {}", e),
        }
    }
    Ok(listings)
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let listings = read_listings(args.input)?;

    let mut spec = FilterSpec::new()
        .with_location(args.location)
        .with_price_range(args.min_price, args.max_price.unwrap_or(Decimal::MAX))
        .with_min_star_rating(args.min_rating)
        .with_sort_order(args.sort);
    if args.half_even {
        spec = spec.with_rating_rounding(RatingRounding::HalfEven);
    }
    if spec.price_range.is_inverted() {
        tracing::warn!(
            min = %spec.price_range.min,
            max = %spec.price_range.max,
            "price range is inverted, no listing can match"
        );
    }

    let result = ListingFilterEngine::apply(&listings, &spec);

    let stdout = io::stdout();
    let mut writer = ListingWriter::new(stdout.lock());
    match args.page {
        Some(page) => writer.write_listings(result.page(page, args.page_size)),
        None => writer.write_listings(result.as_slice()),
    }
    .into_diagnostic()?;

    Ok(())
}

fn run_locations(input: PathBuf) -> Result<()> {
    let listings = read_listings(input)?;
    for (location, count) in ListingFilterEngine::location_counts(&listings) {
        println!("{location}: {count}");
    }
    Ok(())
}

async fn run_checkout(args: CheckoutArgs) -> Result<()> {
    let mut config = CheckoutConfig::new(args.backend_url);
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let booking = BookingReference::new(args.booking_id).into_diagnostic()?;
    let transport: CheckoutTransportRef =
        Arc::new(HttpCheckoutTransport::new(&config).into_diagnostic()?);
    let credentials: CredentialProviderRef = Arc::new(StaticTokenProvider::new(args.auth_token));

    let controller = CheckoutSessionController::new(config, credentials, transport);
    controller.activate(booking);

    match controller.settled().await {
        CheckoutSessionState::Ready { .. } => {
            println!("ready");
            Ok(())
        }
        CheckoutSessionState::Failed { message } => {
            println!("failed: {message}");
            Err(miette!("checkout session could not be created"))
        }
        state => Err(miette!("checkout ended unexpectedly in {state:?}")),
    }
}
