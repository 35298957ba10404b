//! Event Catalog Dump Binary
//!
//! Builds the catalog views for one locale from content on disk and prints
//! them as JSON on stdout.
//!
//! ## Inputs
//!
//! - `--content <DIR>`: content root, one `<locale>/*.json` file per event
//! - `--authors <FILE>`: author directory, JSON object `handle -> record`
//! - `--messages <FILE>`: message catalog, JSON `{ "<locale>": { ... } }`
//! - `--config <FILE>`: optional site config overrides
//!
//! ## Environment
//!
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! Logs go to stderr so stdout stays machine-readable.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --features cli --bin event-catalog -- \
//!     --content content/events --authors content/authors.json \
//!     --messages i18n/messages.json --locale en --view page
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use event_catalog::{
    AuthorDirectory, EventCatalog, EventDate, FixedClock, JsonContentStore, MessageCatalog,
    PrefixedImageBuilder, SiteConfig,
};

/// Which view to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    /// Current events, past events and facets.
    Page,
    /// Upcoming events only.
    Current,
    /// Past events only.
    Past,
    /// Facets only.
    Facets,
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "event-catalog", version, about = "Dump normalized event views as JSON")]
struct Args {
    /// Content root containing one directory per locale.
    #[arg(long)]
    content: PathBuf,
    /// Author directory JSON file.
    #[arg(long)]
    authors: PathBuf,
    /// Message catalog JSON file.
    #[arg(long)]
    messages: PathBuf,
    /// Site config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Locale to build.
    #[arg(long, default_value = "en")]
    locale: String,
    /// Fallback locale for missing messages.
    #[arg(long)]
    default_locale: Option<String>,
    /// Evaluate past/current against this date instead of the wall clock.
    #[arg(long)]
    now: Option<EventDate>,
    /// Prefix for relative image references.
    #[arg(long)]
    asset_base: Option<String>,
    /// View to print.
    #[arg(long, value_enum, default_value_t = View::Page)]
    view: View,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "event_catalog=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    }
}

fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let start = Instant::now();

    let authors = AuthorDirectory::from_json_str(&read_file(&args.authors)?)?;
    let mut messages = MessageCatalog::from_json_str(&read_file(&args.messages)?)?;
    if let Some(fallback) = &args.default_locale {
        messages = messages.with_default_locale(fallback);
    }
    let config = match &args.config {
        Some(path) => SiteConfig::from_path(path)?,
        None => SiteConfig::default(),
    };

    info!(
        authors = authors.len(),
        config_hash = %config.params_hash(),
        locale = %args.locale,
        "Loaded catalog inputs"
    );

    let mut catalog = EventCatalog::new(
        Arc::new(JsonContentStore::new(&args.content)),
        Arc::new(authors),
        Arc::new(messages),
    )
    .with_config(config);
    if let Some(now) = args.now {
        catalog = catalog.with_clock(FixedClock::at_date(now));
    }
    if let Some(base) = &args.asset_base {
        catalog = catalog.with_image_builder(PrefixedImageBuilder::new(base.as_str()));
    }

    let locale = args.locale.as_str();
    let output = match args.view {
        View::Page => catalog.page(locale).map(|p| serde_json::to_string_pretty(&p)),
        View::Current => catalog.current_events(locale).map(|e| serde_json::to_string_pretty(&e)),
        View::Past => catalog.past_events(locale).map(|e| serde_json::to_string_pretty(&e)),
        View::Facets => catalog.event_facets(locale).map(|f| serde_json::to_string_pretty(&f)),
    };

    let json = match output {
        Ok(json) => json?,
        Err(e) => {
            error!(error = %e, locale, "Catalog build failed");
            return Err(e.into());
        }
    };

    println!("{json}");
    info!(
        latency_ms = start.elapsed().as_millis() as u64,
        view = ?args.view,
        "Catalog dump complete"
    );
    Ok(())
}
