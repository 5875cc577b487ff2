use clap::Parser;
use pousada::geo::{Geocoder, GeocoderConfig};
use pousada::listings::{Category, ListingStore, MemoryStore};
use pousada::search;
use std::path::PathBuf;

/// Pousada — lodging listings with CEP proximity search.
///
/// Lists lodging listings and finds the ones near a Brazilian postal
/// code, using OpenCage geocoding with a ViaCEP fallback.
///
/// Examples:
///   pousada 01310-100
///   pousada 01310-100 --radius 5
///   pousada --category hotel
///   pousada --id 3
///   pousada --all
///   pousada --serve --port 3333
#[derive(Parser)]
#[command(name = "pousada", version, about, long_about = None)]
struct Cli {
    /// Postal code to search near (positional). Example: pousada 01310-100
    #[arg(index = 1)]
    postal_code: Option<String>,

    /// Search radius in kilometers.
    #[arg(long, short = 'r')]
    radius: Option<f64>,

    /// List listings of one category (hotel, hostel, apartment, resort,
    /// inn, motel, guesthouse, villa, cottage, cabin).
    #[arg(long, short = 'c')]
    category: Option<String>,

    /// Fetch a single listing by id.
    #[arg(long)]
    id: Option<u64>,

    /// List every listing.
    #[arg(long)]
    all: bool,

    /// Run the HTTP server instead of a one-shot query.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port.
    #[arg(long, short = 'p', default_value_t = 3333)]
    port: u16,

    /// JSON file to seed the listing store (defaults to built-in sample data).
    #[arg(long)]
    listings: Option<PathBuf>,

    /// OpenCage API key. Falls back to the OPENCAGE_API_KEY environment variable.
    #[arg(long)]
    api_key: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let store = load_store(&cli);
    let geocoder = Geocoder::new(geocoder_config(&cli));

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(pousada::server::start(&cli.host, cli.port, geocoder, store));
        return;
    }

    // ── One-shot queries: JSON to stdout, notes to stderr ───────

    if let Some(ref raw) = cli.postal_code {
        let radius = cli.radius.unwrap_or(search::DEFAULT_RADIUS_KM);
        let hits = search::find_near_postal_code(&geocoder, store.as_ref(), raw, cli.radius)
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
        eprintln!("  {} listing(s) within {} km of {}", hits.len(), radius, raw.trim());
        print_json(&hits);
        return;
    }

    if let Some(ref raw) = cli.category {
        let category: Category = raw.parse().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        print_json(&store.list_by_category(category));
        return;
    }

    if let Some(id) = cli.id {
        match store.get_by_id(id) {
            Some(listing) => print_json(&listing),
            None => {
                eprintln!("Error: No listing with id {}", id);
                std::process::exit(1);
            }
        }
        return;
    }

    if cli.all {
        print_json(&store.list_all());
        return;
    }

    eprintln!("Error: No query specified.");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  pousada 01310-100");
    eprintln!("  pousada 01310-100 --radius 5");
    eprintln!("  pousada --category hotel");
    eprintln!("  pousada --id 3");
    eprintln!("  pousada --all");
    eprintln!("  pousada --serve --port 3333");
    std::process::exit(1);
}

fn load_store(cli: &Cli) -> Box<dyn ListingStore> {
    match &cli.listings {
        Some(path) => {
            let store = MemoryStore::from_json_file(path).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            Box::new(store)
        }
        None => Box::new(MemoryStore::sample()),
    }
}

fn geocoder_config(cli: &Cli) -> GeocoderConfig {
    if let Some(ref key) = cli.api_key {
        return GeocoderConfig::new(key.clone());
    }
    GeocoderConfig::from_env().unwrap_or_else(|| {
        eprintln!("  Warning: no OpenCage API key (--api-key or OPENCAGE_API_KEY); geocoding will fail.");
        GeocoderConfig::new("")
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Cannot serialize output: {}", e);
            std::process::exit(1);
        }
    }
}
