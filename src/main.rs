use anyhow::Result;
use clap::Parser;
use classifieds_search::normalize::RowDefaults;
use classifieds_search::slug::listing_path;
use classifieds_search::{
    Config, FilterState, ListingSearch, ListingStore, MemoryStore, PostgrestStore, SortPolicy,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Search classified listings
#[derive(Debug, Parser)]
#[command(name = "classifieds-search", version)]
struct Cli {
    /// UI category id (e.g. autos, imoveis)
    #[arg(long)]
    category: Option<String>,

    /// Subcategory label (e.g. "Motos")
    #[arg(long)]
    subcategory: Option<String>,

    /// State code or full state name
    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    #[arg(long)]
    min_year: Option<f64>,

    #[arg(long)]
    max_year: Option<f64>,

    #[arg(long)]
    min_bedrooms: Option<f64>,

    /// recent, relevance, price-asc or price-desc
    #[arg(long, default_value = "recent")]
    sort: SortPolicy,

    /// Read listings from a JSON fixture instead of the hosted backend
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Print listing counts per category instead of listings
    #[arg(long)]
    counts: bool,

    /// Also write the results as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn filters(&self) -> FilterState {
        let mut filters = FilterState::default();
        if let Some(category) = &self.category {
            filters = filters.with_category(category);
        }
        if let Some(subcategory) = &self.subcategory {
            filters = filters.with_subcategory(subcategory);
        }
        if let Some(state) = &self.state {
            filters = filters.with_state(state);
        }
        filters = filters.with_price_range(self.min_price, self.max_price);
        filters.min_year = self.min_year;
        filters.max_year = self.max_year;
        filters.min_bedrooms = self.min_bedrooms;
        filters
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let defaults = RowDefaults {
        placeholder_image: config.placeholder_image.clone(),
        ..RowDefaults::default()
    };

    match &cli.fixture {
        Some(path) => {
            let store = MemoryStore::from_json_file(path).await?;
            run(ListingSearch::new(store).with_defaults(defaults), &cli).await
        }
        None => {
            let store = PostgrestStore::new(config.backend()?)?;
            run(ListingSearch::new(store).with_defaults(defaults), &cli).await
        }
    }
}

async fn run<S: ListingStore>(search: ListingSearch<S>, cli: &Cli) -> Result<()> {
    info!("Classifieds search using {} store", search.store().store_name());

    if cli.counts {
        for count in search.category_counts().await {
            println!("{:<16} {:<26} {}", count.category_id, count.name, count.count);
        }
        return Ok(());
    }

    let filters = cli.filters();
    let listings = search
        .search(&filters, cli.sort)
        .await
        .into_listings()
        .unwrap_or_default();

    info!("Found {} listings (sort: {})", listings.len(), cli.sort);

    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {} (R$ {:.2})", i + 1, listing.title, listing.price);
        println!("   {} - {} [{}]", listing.location, listing.state, listing.category);
        if let Some(path) = listing_path(listing) {
            println!("   /{}", path);
        }
        println!();
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&listings)?;
        tokio::fs::write(path, json).await?;
        info!("Saved {} listings to {}", listings.len(), path.display());
    }

    Ok(())
}
