pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod normalize;
pub mod search;
pub mod slug;
pub mod store;
pub mod taxonomy;

pub use config::Config;
pub use error::StoreError;
pub use filters::{resolve_query, FilterState, ListingQuery, ValueMatch};
pub use models::{Attributes, Listing, Rate, RawListing, SortPolicy, Tier};
pub use normalize::{normalize_and_sort, RowDefaults};
pub use search::{ListingSearch, SearchOutcome};
pub use store::{ListingStore, MemoryStore, PostgrestStore};
