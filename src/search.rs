//! The listing search pipeline: resolve filters, fetch, normalize and rank.
//!
//! Every search takes a token from a monotonic counter when it is issued. A
//! response is only applied if its token is still the newest one; anything
//! older is discarded, so a slow earlier request can never overwrite the
//! results of a later one.

use crate::filters::{resolve_query, FilterState};
use crate::models::{Listing, SortPolicy};
use crate::normalize::{normalize_and_sort, RowDefaults};
use crate::store::ListingStore;
use crate::taxonomy::{self, CATEGORIES};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Result of a single search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Newest request; these are the listings to show
    Fresh { token: u64, listings: Vec<Listing> },
    /// A newer request was issued before this one resolved
    Superseded { token: u64 },
}

impl SearchOutcome {
    pub fn token(&self) -> u64 {
        match self {
            SearchOutcome::Fresh { token, .. } | SearchOutcome::Superseded { token } => *token,
        }
    }

    pub fn into_listings(self) -> Option<Vec<Listing>> {
        match self {
            SearchOutcome::Fresh { listings, .. } => Some(listings),
            SearchOutcome::Superseded { .. } => None,
        }
    }
}

/// Listing count for one UI category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category_id: &'static str,
    pub name: &'static str,
    pub count: usize,
}

pub struct ListingSearch<S> {
    store: S,
    defaults: RowDefaults,
    latest: AtomicU64,
}

impl<S: ListingStore> ListingSearch<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            defaults: RowDefaults::default(),
            latest: AtomicU64::new(0),
        }
    }

    pub fn with_defaults(mut self, defaults: RowDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Token of the most recently issued search
    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Issue a search.
    ///
    /// The token is taken when this is called, not when the future is first
    /// polled, so issue order decides which response is current. Store
    /// failures are logged and produce an empty result.
    pub fn search(
        &self,
        filters: &FilterState,
        sort: SortPolicy,
    ) -> impl Future<Output = SearchOutcome> + '_ {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = resolve_query(filters);
        let residual = filters.residual();

        async move {
            debug!(token, ?sort, "Issuing listing query to {}", self.store.store_name());

            let rows = match self.store.fetch_listings(&query).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(token, "Error fetching filtered listings: {}", e);
                    Vec::new()
                }
            };

            if self.latest_token() != token {
                debug!(token, latest = self.latest_token(), "Discarding superseded response");
                return SearchOutcome::Superseded { token };
            }

            let listings = normalize_and_sort(rows, &residual, sort, &self.defaults);
            info!(token, "Search returned {} listings", listings.len());
            SearchOutcome::Fresh { token, listings }
        }
    }

    /// Listing counts per UI category; store failures count as zero
    pub async fn category_counts(&self) -> Vec<CategoryCount> {
        let slugs = match self.store.fetch_category_slugs().await {
            Ok(slugs) => slugs,
            Err(e) => {
                warn!("Error fetching category counts: {}", e);
                Vec::new()
            }
        };
        aggregate_category_counts(&slugs)
    }
}

/// Fold per-slug listing counts into the UI categories that cover them
pub fn aggregate_category_counts(slugs: &[String]) -> Vec<CategoryCount> {
    let mut per_slug: HashMap<&str, usize> = HashMap::new();
    for slug in slugs {
        *per_slug.entry(slug.as_str()).or_default() += 1;
    }

    CATEGORIES
        .iter()
        .map(|category| {
            let count: usize = match taxonomy::category_slugs(category.id) {
                Some(covered) => covered.iter().map(|s| per_slug.get(s).copied().unwrap_or(0)).sum(),
                None => per_slug.get(category.id).copied().unwrap_or(0),
            };
            CategoryCount {
                category_id: category.id,
                name: category.name,
                count,
            }
        })
        .collect()
}
