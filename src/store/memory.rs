//! In-process listings store.
//!
//! Evaluates the same predicates as the hosted backend over a list of rows,
//! so fixture files and tests exercise the full pipeline without a network.

use crate::error::StoreError;
use crate::filters::ListingQuery;
use crate::models::RawListing;
use crate::normalize::parse_timestamp;
use crate::store::traits::ListingStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<Vec<RawListing>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new(rows: Vec<RawListing>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Load rows from a JSON array on disk
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let rows: Vec<RawListing> = serde_json::from_str(&raw)
            .with_context(|| format!("Fixture {} is not a JSON array of listings", path.display()))?;
        info!("Loaded {} listings from {}", rows.len(), path.display());
        Ok(Self::new(rows))
    }

    pub async fn insert(&self, row: RawListing) {
        self.rows.write().await.push(row);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Make every subsequent read fail as if the backend were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

/// Row-level evaluation of a query, mirroring the backend's semantics.
///
/// The category join is inner, so rows without a category never match.
/// Price bounds exclude rows without a numeric stored price.
fn row_matches(query: &ListingQuery, row: &RawListing) -> bool {
    let Some(category) = &row.categories else {
        return false;
    };
    if let Some(matcher) = &query.category {
        if !matcher.matches(&category.slug) {
            return false;
        }
    }
    if let Some(subcategory) = &query.subcategory {
        if row.subcategory.as_deref() != Some(subcategory.as_str()) {
            return false;
        }
    }
    if let Some(matcher) = &query.state {
        match row.state.as_deref() {
            Some(state) if matcher.matches(state) => {}
            _ => return false,
        }
    }
    if query.min_price.is_some() || query.max_price.is_some() {
        let Some(price) = row.stored_price() else {
            return false;
        };
        if query.min_price.map_or(false, |min| price < min)
            || query.max_price.map_or(false, |max| price > max)
        {
            return false;
        }
    }
    true
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<RawListing>, StoreError> {
        self.check_online()?;

        let rows = self.rows.read().await;
        let mut matched: Vec<RawListing> = rows
            .iter()
            .filter(|row| row_matches(query, row))
            .cloned()
            .collect();
        matched.sort_by_key(|row| Reverse(row.created_at.as_deref().and_then(parse_timestamp)));

        debug!("Memory store matched {} of {} rows", matched.len(), rows.len());
        Ok(matched)
    }

    async fn fetch_category_slugs(&self) -> Result<Vec<String>, StoreError> {
        self.check_online()?;

        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter_map(|row| row.categories.as_ref().map(|c| c.slug.clone()))
            .collect())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
