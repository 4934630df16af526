use crate::config::BackendConfig;
use crate::error::StoreError;
use crate::filters::{ListingQuery, ValueMatch};
use crate::models::RawListing;
use crate::store::traits::ListingStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

const LISTING_SELECT: &str = "*,categories!inner(slug,name)";
const CATEGORY_SLUG_SELECT: &str = "category_id,categories!inner(slug)";

/// Listings store backed by a PostgREST endpoint (`/rest/v1/<table>`)
pub struct PostgrestStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CategorySlugRow {
    categories: Option<SlugOnly>,
}

#[derive(Debug, Deserialize)]
struct SlugOnly {
    slug: Option<String>,
}

impl PostgrestStore {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = format!(
            "{}/rest/v1/{}",
            config.url.trim_end_matches('/'),
            config.listings_table
        );
        info!("Using listings endpoint {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Encode a listing query as PostgREST query-string pairs
    pub fn query_pairs(query: &ListingQuery) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("select".to_string(), LISTING_SELECT.to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ];

        if let Some(category) = &query.category {
            pairs.push(("categories.slug".to_string(), encode_match(category)));
        }
        if let Some(subcategory) = &query.subcategory {
            pairs.push(("subcategory".to_string(), format!("eq.{}", subcategory)));
        }
        if let Some(state) = &query.state {
            pairs.push(("state".to_string(), encode_match(state)));
        }
        if let Some(min) = query.min_price {
            pairs.push(("price".to_string(), format!("gte.{}", min)));
        }
        if let Some(max) = query.max_price {
            pairs.push(("price".to_string(), format!("lte.{}", max)));
        }

        pairs
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        pairs: &[(String, String)],
    ) -> Result<T, StoreError> {
        debug!("GET {} {:?}", self.endpoint, pairs);

        let response = self
            .client
            .get(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(pairs)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Listings store returned status: {}", status);
            return Err(StoreError::Query {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Downloaded {} bytes from listings store", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

fn encode_match(matcher: &ValueMatch) -> String {
    match matcher {
        ValueMatch::Eq(value) => format!("eq.{}", value),
        ValueMatch::In(values) => {
            let items: Vec<String> = values.iter().map(|v| quote_list_item(v)).collect();
            format!("in.({})", items.join(","))
        }
    }
}

/// Quote list members that contain PostgREST delimiters or whitespace
fn quote_list_item(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| matches!(c, ',' | '.' | ':' | '(' | ')' | '"' | '\\') || c.is_whitespace());
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

#[async_trait]
impl ListingStore for PostgrestStore {
    async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<RawListing>, StoreError> {
        let rows: Vec<RawListing> = self.get_json(&Self::query_pairs(query)).await?;
        debug!("Fetched {} listing rows", rows.len());
        Ok(rows)
    }

    async fn fetch_category_slugs(&self) -> Result<Vec<String>, StoreError> {
        let pairs = vec![("select".to_string(), CATEGORY_SLUG_SELECT.to_string())];
        let rows: Vec<CategorySlugRow> = self.get_json(&pairs).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.categories.and_then(|c| c.slug))
            .collect())
    }

    fn store_name(&self) -> &'static str {
        "PostgREST"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{resolve_query, FilterState};
    use std::time::Duration;

    fn value_of<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn unfiltered_query_only_selects_and_orders() {
        let pairs = PostgrestStore::query_pairs(&ListingQuery::default());
        assert_eq!(
            pairs,
            vec![
                ("select".to_string(), LISTING_SELECT.to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn full_query_encodes_every_predicate() {
        let filters = FilterState::default()
            .with_category("imoveis")
            .with_subcategory("Casas")
            .with_state("SC")
            .with_price_range(Some(1000.0), Some(2500.5));
        let pairs = PostgrestStore::query_pairs(&resolve_query(&filters));

        let category = value_of(&pairs, "categories.slug");
        assert!(category[0].starts_with("in.(alugar-casa-apartamento,comprar-imovel,"));
        assert_eq!(value_of(&pairs, "subcategory"), vec!["eq.Casas"]);
        assert_eq!(value_of(&pairs, "state"), vec!["in.(SC,\"Santa Catarina\")"]);
        assert_eq!(value_of(&pairs, "price"), vec!["gte.1000", "lte.2500.5"]);
    }

    #[test]
    fn list_items_with_delimiters_are_quoted() {
        assert_eq!(quote_list_item("carros-usados"), "carros-usados");
        assert_eq!(quote_list_item("a,b"), "\"a,b\"");
        assert_eq!(quote_list_item("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn endpoint_joins_base_url_and_table() {
        let store = PostgrestStore::new(&BackendConfig {
            url: "https://example.supabase.co/".to_string(),
            api_key: "anon".to_string(),
            listings_table: "listings".to_string(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(store.endpoint, "https://example.supabase.co/rest/v1/listings");
        assert_eq!(store.store_name(), "PostgREST");
    }
}
