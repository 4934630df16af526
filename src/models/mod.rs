use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Promotional level of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Highlight,
    Premium,
}

impl Tier {
    /// Parse a stored tier value; anything unrecognised ranks as `Free`
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("premium") => Tier::Premium,
            Some("highlight") => Tier::Highlight,
            _ => Tier::Free,
        }
    }

    /// Weight used by the relevance ordering (higher sorts first)
    pub fn rank(self) -> u8 {
        match self {
            Tier::Premium => 3,
            Tier::Highlight => 2,
            Tier::Free => 1,
        }
    }
}

/// A time-bucketed price, e.g. ("1 hour", 150.0)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rate {
    pub time: String,
    pub value: f64,
}

impl Rate {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// Validated view of a listing's attribute bag.
///
/// Known numeric attributes and rates are lifted out at the boundary; anything
/// else is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rates: Vec<Rate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ordering applied to a result list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Newest first
    #[default]
    Recent,
    /// Tier, then verified, then featured, then newest
    Relevance,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "recent" => Ok(SortPolicy::Recent),
            "relevance" => Ok(SortPolicy::Relevance),
            "price_asc" => Ok(SortPolicy::PriceAsc),
            "price_desc" => Ok(SortPolicy::PriceDesc),
            other => Err(format!("unknown sort policy: {}", other)),
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortPolicy::Recent => "recent",
            SortPolicy::Relevance => "relevance",
            SortPolicy::PriceAsc => "price_asc",
            SortPolicy::PriceDesc => "price_desc",
        };
        f.write_str(name)
    }
}

/// Category joined onto a listing row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A listing row as persisted by the store, before normalization.
///
/// Every field is optional or loosely typed because stored rows are
/// populated inconsistently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListing {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub images: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub is_vip: Option<bool>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub categories: Option<CategoryRef>,
}

impl RawListing {
    /// Stored price when it is a plain JSON number
    pub fn stored_price(&self) -> Option<f64> {
        self.price.as_ref().and_then(Value::as_f64)
    }
}

/// Canonical listing as shown to users
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub category_name: Option<String>,
    pub subcategory: Option<String>,
    pub location: String,
    pub state: String,
    pub image: String,
    pub images: Vec<String>,
    pub description: String,
    pub attributes: Attributes,
    pub created_at: DateTime<Utc>,
    pub tier: Tier,
    pub verified: bool,
    pub featured: bool,
    pub age: Option<u32>,
}
