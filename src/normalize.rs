//! Turns raw store rows into display listings, then filters and orders them.

use crate::config::{DEFAULT_CATEGORY_SLUG, DEFAULT_PLACEHOLDER_IMAGE, DEFAULT_STATE};
use crate::filters::ResidualFilters;
use crate::models::{Attributes, Listing, Rate, RawListing, SortPolicy, Tier};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Named attribute keys that carry a rate, with the label each one gets
pub const NAMED_RATE_FIELDS: &[(&str, &str)] = &[
    ("rate_30m", "30 minutes"),
    ("rate_1h", "1 hour"),
    ("rate_2h", "2 hours"),
    ("rate_3h", "3 hours"),
    ("rate_4h", "4 hours"),
    ("rate_pernoite", "overnight"),
];

/// Fallback values for fields a row leaves empty
#[derive(Debug, Clone)]
pub struct RowDefaults {
    pub placeholder_image: String,
    pub category: String,
    pub state: String,
}

impl Default for RowDefaults {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            category: DEFAULT_CATEGORY_SLUG.to_string(),
            state: DEFAULT_STATE.to_string(),
        }
    }
}

/// Parse a loosely typed monetary value.
///
/// Numbers pass through. Strings use `.` for thousands and `,` for decimals,
/// so `"1.234,56"` becomes `1234.56`. Anything that does not end up as a
/// finite number yields `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number_str(s),
        _ => None,
    }
}

pub fn parse_number_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .replace('.', "")
        .replacen(',', ".", 1)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Plain numeric coercion for counts and years (no separator handling)
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Collect the rates of an attribute bag.
///
/// An explicit `rates` list wins when it yields at least one usable entry;
/// otherwise the named `rate_*` fields are scanned and only positive values
/// are kept.
pub fn extract_rates(attrs: &Map<String, Value>) -> Vec<Rate> {
    if let Some(Value::Array(entries)) = attrs.get("rates") {
        let listed: Vec<Rate> = entries.iter().filter_map(rate_from_entry).collect();
        if !listed.is_empty() {
            return listed;
        }
    }

    NAMED_RATE_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            let value = attrs.get(*key).and_then(parse_number)?;
            (value > 0.0).then(|| Rate::new(*label, value))
        })
        .collect()
}

fn rate_from_entry(entry: &Value) -> Option<Rate> {
    let time = match entry.get("time")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if time.is_empty() {
        return None;
    }
    let value = parse_number(entry.get("value")?)?;
    Some(Rate { time, value })
}

/// Smallest positive rate, if any
pub fn min_rate(rates: &[Rate]) -> Option<f64> {
    rates
        .iter()
        .map(|r| r.value)
        .filter(|v| *v > 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

/// Display price: the stored price when positive, else the cheapest rate, else 0.
pub fn derive_price(stored: Option<f64>, rates: &[Rate]) -> f64 {
    match stored {
        Some(price) if price.is_finite() && price > 0.0 => price,
        _ => min_rate(rates).unwrap_or(0.0),
    }
}

/// Validate an attribute bag into its typed shape
pub fn parse_attributes(value: Option<&Value>) -> Attributes {
    let Some(Value::Object(map)) = value else {
        return Attributes::default();
    };

    let rates = extract_rates(map);
    let mut extra = map.clone();
    let year = extra.remove("year").as_ref().and_then(coerce_number);
    let bedrooms = extra.remove("bedrooms").as_ref().and_then(coerce_number);
    extra.remove("rates");
    for (key, _) in NAMED_RATE_FIELDS {
        extra.remove(*key);
    }

    Attributes {
        year,
        bedrooms,
        rates,
        extra,
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Timestamps without an offset are taken as UTC
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn normalize_row(row: RawListing, defaults: &RowDefaults) -> Listing {
    let attributes = parse_attributes(row.attributes.as_ref());
    let price = derive_price(row.stored_price(), &attributes.rates);

    let images: Vec<String> = match row.images {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(url) => Some(url),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    let image = images
        .first()
        .cloned()
        .unwrap_or_else(|| defaults.placeholder_image.clone());

    let created_at = row
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);

    let (category, category_name) = match row.categories {
        Some(cat) => (cat.slug, cat.name),
        None => (defaults.category.clone(), None),
    };

    Listing {
        id: row.id,
        slug: row.slug.filter(|s| !s.is_empty()),
        title: row.title.unwrap_or_default(),
        price,
        category,
        category_name,
        subcategory: row.subcategory.filter(|s| !s.is_empty()),
        location: non_empty(row.city)
            .or_else(|| non_empty(row.location))
            .unwrap_or_default(),
        state: non_empty(row.state).unwrap_or_else(|| defaults.state.clone()),
        image,
        images,
        description: row.description.unwrap_or_default(),
        attributes,
        created_at,
        tier: Tier::from_stored(row.tier.as_deref()),
        verified: row.verified.unwrap_or(false),
        featured: row.is_vip.unwrap_or(false),
        age: row.age,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Apply year and bedroom thresholds; a missing attribute counts as 0.
pub fn apply_residual_filters(listings: Vec<Listing>, filters: &ResidualFilters) -> Vec<Listing> {
    if filters.is_empty() {
        return listings;
    }

    listings
        .into_iter()
        .filter(|listing| {
            let year = listing.attributes.year.unwrap_or(0.0);
            let bedrooms = listing.attributes.bedrooms.unwrap_or(0.0);
            filters.min_year.map_or(true, |min| year >= min)
                && filters.max_year.map_or(true, |max| year <= max)
                && filters.min_bedrooms.map_or(true, |min| bedrooms >= min)
        })
        .collect()
}

/// Order listings in place. The sort is stable, so ties keep input order.
pub fn sort_listings(listings: &mut [Listing], policy: SortPolicy) {
    match policy {
        SortPolicy::PriceAsc => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortPolicy::PriceDesc => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortPolicy::Recent => listings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortPolicy::Relevance => listings.sort_by(relevance_order),
    }
}

fn relevance_order(a: &Listing, b: &Listing) -> Ordering {
    b.tier
        .rank()
        .cmp(&a.tier.rank())
        .then_with(|| b.verified.cmp(&a.verified))
        .then_with(|| b.featured.cmp(&a.featured))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Full post-fetch stage: normalize every row, narrow, then order.
pub fn normalize_and_sort(
    rows: Vec<RawListing>,
    residual: &ResidualFilters,
    policy: SortPolicy,
    defaults: &RowDefaults,
) -> Vec<Listing> {
    let listings = rows
        .into_iter()
        .map(|row| normalize_row(row, defaults))
        .collect();
    let mut listings = apply_residual_filters(listings, residual);
    sort_listings(&mut listings, policy);
    listings
}
