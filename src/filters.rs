use crate::taxonomy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filter selections coming from the UI or the command line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    /// UI category id (e.g. `autos`)
    pub category: Option<String>,
    /// Subcategory label as shown in the UI (e.g. `Motos`)
    pub subcategory: Option<String>,
    /// State code or full state name
    pub state: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_year: Option<f64>,
    pub max_year: Option<f64>,
    pub min_bedrooms: Option<f64>,
}

impl FilterState {
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = clean_param(Some(category.as_ref()));
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl AsRef<str>) -> Self {
        self.subcategory = clean_param(Some(subcategory.as_ref()));
        self
    }

    pub fn with_state(mut self, state: impl AsRef<str>) -> Self {
        self.state = clean_param(Some(state.as_ref()));
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// The part of the filter the store cannot evaluate
    pub fn residual(&self) -> ResidualFilters {
        ResidualFilters {
            min_year: self.min_year,
            max_year: self.max_year,
            min_bedrooms: self.min_bedrooms,
        }
    }
}

/// Attribute thresholds applied after retrieval
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResidualFilters {
    pub min_year: Option<f64>,
    pub max_year: Option<f64>,
    pub min_bedrooms: Option<f64>,
}

impl ResidualFilters {
    pub fn is_empty(&self) -> bool {
        self.min_year.is_none() && self.max_year.is_none() && self.min_bedrooms.is_none()
    }
}

/// Treat empty values and the literal strings `undefined`/`null` as absent.
///
/// These show up when optional parameters round-trip through URLs.
pub fn clean_param(value: Option<&str>) -> Option<String> {
    match value {
        None | Some("") | Some("undefined") | Some("null") => None,
        Some(v) => Some(v.to_string()),
    }
}

/// Equality or set-membership test on a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValueMatch {
    Eq(String),
    In(Vec<String>),
}

impl ValueMatch {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ValueMatch::Eq(expected) => expected == value,
            ValueMatch::In(set) => set.iter().any(|v| v == value),
        }
    }
}

/// Predicates sent to the listings store
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingQuery {
    /// Applied to the joined category slug
    pub category: Option<ValueMatch>,
    /// Applied to the listing's own free-text subcategory column
    pub subcategory: Option<String>,
    pub state: Option<ValueMatch>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListingQuery {
    pub fn is_unfiltered(&self) -> bool {
        *self == ListingQuery::default()
    }
}

/// Translate UI selections into store predicates.
pub fn resolve_query(filters: &FilterState) -> ListingQuery {
    let mut query = ListingQuery::default();

    if let Some(category) = clean_param(filters.category.as_deref()) {
        query.category = Some(match taxonomy::category_slugs(&category) {
            Some(slugs) => ValueMatch::In(slugs.iter().map(|s| s.to_string()).collect()),
            None => ValueMatch::Eq(category),
        });
    }

    if let Some(subcategory) = clean_param(filters.subcategory.as_deref()) {
        match taxonomy::subcategory_slug(&subcategory) {
            Some(slug) => query.category = Some(ValueMatch::Eq(slug.to_string())),
            None => query.subcategory = Some(subcategory),
        }
    }

    if let Some(state) = clean_param(filters.state.as_deref()) {
        query.state = Some(resolve_state(state));
    }

    // A zero bound counts as unset
    query.min_price = filters.min_price.filter(|p| *p != 0.0);
    query.max_price = filters.max_price.filter(|p| *p != 0.0);

    debug!(?query, "Resolved listing query");
    query
}

/// Stored rows use either the code or the full name, so match both.
fn resolve_state(state: String) -> ValueMatch {
    if let Some(name) = taxonomy::state_name(&state) {
        return ValueMatch::In(vec![state, name.to_string()]);
    }
    if let Some(code) = taxonomy::state_code(&state) {
        return ValueMatch::In(vec![state, code.to_string()]);
    }
    ValueMatch::Eq(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_resolve_to_all_listings() {
        assert!(resolve_query(&FilterState::default()).is_unfiltered());
    }

    #[test]
    fn mapped_category_becomes_slug_set() {
        let query = resolve_query(&FilterState::default().with_category("autos"));
        match query.category {
            Some(ValueMatch::In(slugs)) => {
                assert!(slugs.contains(&"carros-usados".to_string()));
                assert!(slugs.contains(&"motos-scooters".to_string()));
            }
            other => panic!("expected slug set, got {:?}", other),
        }
    }

    #[test]
    fn unmapped_category_falls_back_to_equality() {
        let query = resolve_query(&FilterState::default().with_category("agro"));
        assert_eq!(query.category, Some(ValueMatch::Eq("agro".to_string())));
    }

    #[test]
    fn mapped_subcategory_narrows_category() {
        let filters = FilterState::default()
            .with_category("autos")
            .with_subcategory("Motos");
        let query = resolve_query(&filters);
        assert_eq!(
            query.category,
            Some(ValueMatch::Eq("motos-scooters".to_string()))
        );
        assert_eq!(query.subcategory, None);
    }

    #[test]
    fn unmapped_subcategory_matches_free_text_column() {
        let filters = FilterState::default()
            .with_category("imoveis")
            .with_subcategory("Casas");
        let query = resolve_query(&filters);
        assert!(matches!(query.category, Some(ValueMatch::In(_))));
        assert_eq!(query.subcategory.as_deref(), Some("Casas"));
    }

    #[test]
    fn sentinel_subcategory_is_ignored() {
        let plain = resolve_query(&FilterState::default().with_category("autos"));
        for sentinel in ["undefined", "null", ""] {
            let filters = FilterState {
                category: Some("autos".to_string()),
                subcategory: Some(sentinel.to_string()),
                ..Default::default()
            };
            assert_eq!(resolve_query(&filters), plain);
        }
    }

    #[test]
    fn state_code_matches_code_or_full_name() {
        let query = resolve_query(&FilterState::default().with_state("SC"));
        let state = query.state.unwrap();
        assert!(state.matches("SC"));
        assert!(state.matches("Santa Catarina"));
        assert!(!state.matches("SP"));
    }

    #[test]
    fn full_state_name_maps_back_to_code() {
        let query = resolve_query(&FilterState::default().with_state("São Paulo"));
        let state = query.state.unwrap();
        assert!(state.matches("SP"));
        assert!(state.matches("São Paulo"));
    }

    #[test]
    fn unknown_state_uses_equality() {
        let query = resolve_query(&FilterState::default().with_state("AM"));
        assert_eq!(query.state, Some(ValueMatch::Eq("AM".to_string())));
    }

    #[test]
    fn zero_price_bound_is_dropped() {
        let filters = FilterState::default().with_price_range(Some(0.0), Some(5000.0));
        let query = resolve_query(&filters);
        assert_eq!(query.min_price, None);
        assert_eq!(query.max_price, Some(5000.0));
    }
}
