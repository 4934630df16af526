use classifieds_search::models::CategoryRef;
use classifieds_search::{
    FilterState, ListingSearch, MemoryStore, RawListing, SearchOutcome, SortPolicy, Tier,
};
use serde_json::{json, Value};

fn row(id: &str, slug: &str, created_at: &str) -> RawListing {
    RawListing {
        id: id.to_string(),
        title: Some(id.to_string()),
        state: Some("SC".to_string()),
        created_at: Some(created_at.to_string()),
        categories: Some(CategoryRef {
            slug: slug.to_string(),
            name: None,
        }),
        ..Default::default()
    }
}

fn with(mut row: RawListing, field: &str, value: Value) -> RawListing {
    match field {
        "price" => row.price = Some(value),
        "attributes" => row.attributes = Some(value),
        "state" => row.state = value.as_str().map(str::to_string),
        "subcategory" => row.subcategory = value.as_str().map(str::to_string),
        "tier" => row.tier = value.as_str().map(str::to_string),
        "verified" => row.verified = value.as_bool(),
        "is_vip" => row.is_vip = value.as_bool(),
        other => panic!("unsupported field {}", other),
    }
    row
}

fn marketplace() -> MemoryStore {
    MemoryStore::new(vec![
        with(
            with(row("gol", "carros-usados", "2024-05-01T10:00:00Z"), "price", json!(28500)),
            "attributes",
            json!({"year": 2012}),
        ),
        with(
            with(row("civic", "carros-usados", "2024-05-03T10:00:00Z"), "price", json!(72000)),
            "attributes",
            json!({"year": "2020"}),
        ),
        with(
            with(row("cg", "motos-scooters", "2024-05-02T10:00:00Z"), "state", json!("Santa Catarina")),
            "tier",
            json!("premium"),
        ),
        with(
            with(row("apto", "alugar-casa-apartamento", "2024-05-04T10:00:00Z"), "attributes", json!({"bedrooms": 3})),
            "state",
            json!("PR"),
        ),
        with(
            with(row("massagem", "acompanhantes", "2024-05-05T10:00:00Z"), "attributes", json!({"rate_1h": "180", "rate_30m": "1.20"})),
            "verified",
            json!(true),
        ),
        with(row("casa", "comprar-imovel", "2024-05-06T10:00:00Z"), "subcategory", json!("Casas")),
    ])
}

fn ids(outcome: SearchOutcome) -> Vec<String> {
    outcome
        .into_listings()
        .expect("search should be current")
        .into_iter()
        .map(|l| l.id)
        .collect()
}

#[tokio::test]
async fn category_search_with_year_window() {
    let search = ListingSearch::new(marketplace());
    let filters = FilterState {
        min_year: Some(2015.0),
        ..FilterState::default().with_category("autos")
    };

    let found = ids(search.search(&filters, SortPolicy::Recent).await);
    assert_eq!(found, vec!["civic"]);
}

#[tokio::test]
async fn state_search_matches_code_and_name() {
    let search = ListingSearch::new(marketplace());
    let filters = FilterState::default()
        .with_category("autos")
        .with_state("SC");

    let found = ids(search.search(&filters, SortPolicy::Recent).await);
    assert_eq!(found, vec!["civic", "cg", "gol"]);
}

#[tokio::test]
async fn subcategory_sentinel_is_ignored_end_to_end() {
    let search = ListingSearch::new(marketplace());
    let plain = FilterState::default().with_category("imoveis");
    let sentinel = FilterState {
        subcategory: Some("undefined".to_string()),
        ..plain.clone()
    };

    let a = ids(search.search(&plain, SortPolicy::Recent).await);
    let b = ids(search.search(&sentinel, SortPolicy::Recent).await);
    assert_eq!(a, b);
    assert_eq!(a, vec!["casa", "apto"]);
}

#[tokio::test]
async fn bedrooms_threshold_drops_listings_without_the_attribute() {
    let search = ListingSearch::new(marketplace());
    let filters = FilterState {
        min_bedrooms: Some(2.0),
        ..FilterState::default().with_category("imoveis")
    };

    let found = ids(search.search(&filters, SortPolicy::Recent).await);
    assert_eq!(found, vec!["apto"]);
}

#[tokio::test]
async fn rate_only_listing_gets_cheapest_rate_as_price() {
    let search = ListingSearch::new(marketplace());
    let filters = FilterState::default().with_category("acompanhantes");

    let listings = search
        .search(&filters, SortPolicy::Recent)
        .await
        .into_listings()
        .unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].price, 120.0);
    assert_eq!(listings[0].attributes.rates.len(), 2);
}

#[tokio::test]
async fn relevance_orders_by_tier_then_verified_then_recency() {
    let search = ListingSearch::new(marketplace());
    let listings = search
        .search(&FilterState::default(), SortPolicy::Relevance)
        .await
        .into_listings()
        .unwrap();

    assert_eq!(listings[0].id, "cg");
    assert_eq!(listings[0].tier, Tier::Premium);
    assert_eq!(listings[1].id, "massagem");
    let rest: Vec<&str> = listings[2..].iter().map(|l| l.id.as_str()).collect();
    assert_eq!(rest, vec!["casa", "apto", "civic", "gol"]);
}

#[tokio::test]
async fn price_sort_treats_missing_price_as_zero() {
    let search = ListingSearch::new(marketplace());
    let found = ids(
        search
            .search(&FilterState::default(), SortPolicy::PriceDesc)
            .await,
    );
    assert_eq!(&found[..3], &["civic", "gol", "massagem"]);
}

#[tokio::test]
async fn fixture_file_loads_into_memory_store() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/listings.json");
    let store = MemoryStore::from_json_file(path).await.unwrap();
    assert_eq!(store.len().await, 4);

    let search = ListingSearch::new(store);
    let listings = search
        .search(&FilterState::default().with_state("SC"), SortPolicy::PriceAsc)
        .await
        .into_listings()
        .unwrap();
    let found: Vec<(&str, f64)> = listings.iter().map(|l| (l.id.as_str(), l.price)).collect();
    assert_eq!(found, vec![("a4", 120.0), ("a2", 14900.0), ("a1", 28500.0)]);
}
