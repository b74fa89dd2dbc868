//! Service-level tests against the in-memory store.
//!
//! These exercise search, CRUD and seeding through `ListingService` the way
//! the HTTP handlers call it.

use std::sync::Arc;

use homzy_listings::models::{Listing, ListingPatch};
use homzy_listings::query::{Criterion, SearchParams};
use homzy_listings::seed::{demo_listings, DEMO_LISTING_COUNT};
use homzy_listings::service::{ListingService, SeedOutcome, ServiceError};
use homzy_listings::store::{DataStore, InMemoryStore};
use serde_json::{json, Value};

fn service_with(store: &InMemoryStore) -> ListingService {
    ListingService::new(Arc::new(store.clone()))
}

fn seeded() -> (InMemoryStore, ListingService) {
    let store = InMemoryStore::with_listings(demo_listings());
    let service = service_with(&store);
    (store, service)
}

fn params(pairs: &[(Criterion, &str)]) -> SearchParams {
    pairs
        .iter()
        .fold(SearchParams::default(), |p, (c, v)| p.with(*c, *v))
}

fn patch(value: Value) -> ListingPatch {
    match value {
        Value::Object(map) => ListingPatch::from_json(map).unwrap(),
        other => panic!("expected object, got {other}"),
    }
}

fn assert_newest_first(listings: &[Listing]) {
    assert!(listings
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

// =========================================================
// Search
// =========================================================

#[tokio::test]
async fn test_search_without_criteria_returns_default_limit() {
    let store = InMemoryStore::new();
    let service = service_with(&store);
    for i in 0..60 {
        service
            .create(Listing {
                title: Some(format!("listing {i}")),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let results = service.search(&SearchParams::default()).await.unwrap();

    assert_eq!(results.len(), 50);
    assert_newest_first(&results);
    assert_eq!(results[0].title.as_deref(), Some("listing 59"));
}

#[tokio::test]
async fn test_search_zero_limit_returns_nothing() {
    let (store, service) = seeded();
    assert!(!store.is_empty());

    let results = service
        .search(&params(&[(Criterion::Limit, "0")]))
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_price_range_keeps_both_bounds() {
    let (_, service) = seeded();

    let results = service
        .search(&params(&[
            (Criterion::MinPrice, "1000"),
            (Criterion::MaxPrice, "2000"),
        ]))
        .await
        .unwrap();

    assert!(!results.is_empty());
    for listing in &results {
        let price = listing.price.unwrap();
        assert!((1000.0..=2000.0).contains(&price), "price {price} out of range");
    }
    assert_newest_first(&results);
}

#[tokio::test]
async fn test_search_location_matches_city_case_insensitively() {
    let store = InMemoryStore::new();
    let service = service_with(&store);
    service
        .create(Listing {
            title: Some("city only".to_string()),
            location: Some("Zone 1".to_string()),
            address: Some("1 High Street".to_string()),
            city: Some("London".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    service
        .create(Listing {
            title: Some("elsewhere".to_string()),
            city: Some("Paris".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let results = service
        .search(&params(&[(Criterion::Location, "LONDON")]))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title.as_deref(), Some("city only"));
}

#[tokio::test]
async fn test_search_featured_tri_state() {
    let (_, service) = seeded();

    let featured = service
        .search(&params(&[(Criterion::Featured, "true")]))
        .await
        .unwrap();
    assert_eq!(featured.len(), 8);
    assert!(featured.iter().all(|l| l.featured == Some(true)));

    let coerced = service
        .search(&params(&[
            (Criterion::Featured, "maybe"),
            (Criterion::Limit, "100"),
        ]))
        .await
        .unwrap();
    assert_eq!(coerced.len(), DEMO_LISTING_COUNT - 8);
    assert!(coerced.iter().all(|l| l.featured == Some(false)));
}

#[tokio::test]
async fn test_search_conjunction_of_many_criteria() {
    let (_, service) = seeded();
    let combinations: Vec<Vec<(Criterion, &str)>> = vec![
        vec![(Criterion::Country, "GB"), (Criterion::Bedrooms, "2")],
        vec![
            (Criterion::PropertyType, "house"),
            (Criterion::Furnished, "false"),
            (Criterion::MaxPrice, "2000"),
        ],
        vec![
            (Criterion::Location, "berlin"),
            (Criterion::Parking, "true"),
            (Criterion::Bathrooms, "1"),
        ],
        vec![(Criterion::EnergyRating, "A"), (Criterion::PetsAllowed, "true")],
    ];

    for pairs in combinations {
        let results = service.search(&params(&pairs)).await.unwrap();
        assert_newest_first(&results);

        for listing in &results {
            for (criterion, raw) in &pairs {
                let ok = match criterion {
                    Criterion::Country => listing.country.as_deref() == Some(*raw),
                    Criterion::PropertyType => listing.property_type.as_deref() == Some(*raw),
                    Criterion::EnergyRating => listing.energy_rating.as_deref() == Some(*raw),
                    Criterion::Bedrooms => listing.bedrooms == raw.parse().ok(),
                    Criterion::Bathrooms => listing.bathrooms == raw.parse().ok(),
                    Criterion::MaxPrice => listing.price.unwrap() <= raw.parse::<f64>().unwrap(),
                    Criterion::Furnished => listing.furnished == Some(*raw == "true"),
                    Criterion::Parking => listing.parking == Some(*raw == "true"),
                    Criterion::PetsAllowed => listing.pets_allowed == Some(*raw == "true"),
                    Criterion::Location => [&listing.location, &listing.address, &listing.city]
                        .iter()
                        .any(|f| {
                            f.as_deref()
                                .is_some_and(|text| text.to_lowercase().contains(*raw))
                        }),
                    other => panic!("criterion {other:?} not covered by this test"),
                };
                assert!(ok, "{criterion:?}={raw} violated by {listing:?}");
            }
        }
    }
}

#[tokio::test]
async fn test_search_invalid_bedrooms_is_rejected() {
    let (_, service) = seeded();

    for raw in ["abc", "-1", "2.5"] {
        let err = service
            .search(&params(&[(Criterion::Bedrooms, raw)]))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ServiceError::InvalidCriterion(_)),
            "bedrooms={raw} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_search_no_matches_is_empty_not_error() {
    let (_, service) = seeded();
    let results = service
        .search(&params(&[(Criterion::Country, "IT")]))
        .await
        .unwrap();
    assert!(results.is_empty());
}

// =========================================================
// CRUD
// =========================================================

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let service = service_with(&InMemoryStore::new());
    let submitted: Listing = serde_json::from_value(json!({
        "id": "caller-chosen",
        "created_at": "2001-01-01T00:00:00Z",
        "title": "Modern Apartment",
        "price": 2500.0,
        "currency": "GBP",
        "coordinates": { "lat": 51.5074, "lng": -0.1278 },
        "bedrooms": 2,
        "photos": ["a.jpg", "b.jpg"],
        "agent_info": { "id": "agent1", "name": "Sarah Johnson" }
    }))
    .unwrap();

    let created = service.create(submitted.clone()).await.unwrap();
    let id = created.id.clone().unwrap();
    assert_ne!(id, "caller-chosen");
    assert!(created.created_at.unwrap().timestamp() > 978_307_200);

    let fetched = service.get(&id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(
        Listing {
            id: None,
            created_at: None,
            ..fetched
        },
        submitted.without_store_fields()
    );
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let service = service_with(&InMemoryStore::new());
    let err = service.get("does-not-exist").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if id == "does-not-exist"));
}

#[tokio::test]
async fn test_partial_update_changes_only_supplied_fields() {
    let (_, service) = seeded();
    let before = service
        .search(&params(&[(Criterion::Limit, "1")]))
        .await
        .unwrap()
        .remove(0);
    let id = before.id.clone().unwrap();

    let after = service
        .update(&id, &patch(json!({ "price": 999.5, "title": "Reduced", "furnished": null })))
        .await
        .unwrap();

    assert_eq!(after.price, Some(999.5));
    assert_eq!(after.title.as_deref(), Some("Reduced"));
    let expected = Listing {
        price: Some(999.5),
        title: Some("Reduced".to_string()),
        ..before
    };
    assert_eq!(after, expected);
    assert_eq!(service.get(&id).await.unwrap(), expected);
}

#[tokio::test]
async fn test_update_cannot_change_id_or_created_at() {
    let service = service_with(&InMemoryStore::new());
    let created = service.create(Listing::default()).await.unwrap();
    let id = created.id.clone().unwrap();

    let after = service
        .update(
            &id,
            &patch(json!({ "id": "other", "created_at": "2001-01-01T00:00:00Z" })),
        )
        .await
        .unwrap();

    assert_eq!(after, created);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let service = service_with(&InMemoryStore::new());

    let err = service
        .update("missing", &patch(json!({ "title": "x" })))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = service.update("missing", &ListingPatch::default()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let service = service_with(&InMemoryStore::new());
    let created = service.create(Listing::default()).await.unwrap();
    let id = created.id.unwrap();

    service.delete(&id).await.unwrap();

    assert!(matches!(service.get(&id).await, Err(ServiceError::NotFound(_))));
    assert!(matches!(service.delete(&id).await, Err(ServiceError::NotFound(_))));
}

// =========================================================
// Seeding
// =========================================================

#[tokio::test]
async fn test_seed_is_idempotent() {
    let store = InMemoryStore::new();
    let service = service_with(&store);

    let first = service.seed().await.unwrap();
    assert_eq!(first, SeedOutcome::Seeded(DEMO_LISTING_COUNT as u64));
    assert_eq!(store.len(), DEMO_LISTING_COUNT);

    let second = service.seed().await.unwrap();
    assert_eq!(second, SeedOutcome::AlreadySeeded(DEMO_LISTING_COUNT as u64));
    assert_eq!(store.len(), DEMO_LISTING_COUNT);
}

#[tokio::test]
async fn test_seed_skips_non_empty_store() {
    let store = InMemoryStore::new();
    let service = service_with(&store);
    service.create(Listing::default()).await.unwrap();

    let outcome = service.seed().await.unwrap();

    assert_eq!(outcome, SeedOutcome::AlreadySeeded(1));
    assert_eq!(outcome.count(), 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

// =========================================================
// Storage failures
// =========================================================

#[tokio::test]
async fn test_storage_failure_surfaces_for_every_operation() {
    let store = InMemoryStore::new();
    let service = service_with(&store);
    let created = service.create(Listing::default()).await.unwrap();
    let id = created.id.unwrap();
    store.set_healthy(false);

    assert!(matches!(
        service.search(&SearchParams::default()).await,
        Err(ServiceError::Storage(_))
    ));
    assert!(matches!(service.get(&id).await, Err(ServiceError::Storage(_))));
    assert!(matches!(
        service.create(Listing::default()).await,
        Err(ServiceError::Storage(_))
    ));
    assert!(matches!(
        service.update(&id, &patch(json!({ "title": "x" }))).await,
        Err(ServiceError::Storage(_))
    ));
    assert!(matches!(service.delete(&id).await, Err(ServiceError::Storage(_))));
    assert!(matches!(service.seed().await, Err(ServiceError::Storage(_))));

    store.set_healthy(true);
    assert_eq!(store.len(), 1);
}
