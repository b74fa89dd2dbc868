//! Demonstration listings used to populate an empty store.

use chrono::{Duration, Utc};

use crate::models::{AgentInfo, Coordinates, Listing};

/// Number of listings in the demonstration dataset
pub const DEMO_LISTING_COUNT: usize = 50;

/// Listings flagged as featured, counted from the start of the dataset
const FEATURED_COUNT: usize = 8;

struct CityMeta {
    city: &'static str,
    country: &'static str,
    country_label: &'static str,
    lat: f64,
    lng: f64,
    currency: &'static str,
}

const CITIES: [CityMeta; 7] = [
    CityMeta {
        city: "London",
        country: "GB",
        country_label: "United Kingdom",
        lat: 51.5074,
        lng: -0.1278,
        currency: "GBP",
    },
    CityMeta {
        city: "Manchester",
        country: "GB",
        country_label: "United Kingdom",
        lat: 53.4808,
        lng: -2.2426,
        currency: "GBP",
    },
    CityMeta {
        city: "Birmingham",
        country: "GB",
        country_label: "United Kingdom",
        lat: 52.4862,
        lng: -1.8904,
        currency: "GBP",
    },
    CityMeta {
        city: "Paris",
        country: "FR",
        country_label: "France",
        lat: 48.8566,
        lng: 2.3522,
        currency: "EUR",
    },
    CityMeta {
        city: "Lyon",
        country: "FR",
        country_label: "France",
        lat: 45.764,
        lng: 4.8357,
        currency: "EUR",
    },
    CityMeta {
        city: "Berlin",
        country: "DE",
        country_label: "Germany",
        lat: 52.52,
        lng: 13.405,
        currency: "EUR",
    },
    CityMeta {
        city: "Munich",
        country: "DE",
        country_label: "Germany",
        lat: 48.1351,
        lng: 11.582,
        currency: "EUR",
    },
];

const PROPERTY_TYPES: [&str; 3] = ["flat", "house", "studio"];

const ENERGY_RATINGS: [Option<&str>; 4] = [Some("A"), Some("B"), Some("C"), None];

// (id, name, email, picture)
const AGENTS: [(&str, &str, &str, &str); 5] = [
    (
        "agent-sarah",
        "Sarah Johnson",
        "sarah@homzy.com",
        "https://randomuser.me/api/portraits/women/1.jpg",
    ),
    (
        "agent-james",
        "James Carter",
        "james@homzy.com",
        "https://randomuser.me/api/portraits/men/2.jpg",
    ),
    (
        "agent-amelie",
        "Amelie Laurent",
        "amelie@homzy.com",
        "https://randomuser.me/api/portraits/women/3.jpg",
    ),
    (
        "agent-hans",
        "Hans Mueller",
        "hans@homzy.com",
        "https://randomuser.me/api/portraits/men/4.jpg",
    ),
    (
        "agent-ayse",
        "Ayse Demir",
        "ayse@homzy.com",
        "https://randomuser.me/api/portraits/women/5.jpg",
    ),
];

const PHOTOS: [&str; 5] = [
    "https://images.unsplash.com/photo-1505693416388-ac5ce068fe85?w=1200",
    "https://images.unsplash.com/photo-1470246973918-29a93221c455?w=1200",
    "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=1200",
    "https://images.unsplash.com/photo-1507089947368-19c1da9775ae?w=1200",
    "https://images.unsplash.com/photo-1501045661006-fcebe0257c3f?w=1200",
];

fn base_features(property_type: &str) -> Vec<String> {
    let mut features = vec!["High-Speed WiFi", "Smart Thermostat", "Double Glazing"];
    match property_type {
        "flat" => features.extend(["Elevator Access", "Concierge"]),
        "house" => features.extend(["Private Garden", "Driveway"]),
        _ => features.extend(["Compact Layout", "Co-working Desk"]),
    }
    features.into_iter().map(String::from).collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generate the fixed demonstration dataset.
///
/// Everything is derived from the position in the dataset except the
/// availability dates, which are relative to today. `id` and `created_at` are
/// left for the store to assign.
pub fn demo_listings() -> Vec<Listing> {
    let today = Utc::now().date_naive();

    (0..DEMO_LISTING_COUNT)
        .map(|idx| {
            let city = &CITIES[idx % CITIES.len()];
            let property_type = PROPERTY_TYPES[idx % PROPERTY_TYPES.len()];
            let (agent_id, agent_name, agent_email, agent_picture) = AGENTS[idx % AGENTS.len()];
            let n = idx as u32;

            let price_base = f64::from(750 + n * 45);
            let price = if city.currency == "EUR" {
                price_base
            } else {
                (price_base * 0.78 * 100.0).round() / 100.0
            };
            let availability = today + Duration::days(14 + i64::from(n));

            Listing {
                title: Some(format!("{} {} #{}", city.city, title_case(property_type), idx + 1)),
                description: Some(format!(
                    "Light-filled {property_type} in {} with modern finishes, close to transport and amenities.",
                    city.city
                )),
                price: Some(price),
                currency: Some(city.currency.to_string()),
                location: Some(format!("{}, {}", city.city, city.country_label)),
                address: Some(format!("{} Main Street, {}", 10 + idx, city.city)),
                city: Some(city.city.to_string()),
                country: Some(city.country.to_string()),
                coordinates: Some(Coordinates {
                    lat: city.lat,
                    lng: city.lng,
                }),
                size_m2: Some(f64::from(45 + n * 3)),
                bedrooms: Some(1 + n % 4),
                bathrooms: Some(1 + n % 2),
                property_type: Some(property_type.to_string()),
                furnished: Some(idx % 2 == 0),
                pets_allowed: Some(idx % 3 == 0),
                parking: Some(idx % 4 != 1),
                balcony_garden: Some(idx % 2 == 0),
                featured: Some(idx < FEATURED_COUNT),
                energy_rating: ENERGY_RATINGS[idx % ENERGY_RATINGS.len()].map(String::from),
                availability_date: Some(availability.format("%Y-%m-%d").to_string()),
                photos: Some(PHOTOS[..3 + idx % 2].iter().map(|p| p.to_string()).collect()),
                features: Some(base_features(property_type)),
                agent_info: Some(AgentInfo {
                    id: Some(agent_id.to_string()),
                    name: Some(agent_name.to_string()),
                    email: Some(agent_email.to_string()),
                    picture: Some(agent_picture.to_string()),
                }),
                ..Default::default()
            }
        })
        .collect()
}
