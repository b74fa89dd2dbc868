use tracing::debug;

use super::params::{Criterion, SearchParams};
use super::predicate::{Field, Predicate, PredicateBuilder, Value};

/// Result cap applied when the caller does not send `limit`
pub const DEFAULT_LIMIT: usize = 50;

/// Fields searched by the free-text `location` criterion
const LOCATION_FIELDS: [Field; 3] = [Field::Location, Field::Address, Field::City];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("invalid value {value:?} for {criterion}: expected {expected}")]
    Invalid {
        criterion: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
}

impl SortKey {
    pub fn name(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const NEWEST_FIRST: SortOrder = SortOrder {
        key: SortKey::CreatedAt,
        direction: SortDirection::Descending,
    };
}

/// A search ready to hand to a data store
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub predicate: Predicate,
    pub limit: usize,
    pub sort: SortOrder,
}

/// Compile the supplied criteria into a single predicate, limit and sort.
pub fn compile(params: &SearchParams) -> Result<CompiledQuery, CriteriaError> {
    let mut builder = PredicateBuilder::new();
    let mut limit = DEFAULT_LIMIT;

    for criterion in Criterion::ALL {
        let Some(raw) = params.raw(criterion) else {
            continue;
        };

        match criterion {
            Criterion::Location => {
                if !raw.is_empty() {
                    builder.contains_any(&LOCATION_FIELDS, raw);
                }
            }
            Criterion::MinPrice => {
                builder.at_least(Field::Price, Value::Number(parse_price(criterion, raw)?));
            }
            Criterion::MaxPrice => {
                builder.at_most(Field::Price, Value::Number(parse_price(criterion, raw)?));
            }
            Criterion::Bedrooms => {
                builder.equals(Field::Bedrooms, Value::Integer(parse_count(criterion, raw)?));
            }
            Criterion::Bathrooms => {
                builder.equals(Field::Bathrooms, Value::Integer(parse_count(criterion, raw)?));
            }
            Criterion::PropertyType => exact_text(&mut builder, Field::PropertyType, raw),
            Criterion::Country => exact_text(&mut builder, Field::Country, raw),
            Criterion::EnergyRating => exact_text(&mut builder, Field::EnergyRating, raw),
            Criterion::Furnished => tri_state(&mut builder, Field::Furnished, raw),
            Criterion::PetsAllowed => tri_state(&mut builder, Field::PetsAllowed, raw),
            Criterion::Parking => tri_state(&mut builder, Field::Parking, raw),
            Criterion::BalconyGarden => tri_state(&mut builder, Field::BalconyGarden, raw),
            Criterion::Featured => tri_state(&mut builder, Field::Featured, raw),
            Criterion::Limit => {
                limit = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(criterion, raw, "a non-negative integer"))?;
            }
        }
    }

    let query = CompiledQuery {
        predicate: builder.build(),
        limit,
        sort: SortOrder::NEWEST_FIRST,
    };
    debug!(?query, "compiled listing search");
    Ok(query)
}

fn exact_text(builder: &mut PredicateBuilder, field: Field, raw: &str) {
    if !raw.is_empty() {
        builder.equals(field, Value::Text(raw.to_string()));
    }
}

// Anything other than the literal "true" constrains to false.
fn tri_state(builder: &mut PredicateBuilder, field: Field, raw: &str) {
    builder.equals(field, Value::Bool(raw == "true"));
}

fn parse_price(criterion: Criterion, raw: &str) -> Result<f64, CriteriaError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| invalid(criterion, raw, "a number"))
}

fn parse_count(criterion: Criterion, raw: &str) -> Result<u32, CriteriaError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| invalid(criterion, raw, "a non-negative integer"))
}

fn invalid(criterion: Criterion, raw: &str, expected: &'static str) -> CriteriaError {
    CriteriaError::Invalid {
        criterion: criterion.name(),
        value: raw.to_string(),
        expected,
    }
}
