use crate::models::Listing;

/// Listing attribute a predicate can constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Location,
    Address,
    City,
    Country,
    Price,
    Bedrooms,
    Bathrooms,
    PropertyType,
    EnergyRating,
    Furnished,
    PetsAllowed,
    Parking,
    BalconyGarden,
    Featured,
}

impl Field {
    /// Document key of the attribute
    pub fn name(self) -> &'static str {
        match self {
            Field::Location => "location",
            Field::Address => "address",
            Field::City => "city",
            Field::Country => "country",
            Field::Price => "price",
            Field::Bedrooms => "bedrooms",
            Field::Bathrooms => "bathrooms",
            Field::PropertyType => "property_type",
            Field::EnergyRating => "energy_rating",
            Field::Furnished => "furnished",
            Field::PetsAllowed => "pets_allowed",
            Field::Parking => "parking",
            Field::BalconyGarden => "balcony_garden",
            Field::Featured => "featured",
        }
    }

    /// Current value of the attribute on `listing`.
    pub fn value_of(self, listing: &Listing) -> Option<Value> {
        let text = |v: &Option<String>| v.clone().map(Value::Text);
        match self {
            Field::Location => text(&listing.location),
            Field::Address => text(&listing.address),
            Field::City => text(&listing.city),
            Field::Country => text(&listing.country),
            Field::PropertyType => text(&listing.property_type),
            Field::EnergyRating => text(&listing.energy_rating),
            Field::Price => listing.price.map(Value::Number),
            Field::Bedrooms => listing.bedrooms.map(Value::Integer),
            Field::Bathrooms => listing.bathrooms.map(Value::Integer),
            Field::Furnished => listing.furnished.map(Value::Bool),
            Field::PetsAllowed => listing.pets_allowed.map(Value::Bool),
            Field::Parking => listing.parking.map(Value::Bool),
            Field::BalconyGarden => listing.balcony_garden.map(Value::Bool),
            Field::Featured => listing.featured.map(Value::Bool),
        }
    }
}

/// Typed operand of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Integer(u32),
    Bool(bool),
}

impl Value {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Integer(n) => Some(f64::from(*n)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gte,
    Lte,
    /// Case-insensitive substring match on text
    ContainsIgnoreCase,
}

/// Compiled search constraint over listings
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every child must match; an empty conjunction matches everything
    And(Vec<Predicate>),
    /// At least one child must match
    Or(Vec<Predicate>),
    Compare {
        field: Field,
        op: Comparison,
        value: Value,
    },
}

impl Predicate {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Predicate::And(children) => children.iter().all(|p| p.matches(listing)),
            Predicate::Or(children) => children.iter().any(|p| p.matches(listing)),
            Predicate::Compare { field, op, value } => match field.value_of(listing) {
                Some(actual) => compare(&actual, *op, value),
                None => false,
            },
        }
    }

    /// Conjunction clauses at the top level of the tree.
    pub fn clauses(&self) -> &[Predicate] {
        match self {
            Predicate::And(children) => children,
            other => std::slice::from_ref(other),
        }
    }
}

fn compare(actual: &Value, op: Comparison, expected: &Value) -> bool {
    match op {
        Comparison::Eq => actual == expected,
        Comparison::Gte => match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(e)) => a >= e,
            _ => false,
        },
        Comparison::Lte => match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(e)) => a <= e,
            _ => false,
        },
        Comparison::ContainsIgnoreCase => match (actual, expected) {
            (Value::Text(haystack), Value::Text(needle)) => haystack
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => false,
        },
    }
}

/// Accumulates clauses into a conjunction.
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    clauses: Vec<Predicate>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(&mut self, field: Field, value: Value) -> &mut Self {
        self.push(field, Comparison::Eq, value)
    }

    pub fn at_least(&mut self, field: Field, value: Value) -> &mut Self {
        self.push(field, Comparison::Gte, value)
    }

    pub fn at_most(&mut self, field: Field, value: Value) -> &mut Self {
        self.push(field, Comparison::Lte, value)
    }

    /// Match when any of `fields` contains `text`, ignoring case.
    pub fn contains_any(&mut self, fields: &[Field], text: &str) -> &mut Self {
        let alternatives = fields
            .iter()
            .map(|field| Predicate::Compare {
                field: *field,
                op: Comparison::ContainsIgnoreCase,
                value: Value::Text(text.to_string()),
            })
            .collect();
        self.clauses.push(Predicate::Or(alternatives));
        self
    }

    pub fn build(self) -> Predicate {
        Predicate::And(self.clauses)
    }

    fn push(&mut self, field: Field, op: Comparison, value: Value) -> &mut Self {
        self.clauses.push(Predicate::Compare { field, op, value });
        self
    }
}
