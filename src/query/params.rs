use serde::{Deserialize, Serialize};

/// A search criterion a caller may supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Location,
    MinPrice,
    MaxPrice,
    Bedrooms,
    Bathrooms,
    PropertyType,
    Country,
    EnergyRating,
    Furnished,
    PetsAllowed,
    Parking,
    BalconyGarden,
    Featured,
    Limit,
}

impl Criterion {
    pub const ALL: [Criterion; 14] = [
        Criterion::Location,
        Criterion::MinPrice,
        Criterion::MaxPrice,
        Criterion::Bedrooms,
        Criterion::Bathrooms,
        Criterion::PropertyType,
        Criterion::Country,
        Criterion::EnergyRating,
        Criterion::Furnished,
        Criterion::PetsAllowed,
        Criterion::Parking,
        Criterion::BalconyGarden,
        Criterion::Featured,
        Criterion::Limit,
    ];

    /// Query-string name of the criterion
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Location => "location",
            Criterion::MinPrice => "min_price",
            Criterion::MaxPrice => "max_price",
            Criterion::Bedrooms => "bedrooms",
            Criterion::Bathrooms => "bathrooms",
            Criterion::PropertyType => "property_type",
            Criterion::Country => "country",
            Criterion::EnergyRating => "energy_rating",
            Criterion::Furnished => "furnished",
            Criterion::PetsAllowed => "pets_allowed",
            Criterion::Parking => "parking",
            Criterion::BalconyGarden => "balcony_garden",
            Criterion::Featured => "featured",
            Criterion::Limit => "limit",
        }
    }
}

/// Search parameters for listing queries
///
/// Values are kept as the raw strings the caller sent; typing happens in the
/// compiler so a bad value can be reported against its criterion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchParams {
    /// Free text matched against location, address and city
    pub location: Option<String>,
    /// Minimum price, inclusive
    pub min_price: Option<String>,
    /// Maximum price, inclusive
    pub max_price: Option<String>,
    /// Exact number of bedrooms
    pub bedrooms: Option<String>,
    /// Exact number of bathrooms
    pub bathrooms: Option<String>,
    pub property_type: Option<String>,
    pub country: Option<String>,
    pub energy_rating: Option<String>,
    pub furnished: Option<String>,
    pub pets_allowed: Option<String>,
    pub parking: Option<String>,
    pub balcony_garden: Option<String>,
    pub featured: Option<String>,
    /// Maximum number of results, 50 when absent
    pub limit: Option<String>,
}

impl SearchParams {
    /// Raw value supplied for `criterion`, if any.
    pub fn raw(&self, criterion: Criterion) -> Option<&str> {
        let value = match criterion {
            Criterion::Location => &self.location,
            Criterion::MinPrice => &self.min_price,
            Criterion::MaxPrice => &self.max_price,
            Criterion::Bedrooms => &self.bedrooms,
            Criterion::Bathrooms => &self.bathrooms,
            Criterion::PropertyType => &self.property_type,
            Criterion::Country => &self.country,
            Criterion::EnergyRating => &self.energy_rating,
            Criterion::Furnished => &self.furnished,
            Criterion::PetsAllowed => &self.pets_allowed,
            Criterion::Parking => &self.parking,
            Criterion::BalconyGarden => &self.balcony_garden,
            Criterion::Featured => &self.featured,
            Criterion::Limit => &self.limit,
        };
        value.as_deref()
    }

    /// Set the raw value for `criterion`.
    pub fn with(mut self, criterion: Criterion, value: impl Into<String>) -> Self {
        let slot = match criterion {
            Criterion::Location => &mut self.location,
            Criterion::MinPrice => &mut self.min_price,
            Criterion::MaxPrice => &mut self.max_price,
            Criterion::Bedrooms => &mut self.bedrooms,
            Criterion::Bathrooms => &mut self.bathrooms,
            Criterion::PropertyType => &mut self.property_type,
            Criterion::Country => &mut self.country,
            Criterion::EnergyRating => &mut self.energy_rating,
            Criterion::Furnished => &mut self.furnished,
            Criterion::PetsAllowed => &mut self.pets_allowed,
            Criterion::Parking => &mut self.parking,
            Criterion::BalconyGarden => &mut self.balcony_garden,
            Criterion::Featured => &mut self.featured,
            Criterion::Limit => &mut self.limit,
        };
        *slot = Some(value.into());
        self
    }
}
