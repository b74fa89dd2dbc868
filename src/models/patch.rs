use serde_json::{Map, Value};

use super::Listing;

/// Listing attributes a caller may change after creation.
pub const EDITABLE_FIELDS: &[&str] = &[
    "title",
    "description",
    "price",
    "currency",
    "location",
    "address",
    "city",
    "country",
    "postcode",
    "coordinates",
    "size_m2",
    "bedrooms",
    "bathrooms",
    "property_type",
    "furnished",
    "pets_allowed",
    "parking",
    "balcony_garden",
    "featured",
    "energy_rating",
    "availability_date",
    "floorplan",
    "photos",
    "features",
    "agent_info",
];

#[derive(Debug, thiserror::Error)]
#[error("invalid listing field: {0}")]
pub struct PatchError(#[from] serde_json::Error);

/// The fields supplied in an update body, and nothing else.
///
/// Presence is what matters: a key that was not sent (or was sent as `null`)
/// is absent from the patch, so applying it never clears a stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    fields: Map<String, Value>,
}

impl ListingPatch {
    /// Build a patch from a JSON object, keeping only editable, non-null keys.
    ///
    /// Every kept value must have its field's type, otherwise the whole patch
    /// is rejected.
    pub fn from_json(body: Map<String, Value>) -> Result<Self, PatchError> {
        let fields: Map<String, Value> = body
            .into_iter()
            .filter(|(key, value)| !value.is_null() && EDITABLE_FIELDS.contains(&key.as_str()))
            .collect();

        serde_json::from_value::<Listing>(Value::Object(fields.clone()))?;

        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Merge the patch into `listing`, returning the updated record.
    pub fn apply_to(&self, listing: &Listing) -> Result<Listing, PatchError> {
        let mut document = match serde_json::to_value(listing)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in &self.fields {
            document.insert(key.clone(), value.clone());
        }
        Ok(serde_json::from_value(Value::Object(document))?)
    }
}
