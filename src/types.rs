//! Typed response records.
//!
//! Field names follow the service's wire format exactly. Fields the client
//! does not model are kept in a flattened `extra` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a strain search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrainSearchResult {
    #[serde(rename = "Strains", default)]
    pub strains: Vec<Strain>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One strain entry of a search result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Strain {
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "Flavors", default)]
    pub flavors: Vec<NamedRecord>,
    #[serde(rename = "Conditions", default)]
    pub conditions: Vec<NamedRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Strain {
    /// Lower-cased flavor names.
    pub fn flavor_names(&self) -> Vec<String> {
        lowercase_names(&self.flavors)
    }

    /// Lower-cased condition names.
    pub fn condition_names(&self) -> Vec<String> {
        lowercase_names(&self.conditions)
    }
}

/// A `{ "Name": ... }` record such as a flavor or condition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lowercase_names(records: &[NamedRecord]) -> Vec<String> {
    records.iter().map(|record| record.name.to_lowercase()).collect()
}

/// Full description of one strain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrainDetails {
    pub slug: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Page index and size echoed back by paginated endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PagingContext {
    #[serde(rename = "PageIndex")]
    pub page_index: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewsPage {
    pub reviews: Vec<Review>,
    #[serde(rename = "pagingContext")]
    pub paging_context: PagingContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    #[serde(rename = "strainSlug", default)]
    pub strain_slug: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotosPage {
    pub photos: Vec<Photo>,
    #[serde(rename = "pagingContext")]
    pub paging_context: PagingContext,
}

/// A strain photo; all fields are kept as returned.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo {
    pub fields: Map<String, Value>,
}

/// A dispensary offering a strain near the requested coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability {
    pub fields: Map<String, Value>,
}

/// Availability results are returned without a paging envelope.
pub type AvailabilityList = Vec<Availability>;
