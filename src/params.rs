//! Request parameter records.
//!
//! Every field is optional so that an absent value can be told apart from a
//! supplied one and reported as [`ClientError::MissingParameter`] before any
//! request is sent. Validation stops at the first missing key.

use serde::Serialize;
use serde_json::Value;

use crate::ClientError;

/// Parameters for a strain search.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
}

impl SearchParams {
    /// Starts a search for `search`. An empty string matches every strain.
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        require("search", self.search.as_ref())?;
        require("page", self.page)?;
        let take = require("take", self.take)?;
        check_take(take)
    }

    pub(crate) fn to_body(&self) -> Result<Value, ClientError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Optional flavor and condition filters for [`SearchParams`].
///
/// The service matches names case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
}

impl SearchFilters {
    #[must_use]
    pub fn flavors<I, S>(mut self, flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flavors = Some(flavors.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = Some(conditions.into_iter().map(Into::into).collect());
        self
    }
}

/// Paging parameters for the review and photo listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<u32>,
    pub take: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, take: u32) -> Self {
        Self {
            page: Some(page),
            take: Some(take),
        }
    }

    pub(crate) fn to_query(self) -> Result<Vec<(&'static str, String)>, ClientError> {
        let page = require("page", self.page)?;
        let take = require("take", self.take)?;
        check_take(take)?;
        Ok(vec![("page", page.to_string()), ("take", take.to_string())])
    }
}

/// Coordinates for the availability lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocationParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LocationParams {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    pub(crate) fn to_query(self) -> Result<Vec<(&'static str, String)>, ClientError> {
        let lat = require("lat", self.lat)?;
        let lon = require("lon", self.lon)?;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ClientError::InvalidParameter {
                parameter: "lat".to_owned(),
                reason: "latitude must be within -90..=90",
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ClientError::InvalidParameter {
                parameter: "lon".to_owned(),
                reason: "longitude must be within -180..=180",
            });
        }
        Ok(vec![("lat", lat.to_string()), ("lon", lon.to_string())])
    }
}

fn require<T>(name: &str, value: Option<T>) -> Result<T, ClientError> {
    value.ok_or_else(|| ClientError::missing(name))
}

fn check_take(take: u32) -> Result<(), ClientError> {
    if take == 0 {
        return Err(ClientError::InvalidParameter {
            parameter: "take".to_owned(),
            reason: "must be greater than zero",
        });
    }
    Ok(())
}
