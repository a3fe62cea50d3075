//! Rust client library for the Leafly strain information API.
//!
//! Public API layers:
//! - [`StrainClient`]/[`BlockingStrainClient`]: typed strain endpoints
//!   (search, details, reviews, photos, availability).
//! - [`ApiClient`]/[`BlockingApiClient`]: generic JSON HTTP clients that
//!   inject the `app_id`/`app_key` credentials.
//! - [`Config`]: credentials and base URL held by a client.
//! - [`ClientError`]: unified error type used by all clients.

mod blocking_client;
mod client;
mod config;
mod error;
mod operations;
mod params;
mod strain_client;
mod types;

/// Generic blocking JSON REST client.
pub use blocking_client::BlockingApiClient;
/// Generic async JSON REST client.
pub use client::ApiClient;
pub use config::{APP_ID_ENV, APP_KEY_ENV, BASE_URL_ENV, Config, DEFAULT_BASE_URL};
/// Error type returned by all client operations.
pub use error::ClientError;
pub use operations::{OperationDefinition, find_operation, operations};
pub use params::{LocationParams, PageParams, SearchFilters, SearchParams};
/// Typed strain clients.
///
/// See [`StrainClient`] for the async variant.
pub use strain_client::{BlockingStrainClient, StrainClient};
pub use types::{
    Availability, AvailabilityList, NamedRecord, PagingContext, Photo, PhotosPage, Review,
    ReviewsPage, Strain, StrainDetails, StrainSearchResult,
};
