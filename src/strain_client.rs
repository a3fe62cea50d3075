use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::operations::{
    OperationDefinition, STRAINS_AVAILABILITIES_INDEX, STRAINS_PHOTOS_INDEX,
    STRAINS_REVIEWS_INDEX, STRAINS_REVIEWS_SHOW, STRAINS_SEARCH, STRAINS_SHOW,
};
use crate::params::{LocationParams, PageParams, SearchParams};
use crate::types::{
    AvailabilityList, PhotosPage, Review, ReviewsPage, StrainDetails, StrainSearchResult,
};
use crate::{ApiClient, BlockingApiClient, ClientError, Config};

/// Async client for the strain endpoints.
///
/// Parameters are validated before any request is sent; see
/// [`ClientError::MissingParameter`].
#[derive(Clone, Debug)]
pub struct StrainClient {
    inner: ApiClient,
}

impl StrainClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Ok(Self {
            inner: ApiClient::new(config)?,
        })
    }

    /// Creates a client from `STRAIN_APP_ID`, `STRAIN_APP_KEY` and the optional
    /// `STRAIN_BASE_URL`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(Config::from_env()?)
    }

    pub fn config(&self) -> &Config {
        self.inner.config()
    }

    /// Searches strains by name, optionally filtered by flavors and conditions.
    ///
    /// `search`, `page` and `take` are required; `search` may be empty.
    pub async fn search(&self, params: &SearchParams) -> Result<StrainSearchResult, ClientError> {
        self.execute(prepare_search(params)?).await
    }

    /// Fetches one strain by slug.
    pub async fn details(&self, slug: &str) -> Result<StrainDetails, ClientError> {
        self.execute(prepare_details(slug)?).await
    }

    /// Lists reviews of a strain, one page at a time.
    pub async fn reviews(&self, slug: &str, params: PageParams) -> Result<ReviewsPage, ClientError> {
        self.execute(prepare_paged(STRAINS_REVIEWS_INDEX, slug, params)?)
            .await
    }

    /// Fetches a single review of a strain.
    pub async fn review_details(&self, slug: &str, review_id: u64) -> Result<Review, ClientError> {
        self.execute(prepare_review_details(slug, review_id)?).await
    }

    /// Lists photos of a strain, one page at a time.
    pub async fn photos(&self, slug: &str, params: PageParams) -> Result<PhotosPage, ClientError> {
        self.execute(prepare_paged(STRAINS_PHOTOS_INDEX, slug, params)?)
            .await
    }

    /// Lists locations near `lat`/`lon` carrying the strain.
    pub async fn availabilities(
        &self,
        slug: &str,
        params: LocationParams,
    ) -> Result<AvailabilityList, ClientError> {
        self.execute(prepare_availabilities(slug, params)?).await
    }

    async fn execute<T: DeserializeOwned>(&self, call: PreparedCall) -> Result<T, ClientError> {
        let value = self
            .inner
            .request_json_with_query(call.method, &call.path, &call.query, call.body)
            .await?;
        decode(call.operation, value)
    }
}

/// Blocking client for the strain endpoints.
///
/// This is the synchronous counterpart of [`StrainClient`].
#[derive(Debug)]
pub struct BlockingStrainClient {
    inner: BlockingApiClient,
}

impl BlockingStrainClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Ok(Self {
            inner: BlockingApiClient::new(config)?,
        })
    }

    /// Creates a client from `STRAIN_APP_ID`, `STRAIN_APP_KEY` and the optional
    /// `STRAIN_BASE_URL`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(Config::from_env()?)
    }

    pub fn config(&self) -> &Config {
        self.inner.config()
    }

    /// Searches strains by name, optionally filtered by flavors and conditions.
    ///
    /// `search`, `page` and `take` are required; `search` may be empty.
    pub fn search(&self, params: &SearchParams) -> Result<StrainSearchResult, ClientError> {
        self.execute(prepare_search(params)?)
    }

    /// Fetches one strain by slug.
    pub fn details(&self, slug: &str) -> Result<StrainDetails, ClientError> {
        self.execute(prepare_details(slug)?)
    }

    /// Lists reviews of a strain, one page at a time.
    pub fn reviews(&self, slug: &str, params: PageParams) -> Result<ReviewsPage, ClientError> {
        self.execute(prepare_paged(STRAINS_REVIEWS_INDEX, slug, params)?)
    }

    /// Fetches a single review of a strain.
    pub fn review_details(&self, slug: &str, review_id: u64) -> Result<Review, ClientError> {
        self.execute(prepare_review_details(slug, review_id)?)
    }

    /// Lists photos of a strain, one page at a time.
    pub fn photos(&self, slug: &str, params: PageParams) -> Result<PhotosPage, ClientError> {
        self.execute(prepare_paged(STRAINS_PHOTOS_INDEX, slug, params)?)
    }

    /// Lists locations near `lat`/`lon` carrying the strain.
    pub fn availabilities(
        &self,
        slug: &str,
        params: LocationParams,
    ) -> Result<AvailabilityList, ClientError> {
        self.execute(prepare_availabilities(slug, params)?)
    }

    fn execute<T: DeserializeOwned>(&self, call: PreparedCall) -> Result<T, ClientError> {
        let value = self
            .inner
            .request_json_with_query(call.method, &call.path, &call.query, call.body)?;
        decode(call.operation, value)
    }
}

/// A validated request, ready to hand to the transport.
#[derive(Debug)]
struct PreparedCall {
    operation: &'static str,
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl PreparedCall {
    fn new(operation: &'static OperationDefinition, path: String) -> Self {
        Self {
            operation: operation.operation_id,
            method: operation.http_method(),
            path,
            query: Vec::new(),
            body: None,
        }
    }
}

fn prepare_search(params: &SearchParams) -> Result<PreparedCall, ClientError> {
    params.validate()?;
    let mut call = PreparedCall::new(STRAINS_SEARCH, STRAINS_SEARCH.render_path(&[])?);
    call.body = Some(params.to_body()?);
    Ok(call)
}

fn prepare_details(slug: &str) -> Result<PreparedCall, ClientError> {
    let path = STRAINS_SHOW.render_path(&[("strain_slug", slug)])?;
    Ok(PreparedCall::new(STRAINS_SHOW, path))
}

fn prepare_paged(
    operation: &'static OperationDefinition,
    slug: &str,
    params: PageParams,
) -> Result<PreparedCall, ClientError> {
    let query = params.to_query()?;
    let mut call = PreparedCall::new(operation, operation.render_path(&[("strain_slug", slug)])?);
    call.query = query;
    Ok(call)
}

fn prepare_review_details(slug: &str, review_id: u64) -> Result<PreparedCall, ClientError> {
    let review_id = review_id.to_string();
    let path = STRAINS_REVIEWS_SHOW
        .render_path(&[("strain_slug", slug), ("review_id", review_id.as_str())])?;
    Ok(PreparedCall::new(STRAINS_REVIEWS_SHOW, path))
}

fn prepare_availabilities(slug: &str, params: LocationParams) -> Result<PreparedCall, ClientError> {
    let query = params.to_query()?;
    let operation = STRAINS_AVAILABILITIES_INDEX;
    let mut call = PreparedCall::new(operation, operation.render_path(&[("strain_slug", slug)])?);
    call.query = query;
    Ok(call)
}

fn decode<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|error| {
        tracing::debug!(operation, %error, "response did not match the expected shape");
        ClientError::Json(error)
    })
}
