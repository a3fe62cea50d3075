use reqwest::{Method, Url};
use serde_json::Value;

use crate::client::{build_url, credential_headers, decode_response, parse_base_url};
use crate::{ClientError, Config};

/// Generic blocking JSON REST client for the strain service.
///
/// This is the synchronous counterpart of [`crate::ApiClient`].
#[derive(Debug)]
pub struct BlockingApiClient {
    base_url: Url,
    config: Config,
    http: reqwest::blocking::Client,
}

impl BlockingApiClient {
    /// Creates a new client from the given configuration.
    ///
    /// The base URL is normalized to include a trailing slash, so relative
    /// endpoint paths join correctly.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let base_url = parse_base_url(config.base_url())?;

        Ok(Self {
            base_url,
            config,
            http: reqwest::blocking::Client::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends a `GET` request with query parameters and parses the response as JSON.
    pub fn get_json_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ClientError> {
        self.request_json_with_query(Method::GET, path, query, None)
    }

    /// Sends a `POST` request with a JSON body and parses the response as JSON.
    pub fn post_json(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.request_json_with_query(Method::POST, path, &[], Some(body))
    }

    /// Sends a request with query parameters and parses the response as JSON.
    ///
    /// Returns [`Value::Null`] for successful responses with an empty body.
    pub fn request_json_with_query(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let url = build_url(&self.base_url, path)?;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method, url)
            .headers(credential_headers(&self.config)?);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(json_body) = body {
            request = request.json(&json_body);
        }

        let response = request.send()?;
        let status = response.status();
        let payload = response.text()?;

        decode_response(path, status, &payload)
    }
}
