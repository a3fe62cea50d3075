use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::{ClientError, Config};

const APP_ID_HEADER: &str = "app_id";
const APP_KEY_HEADER: &str = "app_key";

/// Generic async JSON REST client for the strain service.
///
/// Every request carries the configured `app_id`/`app_key` headers. For the
/// typed strain endpoints use [`crate::StrainClient`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    config: Config,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client from the given configuration.
    ///
    /// The base URL is normalized to include a trailing slash, so relative
    /// endpoint paths join correctly.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let base_url = parse_base_url(config.base_url())?;

        Ok(Self {
            base_url,
            config,
            http: reqwest::Client::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends a `GET` request with query parameters and parses the response as JSON.
    pub async fn get_json_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ClientError> {
        self.request_json_with_query(Method::GET, path, query, None)
            .await
    }

    /// Sends a `POST` request with a JSON body and parses the response as JSON.
    pub async fn post_json(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.request_json_with_query(Method::POST, path, &[], Some(body))
            .await
    }

    /// Sends a request with query parameters and parses the response as JSON.
    ///
    /// Returns [`Value::Null`] for successful responses with an empty body.
    pub async fn request_json_with_query(
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

        let response = request.send().await?;
        let status = response.status();
        let payload = response.text().await?;

        decode_response(path, status, &payload)
    }
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let parsed =
        Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_owned()))?;
    if parsed.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(base_url.to_owned()));
    }
    Ok(ensure_trailing_slash(parsed))
}

pub(crate) fn build_url(base_url: &Url, path: &str) -> Result<Url, ClientError> {
    let relative = path.trim_start_matches('/');
    base_url
        .join(relative)
        .map_err(|_| ClientError::InvalidPath(path.to_owned()))
}

pub(crate) fn credential_headers(config: &Config) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(APP_ID_HEADER, header_value(APP_ID_HEADER, config.app_id())?);
    headers.insert(
        APP_KEY_HEADER,
        header_value(APP_KEY_HEADER, config.app_key())?,
    );
    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ClientError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| ClientError::InvalidParameter {
        parameter: name.to_owned(),
        reason: "not a valid header value",
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// Maps a status code and raw payload to decoded JSON or a typed error.
pub(crate) fn decode_response(
    path: &str,
    status: StatusCode,
    payload: &str,
) -> Result<Value, ClientError> {
    tracing::debug!(%status, path, "received response");

    if status == StatusCode::NOT_FOUND {
        tracing::warn!(path, "resource not found");
        return Err(ClientError::NotFound {
            path: path.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(ClientError::HttpStatus {
            status,
            body: payload.to_owned(),
        });
    }

    if payload.trim().is_empty() {
        Ok(Value::Null)
    } else {
        Ok(serde_json::from_str(payload)?)
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}
