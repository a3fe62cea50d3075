use reqwest::Method;
use url::form_urlencoded::byte_serialize;

use crate::ClientError;

/// Metadata for one remote strain operation.
#[derive(Clone, Copy, Debug)]
pub struct OperationDefinition {
    /// Stable operation identifier.
    pub operation_id: &'static str,
    /// Uppercase HTTP method (for example `GET`, `POST`).
    pub method: &'static str,
    /// Path template, potentially containing `{param}` placeholders.
    pub path_template: &'static str,
    /// Required path parameter names appearing in `path_template`.
    pub path_params: &'static [&'static str],
}

pub(crate) const STRAINS_SEARCH: &OperationDefinition = &OPERATIONS[0];
pub(crate) const STRAINS_SHOW: &OperationDefinition = &OPERATIONS[1];
pub(crate) const STRAINS_REVIEWS_INDEX: &OperationDefinition = &OPERATIONS[2];
pub(crate) const STRAINS_REVIEWS_SHOW: &OperationDefinition = &OPERATIONS[3];
pub(crate) const STRAINS_PHOTOS_INDEX: &OperationDefinition = &OPERATIONS[4];
pub(crate) const STRAINS_AVAILABILITIES_INDEX: &OperationDefinition = &OPERATIONS[5];

const OPERATIONS: [OperationDefinition; 6] = [
    OperationDefinition {
        operation_id: "strains_search",
        method: "POST",
        path_template: "/strains",
        path_params: &[],
    },
    OperationDefinition {
        operation_id: "strains_show",
        method: "GET",
        path_template: "/strains/{strain_slug}",
        path_params: &["strain_slug"],
    },
    OperationDefinition {
        operation_id: "strains_reviews_index",
        method: "GET",
        path_template: "/strains/{strain_slug}/reviews",
        path_params: &["strain_slug"],
    },
    OperationDefinition {
        operation_id: "strains_reviews_show",
        method: "GET",
        path_template: "/strains/{strain_slug}/reviews/{review_id}",
        path_params: &["strain_slug", "review_id"],
    },
    OperationDefinition {
        operation_id: "strains_photos_index",
        method: "GET",
        path_template: "/strains/{strain_slug}/photos",
        path_params: &["strain_slug"],
    },
    OperationDefinition {
        operation_id: "strains_availabilities_index",
        method: "GET",
        path_template: "/strains/{strain_slug}/availability",
        path_params: &["strain_slug"],
    },
];

/// Returns every operation the strain client knows how to call.
pub fn operations() -> &'static [OperationDefinition] {
    &OPERATIONS
}

/// Looks an operation up by its identifier.
pub fn find_operation(operation_id: &str) -> Option<&'static OperationDefinition> {
    OPERATIONS.iter().find(|op| op.operation_id == operation_id)
}

impl OperationDefinition {
    pub(crate) fn http_method(&self) -> Method {
        match self.method {
            "POST" => Method::POST,
            _ => Method::GET,
        }
    }

    /// Replaces `{param}` placeholders with percent-encoded values.
    ///
    /// An absent or empty value for a placeholder returns
    /// [`ClientError::MissingParameter`]; `.` and `..` return
    /// [`ClientError::InvalidParameter`], since URL joining would resolve them
    /// as dot segments.
    pub fn render_path(&self, path_params: &[(&str, &str)]) -> Result<String, ClientError> {
        let mut rendered = self.path_template.to_owned();

        for required_param in self.path_params {
            let value = path_params
                .iter()
                .find(|(name, _)| name == required_param)
                .map(|(_, value)| *value)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ClientError::missing(*required_param))?;
            if matches!(value, "." | "..") {
                return Err(ClientError::InvalidParameter {
                    parameter: (*required_param).to_owned(),
                    reason: "dot segments are not allowed in paths",
                });
            }

            let placeholder = format!("{{{required_param}}}");
            rendered = rendered.replace(&placeholder, &encode_path_segment(value));
        }

        Ok(rendered)
    }
}

// `byte_serialize` produces form encoding; a literal `+` is already `%2B`.
fn encode_path_segment(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
