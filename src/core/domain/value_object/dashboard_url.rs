use crate::core::domain::{error::ValidationError, value_object::endpoint_kind::EndpointKind};
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];
// RFC 7230 practical limit
const MAX_URL_LENGTH: usize = 2083;

/// A validated base URL of the backend passthrough (e.g. `https://host/proxy.php`).
///
/// Endpoint URLs are derived from it by setting the `type` query parameter;
/// any query already present on the base is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardUrl(Url);

impl DashboardUrl {
    /// Parses and validates a base URL.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        validate_url(raw)?;
        Url::parse(raw)
            .map(Self)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))
    }

    /// URL for one of the two backend resources.
    #[must_use]
    pub fn endpoint(&self, kind: EndpointKind) -> Url {
        let mut url = self.0.clone();
        url.set_query(None);
        url.query_pairs_mut().append_pair("type", kind.as_query());
        url
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validates a base URL: non-empty, bounded length, parseable, http(s) with a host.
pub(crate) fn validate_url(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }

    if raw.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let parsed = Url::parse(raw)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            ALLOWED_SCHEMES.join(", ")
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL must include a host".to_string(),
        });
    }

    Ok(())
}
