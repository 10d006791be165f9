use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for dashboard operations.
///
/// Every variant is recoverable: the sync flows log it and keep the
/// current view, and the next poll cycle acts as the retry.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Transport failure, or a response body that is not JSON at all
    ///
    /// # Fields
    /// * `0` - A description of what went wrong while talking to the backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backend answered with a JSON error object
    ///
    /// # Fields
    /// * `status` - HTTP status of the reply (may be a success status)
    /// * `message` - The `error` field of the reply body
    #[error("Backend error ({status}): {message}")]
    Backend { status: StatusCode, message: String },

    /// The payload was JSON but did not have the expected shape
    ///
    /// # Fields
    /// * `0` - Description of the shape violation
    #[error("Payload error: {0}")]
    Payload(String),

    /// Represents validation failures with detailed context
    ///
    /// # Fields
    /// * `source` - The underlying validation error
    #[error("Validation error: {source}")]
    Validation { source: ValidationError },

    /// A view capability refused an operation (e.g. clipboard access)
    #[error("View error: {0}")]
    View(String),
}

impl From<ValidationError> for DashboardError {
    fn from(error: ValidationError) -> Self {
        DashboardError::Validation { source: error }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a DashboardError
pub type DashboardResult<T> = Result<T, DashboardError>;
