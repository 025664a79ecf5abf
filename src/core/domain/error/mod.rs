use thiserror::Error;

/// The main error type for vSphere inventory operations.
///
/// This enum represents all possible errors that can occur while talking
/// to the inventory API and producing a report, including connection,
/// authentication, validation and navigation failures.
#[derive(Error, Debug)]
pub enum VsphereError {
    /// Represents errors that occur during connection attempts
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the connection attempt
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents authentication failures
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Represents validation failures with detailed context
    ///
    /// # Fields
    /// * `source` - The underlying validation error
    #[error("Validation error: {source}")]
    Validation { source: ValidationError },

    /// The API answered with a non-success status
    ///
    /// # Fields
    /// * `status` - HTTP status code
    /// * `message` - Fault text reported by the server, if any
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The compute clusters of the selected datacenter could not be listed
    #[error("Error getting clusters: {source}")]
    ClusterListing { source: Box<VsphereError> },

    /// An inventory object could not be located
    #[error("Not found: {0}")]
    NotFound(String),

    /// The report document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for VsphereError {
    fn from(error: ValidationError) -> Self {
        VsphereError::Validation { source: error }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a VsphereError
pub type VsphereResult<T> = Result<T, VsphereError>;
