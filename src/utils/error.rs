use thiserror::Error;

#[derive(Error, Debug)]
pub enum BingoError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("PDF generation error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Image decode error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Not enough species to fill the requested card size: have {available}, need {required}")]
    CapacityError { available: usize, required: usize },

    #[error("Place not found: {query}")]
    PlaceNotFound { query: String },

    #[error("Upstream species query failed: {message}")]
    UpstreamError { message: String },
}

/// Coarse severity used by the CLI to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad input or config; the user can fix and retry.
    Input,
    /// The upstream service misbehaved; retrying later may help.
    Upstream,
    /// Local processing or IO failure.
    Processing,
}

impl BingoError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BingoError::ConfigError { .. }
            | BingoError::InvalidConfigValueError { .. }
            | BingoError::CapacityError { .. }
            | BingoError::PlaceNotFound { .. } => ErrorSeverity::Input,
            BingoError::ApiError(_) | BingoError::UpstreamError { .. } => ErrorSeverity::Upstream,
            _ => ErrorSeverity::Processing,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BingoError::CapacityError {
                available,
                required,
            } => format!(
                "Only {} qualifying species were found, but the requested card needs {}.",
                available, required
            ),
            BingoError::PlaceNotFound { query } => {
                format!("No iNaturalist place matched \"{}\".", query)
            }
            BingoError::UpstreamError { message } => {
                format!("Could not fetch species data from iNaturalist: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.severity() {
            ErrorSeverity::Input => {
                "Adjust the command-line options (try a smaller grid, a larger species pool, or a different place) and run again."
            }
            ErrorSeverity::Upstream => {
                "Check your network connection and retry in a few minutes; the iNaturalist API may be rate limiting."
            }
            ErrorSeverity::Processing => {
                "Check that the output directory is writable and that there is enough disk space."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BingoError>;
