/// Simplified error system - one enum, a few lookup cases
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Lookup(LookupError),
    ValidationError(String),
    RenderingError(String),
    ConfigurationError(String),
}

/// A signal, trade or ticker points at data that is not there
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    MissingTimestamp { timestamp: i64 },
    PositionOutOfRange { position: usize, len: usize },
    UnknownTicker(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Lookup(e) => write!(f, "Lookup Error: {}", e),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::MissingTimestamp { timestamp } => {
                write!(f, "timestamp {} is not present in the price series", timestamp)
            }
            LookupError::PositionOutOfRange { position, len } => {
                write!(f, "position {} is out of range for a price series of length {}", position, len)
            }
            LookupError::UnknownTicker(ticker) => write!(f, "no price table loaded for ticker {}", ticker),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for LookupError {}

impl From<LookupError> for AppError {
    fn from(error: LookupError) -> Self {
        AppError::Lookup(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::ConfigurationError(error.to_string())
    }
}

// Simple convenience type aliases
pub type VisualsResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
