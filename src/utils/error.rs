use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Model API key is not configured. Set GEMINI_API_KEY or pass --api-key")]
    MissingApiKeyError,

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Model request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Model API returned status {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("Model returned no text output")]
    EmptyModelOutputError,

    #[error("Failed to parse model response: {message}")]
    ParseError { message: String },

    #[error("No usable colleges in model response")]
    EmptyResultError,

    #[error("No colleges found in {location}")]
    NoResultsError { location: String },

    #[error("Search failed for {location}")]
    SearchFailedError { location: String },

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Parse,
    Search,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::MissingApiKeyError
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            FinderError::ApiError(_)
            | FinderError::ApiStatusError { .. }
            | FinderError::EmptyModelOutputError => ErrorCategory::Transport,
            FinderError::ParseError { .. } | FinderError::EmptyResultError => ErrorCategory::Parse,
            FinderError::NoResultsError { .. } | FinderError::SearchFailedError { .. } => {
                ErrorCategory::Search
            }
            FinderError::CsvError(_)
            | FinderError::IoError(_)
            | FinderError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Transport | ErrorCategory::Parse => ErrorSeverity::Medium,
            ErrorCategory::Search => match self {
                FinderError::NoResultsError { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Output => ErrorSeverity::High,
        }
    }

    /// 搜尋流程中可以觸發一次備援查詢的錯誤
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Transport | ErrorCategory::Parse
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FinderError::MissingApiKeyError => {
                "Add GEMINI_API_KEY to your environment or set model.api_key in the config file"
            }
            FinderError::InvalidConfigValueError { .. }
            | FinderError::ConfigValidationError { .. } => {
                "Check the command-line flags and the TOML config file"
            }
            FinderError::ApiError(_) => "Check your internet connection and try again",
            FinderError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that the API key is valid and has access to the model"
            }
            FinderError::ApiStatusError { status, .. } if *status == 429 => {
                "The model quota is exhausted, wait a moment and try again"
            }
            FinderError::ApiStatusError { .. } | FinderError::EmptyModelOutputError => {
                "The model service did not answer properly, try again later"
            }
            FinderError::ParseError { .. } | FinderError::EmptyResultError => {
                "Try the search again, model output varies between requests"
            }
            FinderError::NoResultsError { .. } => {
                "Try a different location or check the spelling"
            }
            FinderError::SearchFailedError { .. } => {
                "Check your internet connection and API key, or try a different location"
            }
            FinderError::CsvError(_)
            | FinderError::IoError(_)
            | FinderError::SerializationError(_) => "Check that the output stream is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::MissingApiKeyError => {
                "Gemini API key is not configured. Please add GEMINI_API_KEY to your environment."
                    .to_string()
            }
            FinderError::NoResultsError { location } => format!(
                "No colleges found in {}. Please try a different location or check the spelling.",
                location
            ),
            FinderError::SearchFailedError { location } => format!(
                "Unable to find colleges in {}. Please check your internet connection and API key, or try a different location.",
                location
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
