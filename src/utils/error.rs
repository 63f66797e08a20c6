use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unknown {kind}: '{name}'")]
    NotFound { kind: String, name: String },

    #[error("Encoding failed: {message}")]
    Encoding { message: String },

    #[error("Logo fetch failed: {0}")]
    AssetFetch(#[from] reqwest::Error),

    #[error("Logo fetch timed out after {seconds} seconds")]
    AssetTimeout { seconds: u64 },

    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog is invalid: {message}")]
    CatalogInvalid { message: String },
}

pub type Result<T> = std::result::Result<T, DealError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Catalog,
    Encoding,
    Network,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DealError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DealError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        DealError::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        DealError::Encoding {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DealError::InvalidInput { .. } => ErrorCategory::Input,
            DealError::NotFound { .. } | DealError::CatalogInvalid { .. } => ErrorCategory::Catalog,
            DealError::Encoding { .. } | DealError::Zip(_) | DealError::Serialization(_) => {
                ErrorCategory::Encoding
            }
            DealError::AssetFetch(_) | DealError::AssetTimeout { .. } => ErrorCategory::Network,
            DealError::MissingConfig { .. } | DealError::InvalidConfigValue { .. } => {
                ErrorCategory::Config
            }
            DealError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DealError::InvalidInput { .. } => ErrorSeverity::Medium,
            DealError::MissingConfig { .. } | DealError::InvalidConfigValue { .. } => {
                ErrorSeverity::Medium
            }
            DealError::AssetFetch(_) | DealError::AssetTimeout { .. } => ErrorSeverity::Medium,
            DealError::Encoding { .. } | DealError::Zip(_) | DealError::Serialization(_) => {
                ErrorSeverity::High
            }
            // A dangling catalog reference is a construction bug, not user error
            DealError::NotFound { .. } | DealError::CatalogInvalid { .. } => ErrorSeverity::High,
            DealError::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DealError::InvalidInput { .. } => {
                "Provide a non-empty institution name and select at least one offering".to_string()
            }
            DealError::NotFound { kind, .. } => {
                format!("Check the {} name against `--list` output", kind)
            }
            DealError::Encoding { .. } | DealError::Zip(_) | DealError::Serialization(_) => {
                "Retry the export; if it persists, try a different --format".to_string()
            }
            DealError::AssetFetch(_) => {
                "Check the --logo-url and network connectivity, or drop the logo".to_string()
            }
            DealError::AssetTimeout { .. } => {
                "Increase --logo-timeout-seconds or drop the logo".to_string()
            }
            DealError::Io(_) => "Check that the output path exists and is writable".to_string(),
            DealError::MissingConfig { field } => format!("Pass --{} on the command line", field),
            DealError::InvalidConfigValue { field, .. } => {
                format!("Fix the value passed for {}", field)
            }
            DealError::CatalogInvalid { .. } => {
                "Fix the catalog file: category names must be unique, offerings unique per category"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DealError::InvalidInput { message } => format!("Cannot export yet: {}", message),
            DealError::NotFound { kind, name } => {
                format!("No such {} in the catalog: '{}'", kind, name)
            }
            DealError::AssetTimeout { seconds } => {
                format!("The logo did not load within {} seconds", seconds)
            }
            other => other.to_string(),
        }
    }
}
