use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("Rate limit persisted after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("CMS request failed with status {status}")]
    HttpStatus { status: u16 },

    #[error("GraphQL errors: {messages}")]
    GraphQl { messages: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Collection '{name}' returned by more than one query chunk")]
    DuplicateCollection { name: String },

    #[error("Migration still pending after {attempts} attempts")]
    MigrationTimeout { attempts: u32 },

    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    RateLimit,
    Query,
    Configuration,
    Data,
    FileSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CmsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CmsError::RateLimited { .. } => ErrorCategory::RateLimit,
            CmsError::HttpStatus { .. } | CmsError::ApiError(_) => ErrorCategory::Network,
            CmsError::GraphQl { .. } | CmsError::MigrationTimeout { .. } => ErrorCategory::Query,
            CmsError::MissingConfigError { .. }
            | CmsError::InvalidConfigValueError { .. }
            | CmsError::TomlError(_) => ErrorCategory::Configuration,
            CmsError::SerializationError(_)
            | CmsError::DuplicateCollection { .. }
            | CmsError::UnexpectedResponse { .. } => ErrorCategory::Data,
            CmsError::IoError(_) => ErrorCategory::FileSystem,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::RateLimit | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Query | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    /// 結束碼：所有終止性錯誤都必須非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CmsError::RateLimited { attempts } => format!(
                "The CMS kept rate-limiting requests ({} attempts)",
                attempts
            ),
            CmsError::HttpStatus { status } => {
                format!("The CMS answered with HTTP status {}", status)
            }
            CmsError::GraphQl { messages } => format!("The CMS rejected the query: {}", messages),
            CmsError::MissingConfigError { field } => {
                format!("Missing {} environment variable", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::RateLimit => "Wait a few minutes and run the build again",
            ErrorCategory::Network => "Check the endpoint URL and your network connection",
            ErrorCategory::Query => "Check that the CMS schema matches the queried fields",
            ErrorCategory::Configuration => "Check the environment variables and CLI flags",
            ErrorCategory::Data => "Inspect the CMS response and the query plan",
            ErrorCategory::FileSystem => "Check that the site root exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CmsError>;
