use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("API request to {route} failed: {source}")]
    RequestError {
        route: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API {route} returned HTTP {status}: {body}")]
    StatusError {
        route: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {route}: {message}")]
    DecodeError { route: String, message: String },

    #[error("{kind} response does not match the expected schema: {message}")]
    SchemaError { kind: String, message: String },

    #[error("Operation `{operation}` is not available with the {convention} calling convention")]
    UnsupportedOperation {
        operation: String,
        convention: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 網路、HTTP 狀態或回應內容錯誤，呼叫端一律視為後端不可用
    TransportOrBackend,
    Schema,
    Request,
    Configuration,
}

impl InsightsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InsightsError::RequestError { .. }
            | InsightsError::StatusError { .. }
            | InsightsError::DecodeError { .. } => ErrorCategory::TransportOrBackend,
            InsightsError::SchemaError { .. } => ErrorCategory::Schema,
            InsightsError::ValidationError { .. } | InsightsError::UnsupportedOperation { .. } => {
                ErrorCategory::Request
            }
            InsightsError::IoError(_)
            | InsightsError::SerializationError(_)
            | InsightsError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_transport_or_backend(&self) -> bool {
        self.category() == ErrorCategory::TransportOrBackend
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::TransportOrBackend => {
                format!("The insights service is unavailable right now ({})", self)
            }
            ErrorCategory::Schema => {
                format!("The insights service sent an unexpected answer ({})", self)
            }
            ErrorCategory::Request | ErrorCategory::Configuration => self.to_string(),
        }
    }

    pub(crate) fn validation(field: &str, value: &str, reason: impl Into<String>) -> Self {
        InsightsError::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;
