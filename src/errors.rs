use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Setup defects raised by the currency widget and the configuration table.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Currency configuration missing from page")]
    MissingConfiguration,

    #[error("Malformed currency configuration: {0}")]
    MalformedConfiguration(#[from] serde_json::Error),

    #[error("Invalid currency configuration for {code}: {reason}")]
    InvalidConfiguration { code: String, reason: String },

    #[error("Currency select has no value")]
    MissingSelection,

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::CurrencyNotFound(_) => {
                let error_response = ErrorResponse::new(
                    self.to_string(),
                    "CURRENCY_NOT_FOUND",
                );
                HttpResponse::NotFound().json(error_response)
            }
            ServiceError::InvalidFrequency(_) => {
                let error_response = ErrorResponse::new(
                    self.to_string(),
                    "INVALID_FREQUENCY",
                );
                HttpResponse::NotFound().json(error_response)
            }
            ServiceError::ConfigError(_) | ServiceError::InitializationError(_) => {
                let error_response = ErrorResponse::new(
                    "Service configuration error",
                    "CONFIG_ERROR",
                ).with_details(self.to_string());
                HttpResponse::InternalServerError().json(error_response)
            }
        }
    }
}

impl From<WidgetError> for ServiceError {
    fn from(err: WidgetError) -> Self {
        match err {
            WidgetError::UnknownCurrency(code) => ServiceError::CurrencyNotFound(code),
            other => ServiceError::InitializationError(other.to_string()),
        }
    }
}
