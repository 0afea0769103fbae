// ABOUTME: Unified error handling with stable error codes and HTTP response formatting
// ABOUTME: Maps application and upstream failures to JSON error envelopes with correct statuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! # Unified Error Handling System
//!
//! Standard error types, error codes, and HTTP response formatting shared by
//! all routes. Upstream provider failures carry the upstream status code so
//! proxy endpoints can mirror it rather than collapsing everything to 200 or
//! 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // External Services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            ErrorCode::InvalidInput | ErrorCode::MissingRequiredField => 400,

            // 502 Bad Gateway
            ErrorCode::ExternalServiceError | ErrorCode::ExternalServiceUnavailable => 502,

            // 503 Service Unavailable
            ErrorCode::ExternalAuthFailed => 503,

            // 500 Internal Server Error
            ErrorCode::InternalError
            | ErrorCode::SerializationError
            | ErrorCode::ConfigError
            | ErrorCode::ConfigMissing => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "The provided input is invalid",
            ErrorCode::MissingRequiredField => "A required field is missing from the request",
            ErrorCode::ExternalServiceError => "An external service encountered an error",
            ErrorCode::ExternalServiceUnavailable => "An external service is currently unavailable",
            ErrorCode::ExternalAuthFailed => "Authentication with external service failed",
            ErrorCode::ConfigError => "Configuration error encountered",
            ErrorCode::ConfigMissing => "Required configuration is missing",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Upstream HTTP status to mirror in the response, when the failure
    /// originates from a provider call
    pub upstream_status: Option<u16>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            upstream_status: None,
            source: None,
        }
    }

    /// Mirror a specific upstream status code in the HTTP response
    #[must_use]
    pub const fn with_upstream_status(mut self, status: u16) -> Self {
        self.upstream_status = Some(status);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.upstream_status.unwrap_or_else(|| self.code.http_status())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                upstream_status: error.upstream_status,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing or empty
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{} is required", field.into()),
        )
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Non-success HTTP status from an upstream provider, mirrored to the caller
    pub fn upstream(provider: &str, status: u16, status_text: &str) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{provider} returned {status}: {status_text}"),
        )
        .with_upstream_status(status)
    }

    /// Transport-level failure reaching an upstream provider
    pub fn upstream_unreachable(provider: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{provider}: {}", message.into()),
        )
    }
}

/// Conversion from anyhow::Error to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::new(ErrorCode::InternalError, error.to_string())
    }
}

/// Conversion from handshake errors to HTTP-facing errors
impl From<crate::oauth::OAuthError> for AppError {
    fn from(error: crate::oauth::OAuthError) -> Self {
        use crate::oauth::OAuthError;
        match error {
            OAuthError::ConfigurationError(message) => AppError::config(message),
            OAuthError::MissingAuthorizationCode => {
                AppError::invalid_input("authorization callback carried no code")
            }
            OAuthError::TokenExchangeFailed {
                status,
                status_text,
            }
            | OAuthError::TokenRefreshFailed {
                status,
                status_text,
            } => AppError::upstream("token endpoint", status, &status_text),
            OAuthError::RefreshNotSupported(provider) => {
                AppError::invalid_input(format!("{provider} does not support token refresh"))
            }
            OAuthError::InvalidResponse(message) => AppError::new(
                ErrorCode::SerializationError,
                format!("malformed token response: {message}"),
            ),
            OAuthError::Transport(message) => {
                AppError::upstream_unreachable("token endpoint", message)
            }
        }
    }
}
