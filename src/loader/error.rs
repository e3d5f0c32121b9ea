//! Errors raised while loading the digest resources

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when fetching or interpreting a resource
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The server answered with a non-success status
    #[error("HTTP error! status: {status} ({url})")]
    Fetch { status: u16, url: String },

    /// The request never produced a response
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body parsed but does not have the expected shape
    #[error("Payload failed validation: {0}")]
    Validation(String),

    /// A resource URL could not be built
    #[error("Invalid resource URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for LoaderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LoaderError::Timeout(error)
        } else {
            LoaderError::Request(error)
        }
    }
}

impl LoaderError {
    /// Coarse category used for user-facing messages
    ///
    /// Best-effort: a status error is reported as a network problem because
    /// that is what the reader can act on.
    pub fn category(&self) -> ErrorCategory {
        match self {
            LoaderError::Fetch { .. } | LoaderError::Request(_) => ErrorCategory::Network,
            LoaderError::Timeout(_) => ErrorCategory::Timeout,
            LoaderError::Parse(_) => ErrorCategory::Parse,
            LoaderError::Validation(_) => ErrorCategory::Validation,
            LoaderError::InvalidUrl(_) => ErrorCategory::Unknown,
        }
    }
}

/// Coarse failure classes surfaced by `NewsLoader::refresh_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Network,
    Parse,
    Validation,
    Timeout,
    Unknown,
}

impl ErrorCategory {
    /// Message shown to the reader
    pub fn message(self) -> &'static str {
        match self {
            ErrorCategory::Network => "네트워크 연결을 확인해주세요.",
            ErrorCategory::Parse => "데이터를 처리하는 중 오류가 발생했습니다.",
            ErrorCategory::Validation => "데이터 형식이 올바르지 않습니다.",
            ErrorCategory::Timeout => "요청 시간이 초과되었습니다.",
            ErrorCategory::Unknown => "알 수 없는 오류가 발생했습니다.",
        }
    }
}
