//! The closed failure taxonomy every backend error is normalized into.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CoreError;

/// Normalized failure category. Every native backend error maps onto exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    AccuracyTooLow,
    Unknown,
}

impl ErrorCode {
    /// Short human-readable message for this code.
    #[must_use]
    pub fn message(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::ZhCn, ErrorCode::PermissionDenied) => "未开启定位权限",
            (Locale::ZhCn, ErrorCode::PositionUnavailable) => "定位不可用",
            (Locale::ZhCn, ErrorCode::Timeout) => "定位超时",
            (Locale::ZhCn, ErrorCode::AccuracyTooLow) => "定位精度太低",
            (Locale::ZhCn, ErrorCode::Unknown) => "定位失败",
            (Locale::En, ErrorCode::PermissionDenied) => "location permission is not granted",
            (Locale::En, ErrorCode::PositionUnavailable) => "location is unavailable",
            (Locale::En, ErrorCode::Timeout) => "location request timed out",
            (Locale::En, ErrorCode::AccuracyTooLow) => "location accuracy is too low",
            (Locale::En, ErrorCode::Unknown) => "location failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            ErrorCode::PositionUnavailable => write!(f, "POSITION_UNAVAILABLE"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::AccuracyTooLow => write!(f, "ACCURACY_TOO_LOW"),
            ErrorCode::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Language used for [`GeolocationFailure::msg`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en")]
    En,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::ZhCn => write!(f, "zh-CN"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Ok(Locale::ZhCn),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(CoreError::UnknownLocale(other.to_string())),
        }
    }
}

/// A normalized backend failure.
///
/// Built once by the adapter that failed and never mutated afterwards; the
/// orchestrator only ever passes one of these through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{msg} ({code})")]
pub struct GeolocationFailure {
    pub code: ErrorCode,
    /// Localized short message for `code`.
    pub msg: String,
    /// The backend's own message, when it gave one.
    pub message: Option<String>,
}

impl GeolocationFailure {
    #[must_use]
    pub fn new(code: ErrorCode, locale: Locale, message: Option<String>) -> Self {
        Self {
            code,
            msg: code.message(locale).to_string(),
            message,
        }
    }
}
