//! The contract every backend adapter implements.

use futures::future::BoxFuture;
use geofix_core::{ErrorCode, GeolocationFailure, GeolocatorKind, Locale, RequestOptions};

use crate::PositionFix;

pub type LocateResult = Result<PositionFix, GeolocationFailure>;

/// One positioning backend, normalized.
///
/// `locate` settles exactly once: with a fix that passed the accuracy gate,
/// or with a failure whose code came from the backend's own mapping table.
pub trait LocateAdapter: Send + Sync {
    fn kind(&self) -> GeolocatorKind;

    /// Request one fix. `options` should already be merged with defaults;
    /// absent fields fall back to the backend's native defaults.
    fn locate(&self, options: RequestOptions) -> BoxFuture<'_, LocateResult>;
}

/// Failure for an adapter whose vendor handle was never injected.
pub(crate) fn handle_not_loaded(kind: GeolocatorKind, locale: Locale) -> GeolocationFailure {
    tracing::warn!(backend = %kind, "vendor handle is not loaded");
    GeolocationFailure::new(
        ErrorCode::PositionUnavailable,
        locale,
        Some(format!("{kind} SDK is not loaded")),
    )
}

/// Wall-clock epoch milliseconds, for backends that report no timestamp.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Heading is meaningless while stationary, and some sources report it as a
/// non-finite number; both become `None`.
pub(crate) fn normalize_heading(heading: Option<f64>, speed: Option<f64>) -> Option<f64> {
    if speed == Some(0.0) {
        return None;
    }
    heading.filter(|h| h.is_finite())
}
