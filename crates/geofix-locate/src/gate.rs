//! Accuracy gate shared by every adapter.

use geofix_core::{Coordinates, ErrorCode, GeolocationFailure, GeolocatorKind, Locale};

/// `true` when there is no threshold or `accuracy` is within it.
#[must_use]
pub fn accept(accuracy: f64, threshold: Option<f64>) -> bool {
    threshold.is_none_or(|t| accuracy <= t)
}

/// Apply the gate to a raw fix and return the accepted accuracy.
///
/// A fix that reports no accuracy at all is unusable whatever the threshold:
/// accuracy is mandatory on a [`geofix_core::PositionFix`].
///
/// # Errors
///
/// Returns [`ErrorCode::AccuracyTooLow`] with the rejected coordinates and
/// accuracy in the raw message, or [`ErrorCode::PositionUnavailable`] when
/// the fix carries no accuracy.
pub(crate) fn check(
    kind: GeolocatorKind,
    coords: Coordinates,
    accuracy: Option<f64>,
    threshold: Option<f64>,
    locale: Locale,
) -> Result<f64, GeolocationFailure> {
    let Coordinates { lng, lat } = coords;
    match accuracy {
        Some(accuracy) if accept(accuracy, threshold) => Ok(accuracy),
        Some(accuracy) => {
            tracing::warn!(backend = %kind, accuracy, ?threshold, "fix rejected by accuracy gate");
            Err(GeolocationFailure::new(
                ErrorCode::AccuracyTooLow,
                locale,
                Some(format!("lng: {lng}, lat: {lat}, accuracy: {accuracy}")),
            ))
        }
        None => {
            tracing::warn!(backend = %kind, "fix reported without accuracy");
            Err(GeolocationFailure::new(
                ErrorCode::PositionUnavailable,
                locale,
                Some(format!("lng: {lng}, lat: {lat}, accuracy: unknown")),
            ))
        }
    }
}
