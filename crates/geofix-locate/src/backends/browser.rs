//! Browser `navigator.geolocation.getCurrentPosition`.

use std::sync::Arc;

use futures::future::BoxFuture;
use geofix_core::{
    Coordinates, ErrorCode, GeolocationFailure, GeolocatorKind, PositionFix, RequestOptions,
};
use serde::{Deserialize, Serialize};

use crate::adapter::{handle_not_loaded, normalize_heading, LocateAdapter, LocateResult};
use crate::gate;

/// `PositionOptions` as the browser API takes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Option<u64>,
    pub maximum_age: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserCoords {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserPosition {
    pub coords: BrowserCoords,
    pub timestamp: i64,
}

/// `GeolocationPositionError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserPositionError {
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

pub const PERMISSION_DENIED: u16 = 1;
pub const POSITION_UNAVAILABLE: u16 = 2;
pub const TIMEOUT: u16 = 3;

/// A live `navigator.geolocation`.
pub trait BrowserGeolocation: Send + Sync {
    fn get_current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'_, Result<BrowserPosition, BrowserPositionError>>;
}

/// Map a `GeolocationPositionError.code`.
#[must_use]
pub fn map_error_code(code: u16) -> ErrorCode {
    match code {
        PERMISSION_DENIED => ErrorCode::PermissionDenied,
        POSITION_UNAVAILABLE => ErrorCode::PositionUnavailable,
        TIMEOUT => ErrorCode::Timeout,
        _ => ErrorCode::Unknown,
    }
}

pub struct BrowserAdapter {
    handle: Option<Arc<dyn BrowserGeolocation>>,
}

impl BrowserAdapter {
    #[must_use]
    pub fn new(handle: Option<Arc<dyn BrowserGeolocation>>) -> Self {
        Self { handle }
    }

    #[must_use]
    pub fn native_options(options: &RequestOptions) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: true,
            timeout: options.timeout_ms,
            maximum_age: options.maximum_age_ms,
        }
    }
}

fn normalize(position: BrowserPosition, options: &RequestOptions) -> LocateResult {
    let BrowserPosition { coords, timestamp } = position;
    let point = Coordinates {
        lng: coords.longitude,
        lat: coords.latitude,
    };
    let accuracy = gate::check(
        GeolocatorKind::Browser,
        point,
        Some(coords.accuracy),
        options.accuracy_threshold,
        options.locale(),
    )?;

    let mut fix = PositionFix::new(GeolocatorKind::Browser, point, accuracy, timestamp);
    fix.heading = normalize_heading(coords.heading, coords.speed);
    fix.speed = coords.speed;
    Ok(fix)
}

impl LocateAdapter for BrowserAdapter {
    fn kind(&self) -> GeolocatorKind {
        GeolocatorKind::Browser
    }

    fn locate(&self, options: RequestOptions) -> BoxFuture<'_, LocateResult> {
        Box::pin(async move {
            let Some(handle) = self.handle.as_ref() else {
                return Err(handle_not_loaded(self.kind(), options.locale()));
            };

            tracing::debug!(backend = %self.kind(), "requesting fix");
            match handle
                .get_current_position(Self::native_options(&options))
                .await
            {
                Ok(position) => normalize(position, &options),
                Err(err) => {
                    tracing::debug!(
                        backend = %self.kind(),
                        code = err.code,
                        message = %err.message,
                        "native error"
                    );
                    Err(GeolocationFailure::new(
                        map_error_code(err.code),
                        options.locale(),
                        Some(err.message),
                    ))
                }
            }
        })
    }
}
