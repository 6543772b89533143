//! BMapGL (Baidu) `BMapGL.Geolocation`.

use std::sync::Arc;

use futures::future::BoxFuture;
use geofix_core::{
    Coordinates, ErrorCode, GeolocationFailure, GeolocatorKind, PositionFix, RequestOptions,
};
use serde::{Deserialize, Serialize};

use crate::adapter::{
    handle_not_loaded, normalize_heading, now_millis, LocateAdapter, LocateResult,
};
use crate::gate;

pub const BMAP_STATUS_SUCCESS: i32 = 0;
pub const BMAP_STATUS_CITY_LIST: i32 = 1;
pub const BMAP_STATUS_UNKNOWN_LOCATION: i32 = 2;
pub const BMAP_STATUS_UNKNOWN_ROUTE: i32 = 3;
pub const BMAP_STATUS_INVALID_KEY: i32 = 4;
pub const BMAP_STATUS_INVALID_REQUEST: i32 = 5;
pub const BMAP_STATUS_PERMISSION_DENIED: i32 = 6;
pub const BMAP_STATUS_SERVICE_UNAVAILABLE: i32 = 7;
pub const BMAP_STATUS_TIMEOUT: i32 = 8;

/// Options for `Geolocation.getCurrentPosition`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmapOptions {
    pub enable_high_accuracy: bool,
    /// SDK default is ten minutes when absent.
    pub maximum_age: Option<u64>,
    /// Use the hybrid-app location SDK when the page runs inside one.
    #[serde(rename = "SDKLocation")]
    pub sdk_location: bool,
    /// SDK default is ten seconds when absent.
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmapPoint {
    pub lng: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmapResult {
    pub point: BmapPoint,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub address: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// What the callback observes: `this.getStatus()` plus the result argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmapResponse {
    pub status: i32,
    #[serde(default)]
    pub result: Option<BmapResult>,
}

/// A loaded `BMapGL` namespace.
pub trait BmapGeolocation: Send + Sync {
    fn get_current_position(&self, options: BmapOptions) -> BoxFuture<'_, BmapResponse>;
}

/// Map a non-success status.
#[must_use]
pub fn map_status(status: i32) -> ErrorCode {
    match status {
        BMAP_STATUS_PERMISSION_DENIED => ErrorCode::PermissionDenied,
        BMAP_STATUS_UNKNOWN_LOCATION => ErrorCode::PositionUnavailable,
        BMAP_STATUS_TIMEOUT => ErrorCode::Timeout,
        _ => ErrorCode::Unknown,
    }
}

/// The SDK constant name for a status; the SDK reports no message text.
#[must_use]
pub fn status_name(status: i32) -> String {
    let name = match status {
        BMAP_STATUS_SUCCESS => "SUCCESS",
        BMAP_STATUS_CITY_LIST => "CITY_LIST",
        BMAP_STATUS_UNKNOWN_LOCATION => "UNKNOWN_LOCATION",
        BMAP_STATUS_UNKNOWN_ROUTE => "UNKNOWN_ROUTE",
        BMAP_STATUS_INVALID_KEY => "INVALID_KEY",
        BMAP_STATUS_INVALID_REQUEST => "INVALID_REQUEST",
        BMAP_STATUS_PERMISSION_DENIED => "PERMISSION_DENIED",
        BMAP_STATUS_SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
        BMAP_STATUS_TIMEOUT => "TIMEOUT",
        other => return format!("BMAP_STATUS_{other}"),
    };
    format!("BMAP_STATUS_{name}")
}

pub struct BmapAdapter {
    handle: Option<Arc<dyn BmapGeolocation>>,
}

impl BmapAdapter {
    #[must_use]
    pub fn new(handle: Option<Arc<dyn BmapGeolocation>>) -> Self {
        Self { handle }
    }

    #[must_use]
    pub fn native_options(options: &RequestOptions) -> BmapOptions {
        BmapOptions {
            enable_high_accuracy: true,
            maximum_age: options.maximum_age_ms,
            sdk_location: true,
            timeout: options.timeout_ms,
        }
    }
}

fn normalize(response: BmapResponse, options: &RequestOptions) -> LocateResult {
    let locale = options.locale();

    if response.status != BMAP_STATUS_SUCCESS {
        let code = map_status(response.status);
        tracing::debug!(backend = "bmap", status = response.status, %code, "native error");
        return Err(GeolocationFailure::new(
            code,
            locale,
            Some(status_name(response.status)),
        ));
    }

    let Some(result) = response.result else {
        return Err(GeolocationFailure::new(
            ErrorCode::PositionUnavailable,
            locale,
            Some("success status without result".to_string()),
        ));
    };
    let point = Coordinates {
        lng: result.point.lng,
        lat: result.point.lat,
    };
    let accuracy = gate::check(
        GeolocatorKind::Bmap,
        point,
        result.accuracy,
        options.accuracy_threshold,
        locale,
    )?;

    let timestamp = result.timestamp.unwrap_or_else(now_millis);
    let mut fix = PositionFix::new(GeolocatorKind::Bmap, point, accuracy, timestamp);
    fix.heading = normalize_heading(result.heading, result.speed);
    fix.speed = result.speed;
    fix.address = result.address;
    Ok(fix)
}

impl LocateAdapter for BmapAdapter {
    fn kind(&self) -> GeolocatorKind {
        GeolocatorKind::Bmap
    }

    fn locate(&self, options: RequestOptions) -> BoxFuture<'_, LocateResult> {
        Box::pin(async move {
            let Some(handle) = self.handle.as_ref() else {
                return Err(handle_not_loaded(self.kind(), options.locale()));
            };

            tracing::debug!(backend = %self.kind(), "requesting fix");
            let response = handle
                .get_current_position(Self::native_options(&options))
                .await;
            normalize(response, &options)
        })
    }
}
