//! AMap (Gaode) JS API `AMap.Geolocation` plugin.

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

/// Options for `new AMap.Geolocation(..)`. Map-display options are never set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmapOptions {
    /// Convert the fix into AMap's own datum. Always off: fixes are passed
    /// through in the source datum.
    pub convert: bool,
    pub enable_high_accuracy: bool,
    /// Reverse-geocode the fix.
    pub need_address: bool,
    /// `"base"` or `"all"` reverse-geocoding detail.
    pub extensions: String,
    /// Cooperate with the native Android AMap location SDK when present.
    pub use_native: bool,
    pub timeout: Option<u64>,
    pub maximum_age: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmapStatus {
    Complete,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmapLngLat {
    pub lng: f64,
    pub lat: f64,
}

/// `GeolocationResult`. On error only `info` and `message` are populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmapResult {
    #[serde(default)]
    pub position: Option<AmapLngLat>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "isConverted")]
    pub is_converted: bool,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default, rename = "addressComponent")]
    pub address_component: Option<serde_json::Value>,
    #[serde(default, rename = "formattedAddress")]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub aois: Vec<serde_json::Value>,
    #[serde(default)]
    pub pois: Vec<serde_json::Value>,
    #[serde(default)]
    pub roads: Vec<serde_json::Value>,
    #[serde(default)]
    pub crosses: Vec<serde_json::Value>,
}

/// The `(status, result)` pair handed to the `getCurrentPosition` callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmapResponse {
    pub status: AmapStatus,
    #[serde(default)]
    pub result: AmapResult,
}

/// A loaded `AMap` namespace with the geolocation plugin available.
pub trait AmapGeolocation: Send + Sync {
    fn get_current_position(&self, options: AmapOptions) -> BoxFuture<'_, AmapResponse>;
}

/// Map an error result's `info` string.
#[must_use]
pub fn map_error_info(info: &str) -> ErrorCode {
    match info {
        "PERMISSION_DENIED" => ErrorCode::PermissionDenied,
        "TIME_OUT" => ErrorCode::Timeout,
        "POSITION_UNAVAILABLE" => ErrorCode::PositionUnavailable,
        _ => ErrorCode::Unknown,
    }
}

pub struct AmapAdapter {
    handle: Option<Arc<dyn AmapGeolocation>>,
}

impl AmapAdapter {
    #[must_use]
    pub fn new(handle: Option<Arc<dyn AmapGeolocation>>) -> Self {
        Self { handle }
    }

    #[must_use]
    pub fn native_options(options: &RequestOptions) -> AmapOptions {
        AmapOptions {
            convert: false,
            enable_high_accuracy: true,
            need_address: true,
            extensions: "all".to_string(),
            use_native: true,
            timeout: options.timeout_ms,
            maximum_age: options.maximum_age_ms,
        }
    }
}

fn normalize(response: AmapResponse, options: &RequestOptions) -> LocateResult {
    let AmapResponse { status, result } = response;
    let locale = options.locale();

    if status == AmapStatus::Error {
        let code = result.info.as_deref().map_or(ErrorCode::Unknown, map_error_info);
        tracing::debug!(backend = "amap", info = ?result.info, %code, "native error");
        return Err(GeolocationFailure::new(code, locale, result.message));
    }

    let Some(AmapLngLat { lng, lat }) = result.position else {
        return Err(GeolocationFailure::new(
            ErrorCode::PositionUnavailable,
            locale,
            Some("complete result without position".to_string()),
        ));
    };
    let point = Coordinates { lng, lat };
    let accuracy = gate::check(
        GeolocatorKind::Amap,
        point,
        result.accuracy,
        options.accuracy_threshold,
        locale,
    )?;

    let mut fix = PositionFix::new(GeolocatorKind::Amap, point, accuracy, now_millis());
    fix.heading = normalize_heading(result.heading, result.speed);
    fix.speed = result.speed;
    fix.address = result.address_component;
    fix.crosses = Some(result.crosses.len());
    fix.pois = Some(result.pois);
    fix.roads = Some(result.roads);
    Ok(fix)
}

impl LocateAdapter for AmapAdapter {
    fn kind(&self) -> GeolocatorKind {
        GeolocatorKind::Amap
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
