//! QQ Map (Tencent) front-end geolocation component, `qq.maps.Geolocation`.

use std::sync::Arc;

use futures::future::BoxFuture;
use geofix_core::{
    Coordinates, ErrorCode, GeolocationFailure, GeolocatorKind, PositionFix, RequestOptions,
};
use serde::{Deserialize, Serialize};

use crate::adapter::{handle_not_loaded, now_millis, LocateAdapter, LocateResult};
use crate::gate;

/// The component only understands a timeout; it has no cache tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QqMapOptions {
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QqMapResult {
    pub module: String,
    pub nation: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub adcode: String,
    pub addr: String,
    pub lat: f64,
    pub lng: f64,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QqMapError {
    pub code: Option<i32>,
    pub message: Option<String>,
}

/// A loaded `qq.maps` namespace.
pub trait QqMapGeolocation: Send + Sync {
    fn get_location(&self, options: QqMapOptions)
        -> BoxFuture<'_, Result<QqMapResult, QqMapError>>;
}

/// The component wraps browser geolocation and reuses its error codes.
#[must_use]
pub fn map_error_code(code: Option<i32>) -> ErrorCode {
    match code {
        Some(1) => ErrorCode::PermissionDenied,
        Some(2) => ErrorCode::PositionUnavailable,
        Some(3) => ErrorCode::Timeout,
        _ => ErrorCode::Unknown,
    }
}

pub struct QqMapAdapter {
    handle: Option<Arc<dyn QqMapGeolocation>>,
}

impl QqMapAdapter {
    #[must_use]
    pub fn new(handle: Option<Arc<dyn QqMapGeolocation>>) -> Self {
        Self { handle }
    }

    #[must_use]
    pub fn native_options(options: &RequestOptions) -> QqMapOptions {
        QqMapOptions {
            timeout: options.timeout_ms,
        }
    }
}

fn normalize(result: QqMapResult, options: &RequestOptions) -> LocateResult {
    let point = Coordinates {
        lng: result.lng,
        lat: result.lat,
    };
    let accuracy = gate::check(
        GeolocatorKind::QqMap,
        point,
        result.accuracy,
        options.accuracy_threshold,
        options.locale(),
    )?;

    let mut fix = PositionFix::new(GeolocatorKind::QqMap, point, accuracy, now_millis());
    fix.address = Some(serde_json::json!({
        "nation": result.nation,
        "province": result.province,
        "city": result.city,
        "district": result.district,
        "adcode": result.adcode,
        "addr": result.addr,
    }));
    Ok(fix)
}

impl LocateAdapter for QqMapAdapter {
    fn kind(&self) -> GeolocatorKind {
        GeolocatorKind::QqMap
    }

    fn locate(&self, options: RequestOptions) -> BoxFuture<'_, LocateResult> {
        Box::pin(async move {
            let Some(handle) = self.handle.as_ref() else {
                return Err(handle_not_loaded(self.kind(), options.locale()));
            };

            tracing::debug!(backend = %self.kind(), "requesting fix");
            match handle.get_location(Self::native_options(&options)).await {
                Ok(result) => normalize(result, &options),
                Err(err) => {
                    let code = map_error_code(err.code);
                    tracing::debug!(
                        backend = %self.kind(),
                        native_code = ?err.code,
                        %code,
                        "native error"
                    );
                    Err(GeolocationFailure::new(code, options.locale(), err.message))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shenzhen(accuracy: Option<f64>) -> QqMapResult {
        QqMapResult {
            module: "geolocation".to_string(),
            nation: "中国".to_string(),
            province: "广东省".to_string(),
            city: "深圳市".to_string(),
            district: "南山区".to_string(),
            adcode: "440305".to_string(),
            addr: "科技园".to_string(),
            lat: 22.5431,
            lng: 113.9344,
            accuracy,
        }
    }

    #[test]
    fn error_table_is_total() {
        assert_eq!(map_error_code(Some(1)), ErrorCode::PermissionDenied);
        assert_eq!(map_error_code(Some(2)), ErrorCode::PositionUnavailable);
        assert_eq!(map_error_code(Some(3)), ErrorCode::Timeout);
        assert_eq!(map_error_code(Some(7)), ErrorCode::Unknown);
        assert_eq!(map_error_code(None), ErrorCode::Unknown);
    }

    #[test]
    fn native_options_only_carry_timeout() {
        let native = QqMapAdapter::native_options(&RequestOptions {
            timeout_ms: Some(4_000),
            maximum_age_ms: Some(60_000),
            ..RequestOptions::default()
        });
        assert_eq!(native, QqMapOptions { timeout: Some(4_000) });
    }

    #[test]
    fn normalize_assembles_address() {
        let fix = normalize(shenzhen(Some(25.0)), &RequestOptions::default()).unwrap();
        assert_eq!(fix.geolocator, GeolocatorKind::QqMap);
        let address = fix.address.unwrap();
        assert_eq!(address["city"], "深圳市");
        assert_eq!(address["adcode"], "440305");
        assert_eq!(address["addr"], "科技园");
        assert!(fix.heading.is_none());
        assert!(fix.speed.is_none());
    }

    #[test]
    fn normalize_fails_unavailable_without_accuracy() {
        let opts = RequestOptions {
            accuracy_threshold: Some(f64::INFINITY),
            ..RequestOptions::default()
        };
        let failure = normalize(shenzhen(None), &opts).unwrap_err();
        assert_eq!(failure.code, ErrorCode::PositionUnavailable);
    }
}
