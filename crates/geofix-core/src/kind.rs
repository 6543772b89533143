use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Identity of a positioning backend.
///
/// Used both to request a preferred backend and to stamp the backend that
/// produced a [`crate::PositionFix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeolocatorKind {
    /// The browser's own `navigator.geolocation`.
    Browser,
    /// AMap (Gaode) JS API geolocation plugin.
    Amap,
    /// BMapGL (Baidu) geolocation.
    Bmap,
    /// QQ Map (Tencent) geolocation component.
    QqMap,
}

impl GeolocatorKind {
    /// Every backend, in fallback enumeration order.
    pub const ALL: [GeolocatorKind; 4] = [
        GeolocatorKind::Browser,
        GeolocatorKind::Amap,
        GeolocatorKind::Bmap,
        GeolocatorKind::QqMap,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GeolocatorKind::Browser => "browser",
            GeolocatorKind::Amap => "amap",
            GeolocatorKind::Bmap => "bmap",
            GeolocatorKind::QqMap => "qqmap",
        }
    }

    /// The other three backends, in enumeration order.
    #[must_use]
    pub fn others(self) -> Vec<GeolocatorKind> {
        Self::ALL.into_iter().filter(|k| *k != self).collect()
    }
}

impl std::fmt::Display for GeolocatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeolocatorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browser" | "h5" => Ok(GeolocatorKind::Browser),
            "amap" | "gd" => Ok(GeolocatorKind::Amap),
            "bmap" | "bd" => Ok(GeolocatorKind::Bmap),
            "qqmap" | "tx" => Ok(GeolocatorKind::QqMap),
            other => Err(CoreError::UnknownBackend(other.to_string())),
        }
    }
}
