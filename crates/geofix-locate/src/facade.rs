//! Entry point: merge options, pick a racing policy, dispatch.

use std::sync::Arc;

use geofix_core::{GeolocatorKind, LocateConfig, RequestOptions};

use crate::adapter::{LocateAdapter, LocateResult};
use crate::backends::{
    AmapAdapter, AmapGeolocation, BmapAdapter, BmapGeolocation, BrowserAdapter,
    BrowserGeolocation, QqMapAdapter, QqMapGeolocation,
};
use crate::race::{first_fulfilled, race_first_success};

/// The vendor handles available to this process. A `None` handle means the
/// vendor SDK never finished loading; its adapter fails immediately.
#[derive(Clone, Default)]
pub struct VendorHandles {
    pub browser: Option<Arc<dyn BrowserGeolocation>>,
    pub amap: Option<Arc<dyn AmapGeolocation>>,
    pub bmap: Option<Arc<dyn BmapGeolocation>>,
    pub qqmap: Option<Arc<dyn QqMapGeolocation>>,
}

impl std::fmt::Debug for VendorHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorHandles")
            .field("browser", &self.browser.is_some())
            .field("amap", &self.amap.is_some())
            .field("bmap", &self.bmap.is_some())
            .field("qqmap", &self.qqmap.is_some())
            .finish()
    }
}

/// Geolocation facade over the four backends.
pub struct Geolocator {
    browser: BrowserAdapter,
    amap: AmapAdapter,
    bmap: BmapAdapter,
    qqmap: QqMapAdapter,
    defaults: RequestOptions,
}

impl Geolocator {
    /// A facade using the built-in defaults (100 m, no cache, 8 s).
    #[must_use]
    pub fn new(handles: VendorHandles) -> Self {
        Self::with_defaults(handles, RequestOptions::builtin_defaults())
    }

    #[must_use]
    pub fn from_config(handles: VendorHandles, config: &LocateConfig) -> Self {
        Self::with_defaults(handles, config.defaults)
    }

    #[must_use]
    pub fn with_defaults(handles: VendorHandles, defaults: RequestOptions) -> Self {
        tracing::debug!(?handles, ?defaults, "building geolocator");
        Self {
            browser: BrowserAdapter::new(handles.browser),
            amap: AmapAdapter::new(handles.amap),
            bmap: BmapAdapter::new(handles.bmap),
            qqmap: QqMapAdapter::new(handles.qqmap),
            defaults,
        }
    }

    /// The adapter for one backend.
    #[must_use]
    pub fn adapter(&self, kind: GeolocatorKind) -> &dyn LocateAdapter {
        match kind {
            GeolocatorKind::Browser => &self.browser,
            GeolocatorKind::Amap => &self.amap,
            GeolocatorKind::Bmap => &self.bmap,
            GeolocatorKind::QqMap => &self.qqmap,
        }
    }

    /// Get one fix.
    ///
    /// With a `preferred` backend, it runs beside a race of the other three
    /// and its fix wins whenever it produces one. Without a preference all
    /// four race with equal priority.
    ///
    /// # Errors
    ///
    /// Returns a single [`geofix_core::GeolocationFailure`]: the preferred
    /// backend's when there is one, otherwise the first backend's in
    /// enumeration order.
    pub async fn get_location(
        &self,
        options: RequestOptions,
        preferred: Option<GeolocatorKind>,
    ) -> LocateResult {
        let options = options.merged_with(&self.defaults);

        let result = match preferred {
            Some(kind) => {
                tracing::debug!(preferred = %kind, ?options, "locating with preference");
                let primary = self.adapter(kind).locate(options);
                let fallbacks = kind
                    .others()
                    .into_iter()
                    .map(|other| self.adapter(other).locate(options));
                race_first_success(primary, fallbacks, options.locale()).await
            }
            None => {
                tracing::debug!(?options, "locating with every backend");
                first_fulfilled(
                    GeolocatorKind::ALL
                        .into_iter()
                        .map(|kind| self.adapter(kind).locate(options)),
                    options.locale(),
                )
                .await
            }
        };

        match &result {
            Ok(fix) => tracing::info!(
                backend = %fix.geolocator,
                accuracy = fix.accuracy,
                "location resolved"
            ),
            Err(failure) => tracing::info!(
                code = %failure.code,
                error = %failure,
                "location failed"
            ),
        }
        result
    }
}
