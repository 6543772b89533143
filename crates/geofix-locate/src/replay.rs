//! Scripted vendor handles.
//!
//! A scenario names, per backend, how long the vendor call takes and what
//! native payload it settles with, in that vendor's own shape. Backends left
//! out of the scenario stay unloaded.
//!
//! ```yaml
//! browser:
//!   delay_ms: 120
//!   reply:
//!     success:
//!       coords: { latitude: 39.909, longitude: 116.397, accuracy: 20 }
//!       timestamp: 1700000000000
//! bmap:
//!   delay_ms: 40
//!   reply: { status: 8 }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Deserialize;
use thiserror::Error;

use crate::backends::amap::{AmapGeolocation, AmapOptions, AmapResponse};
use crate::backends::bmap::{BmapGeolocation, BmapOptions, BmapResponse};
use crate::backends::browser::{
    BrowserGeolocation, BrowserPosition, BrowserPositionError, PositionOptions,
};
use crate::backends::qqmap::{QqMapError, QqMapGeolocation, QqMapOptions, QqMapResult};
use crate::facade::VendorHandles;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A callback-style outcome: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T, E> {
    Success(T),
    Failure(E),
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(err) => Err(err),
        }
    }
}

/// One scripted vendor call: wait `delay_ms`, then settle with `reply`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script<T> {
    #[serde(default)]
    pub delay_ms: u64,
    pub reply: T,
}

impl<T: Clone + Send + Sync> Script<T> {
    #[must_use]
    pub fn new(delay_ms: u64, reply: T) -> Self {
        Self { delay_ms, reply }
    }

    fn play(&self) -> BoxFuture<'_, T> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            self.reply.clone()
        })
    }
}

pub type BrowserScript = Script<Outcome<BrowserPosition, BrowserPositionError>>;
pub type AmapScript = Script<AmapResponse>;
pub type BmapScript = Script<BmapResponse>;
pub type QqMapScript = Script<Outcome<QqMapResult, QqMapError>>;

impl BrowserGeolocation for BrowserScript {
    fn get_current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'_, Result<BrowserPosition, BrowserPositionError>> {
        tracing::trace!(?options, "scripted browser call");
        Box::pin(async move { self.play().await.into() })
    }
}

impl AmapGeolocation for AmapScript {
    fn get_current_position(&self, options: AmapOptions) -> BoxFuture<'_, AmapResponse> {
        tracing::trace!(?options, "scripted amap call");
        self.play()
    }
}

impl BmapGeolocation for BmapScript {
    fn get_current_position(&self, options: BmapOptions) -> BoxFuture<'_, BmapResponse> {
        tracing::trace!(?options, "scripted bmap call");
        self.play()
    }
}

impl QqMapGeolocation for QqMapScript {
    fn get_location(
        &self,
        options: QqMapOptions,
    ) -> BoxFuture<'_, Result<QqMapResult, QqMapError>> {
        tracing::trace!(?options, "scripted qqmap call");
        Box::pin(async move { self.play().await.into() })
    }
}

/// A full scenario: one optional script per backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedBackends {
    #[serde(default)]
    pub browser: Option<BrowserScript>,
    #[serde(default)]
    pub amap: Option<AmapScript>,
    #[serde(default)]
    pub bmap: Option<BmapScript>,
    #[serde(default)]
    pub qqmap: Option<QqMapScript>,
}

impl ScriptedBackends {
    /// Parse a scenario from YAML.
    ///
    /// Replies are written as single-key maps (`success: ...` or
    /// `failure: ...`) rather than YAML tags.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the document does not match the
    /// scenario shape.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        Ok(serde_yaml::with::singleton_map_recursive::deserialize(
            deserializer,
        )?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] if the file cannot be read, or
    /// [`ScenarioError::Parse`] if it is not a valid scenario.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScenarioError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Turn the scripts into injectable vendor handles.
    #[must_use]
    pub fn into_handles(self) -> VendorHandles {
        VendorHandles {
            browser: self
                .browser
                .map(|s| Arc::new(s) as Arc<dyn BrowserGeolocation>),
            amap: self.amap.map(|s| Arc::new(s) as Arc<dyn AmapGeolocation>),
            bmap: self.bmap.map(|s| Arc::new(s) as Arc<dyn BmapGeolocation>),
            qqmap: self.qqmap.map(|s| Arc::new(s) as Arc<dyn QqMapGeolocation>),
        }
    }
}
