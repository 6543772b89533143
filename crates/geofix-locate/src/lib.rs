//! Single-shot geolocation over four positioning backends.
//!
//! Each backend adapter calls an injected vendor handle, normalizes its
//! native payload into a [`PositionFix`] or [`GeolocationFailure`], and
//! applies the shared accuracy gate. [`Geolocator::get_location`] races the
//! adapters: a preferred backend wins whenever it succeeds, otherwise the
//! first of the others to succeed does.

pub mod adapter;
pub mod backends;
pub mod facade;
pub mod gate;
pub mod race;
pub mod replay;

pub use adapter::{LocateAdapter, LocateResult};
pub use facade::{Geolocator, VendorHandles};
pub use race::{first_fulfilled, race_first_success};
pub use replay::{ScenarioError, ScriptedBackends};

pub use geofix_core::{
    Coordinates, ErrorCode, GeolocationFailure, GeolocatorKind, Locale, PositionFix,
    RequestOptions,
};
