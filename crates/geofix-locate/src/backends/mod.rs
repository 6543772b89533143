//! Backend adapters, one per positioning source.
//!
//! Each module defines the vendor handle trait the adapter consumes, the
//! vendor's native option and payload shapes, and the table mapping the
//! vendor's error codes onto [`geofix_core::ErrorCode`].

pub mod amap;
pub mod bmap;
pub mod browser;
pub mod qqmap;

pub use amap::{AmapAdapter, AmapGeolocation};
pub use bmap::{BmapAdapter, BmapGeolocation};
pub use browser::{BrowserAdapter, BrowserGeolocation};
pub use qqmap::{QqMapAdapter, QqMapGeolocation};
