//! Service layer for business logic
//!
//! This module provides the lookup logic shared between the HTTP handler
//! and the `lookup` CLI command.

pub mod geoip;

pub use geoip::{GeoIpLookup, GeoIpProvider, GeoMergeResolver};
