//! ipecho - a tiny "what is my IP" service
//!
//! Resolves the caller's public IP from the proxy header chain, optionally
//! enriches it with MaxMind GeoLite2 ASN / City data and Cloudflare geo
//! headers, and serves the result as text, JSON, JSONP or XML.
//!
//! # Architecture
//! - `api`: HTTP handler and middleware
//! - `payload`: response record and the four output formats
//! - `services`: GeoIP lookup and merge with proxy headers
//! - `utils`: client IP resolution, header access, flag emoji
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging and panic handling

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod payload;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
