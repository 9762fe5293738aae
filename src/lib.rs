//! pe32hud firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod components;
pub mod config;
pub mod device;
pub mod diagnostics;
pub mod directive;
pub mod error;
pub mod pins;
pub mod ports;
pub mod service;
