//! System configuration parameters
//!
//! Network endpoints and polling cadence for the pe32hud device.
//! Values can be overridden from a JSON document at flash time.
//!
//! FSM timing constants (reset pulse widths, debounce/hold intervals,
//! sample intervals) deliberately do NOT live here — they are hardware
//! design constants owned by the individual components.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- WiFi ---
    /// Station SSID.
    pub wifi_ssid: heapless::String<32>,
    /// Station passphrase (WPA2; empty for an open network).
    pub wifi_password: heapless::String<64>,

    // --- MQTT ---
    /// Broker hostname or IP.
    pub mqtt_broker: heapless::String<64>,
    /// Broker TCP port.
    pub mqtt_port: u16,

    // --- Remote directive ---
    /// URL of the plain-text HUD status document.
    pub hud_url: heapless::String<128>,
    /// Remote fetch / MQTT session check interval (milliseconds).
    pub fetch_interval_ms: u32,

    // --- Control loop ---
    /// Scheduler tick interval (milliseconds).
    pub tick_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
            mqtt_broker: str_into("mqtt.example.com"),
            mqtt_port: 1883,
            hud_url: str_into("http://hud.example.com/status.txt"),
            fetch_interval_ms: 5_000,
            tick_interval_ms: 10,
        }
    }
}

impl SystemConfig {
    /// Parse a configuration document (flashed alongside the firmware or
    /// injected via the environment on host builds).
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        serde_json::from_str(json).map_err(|_| crate::error::Error::Config("invalid JSON document"))
    }
}

fn str_into<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    // Truncate silently; defaults above all fit.
    let _ = out.push_str(&s[..s.len().min(N)]);
    out
}
