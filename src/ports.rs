//! Port traits — the hexagonal boundary between the tick-driven core and
//! the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Component FSM (domain)
//! ```
//!
//! Driven adapters (sensor chips, the LCD, relays, the network clients)
//! implement these traits.  Components consume them via generics, so the
//! FSMs never touch hardware directly and every timing property is testable
//! against fakes.
//!
//! None of these traits may block: the WiFi/HTTP/MQTT ports wrap clients
//! whose calls are treated as instantaneous at this layer, and everything
//! else is a register/GPIO poke.

use crate::error::CommsError;

// ───────────────────────────────────────────────────────────────
// Digital output (relays, reset lines, status LEDs)
// ───────────────────────────────────────────────────────────────

/// One digital output line.  `set(true)` asserts the line in its *logical*
/// sense (relay closed, LED lit, reset active) — electrical polarity is the
/// adapter's business.
pub trait DigitalOutput {
    fn set(&mut self, active: bool);
}

// ───────────────────────────────────────────────────────────────
// Gas sensor (eCO2/TVOC chip with an I²C begin/read contract)
// ───────────────────────────────────────────────────────────────

/// Narrow interface over the gas-sensor driver.  The register-level
/// protocol lives behind it.
pub trait GasSensorPort {
    /// Device handshake.  Must be called after every hardware reset.
    fn begin(&mut self) -> bool;
    /// Latch the measurement registers; `true` if a fresh sample is there.
    fn data_ready(&mut self) -> bool;
    /// Whether the chip's internal error flag is raised.
    fn error_flag_set(&mut self) -> bool;
    /// Equivalent-CO2, ppm.  Valid after `data_ready()` returned `true`.
    fn read_eco2(&mut self) -> u16;
    /// Total volatile organic compounds, ppb.
    fn read_tvoc(&mut self) -> u16;
    /// Calibration baseline, where the chip variant supports it.
    fn read_baseline(&mut self) -> Option<u16>;
}

// ───────────────────────────────────────────────────────────────
// Climate sensor (humidity/temperature)
// ───────────────────────────────────────────────────────────────

/// Narrow interface over the humidity/temperature driver.
pub trait ClimateSensorPort {
    /// One-time driver initialisation (pin + sensor model selection).
    fn setup(&mut self);
    fn humidity(&mut self) -> f32;
    fn temperature(&mut self) -> f32;
    /// Driver status of the most recent read ("OK", "TIMEOUT", ...).
    fn status(&self) -> &'static str;
}

// ───────────────────────────────────────────────────────────────
// Character display (16x2 RGB-backlight LCD)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Backlight colour as 0xRRGGBB.
    fn set_color(&mut self, rgb: u32);
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn print(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// WiFi station
// ───────────────────────────────────────────────────────────────

/// Station status as reported by the WiFi stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiStatus {
    Idle,
    Connecting,
    Connected,
    NoSsid,
    WrongPassword,
    ConnectFailed,
    Disconnected,
}

pub trait WifiPort {
    /// Start (or restart) a station association attempt.
    fn begin(&mut self, ssid: &str, password: &str);
    fn disconnect(&mut self);
    fn status(&self) -> WifiStatus;
    /// Factory MAC of the station interface.
    fn mac_address(&self) -> [u8; 6];
}

// ───────────────────────────────────────────────────────────────
// HTTP client
// ───────────────────────────────────────────────────────────────

pub trait HttpPort {
    /// One GET of `url`.  Returns the body on a 2xx status; the caller
    /// bounds the payload it consumes.
    fn get(&mut self, url: &str) -> core::result::Result<String, CommsError>;
}

// ───────────────────────────────────────────────────────────────
// MQTT client
// ───────────────────────────────────────────────────────────────

pub trait MqttPort {
    /// Client id for the session.  Some daemons reject id-less connections.
    fn set_client_id(&mut self, id: &str);
    /// Open a session; `false` on refusal or transport failure.
    fn connect(&mut self, broker: &str, port: u16) -> bool;
    /// Process keep-alives and inbound traffic.  Non-blocking.
    fn poll(&mut self);
    fn is_connected(&self) -> bool;
    /// Publish one message.  Only meaningful while connected.
    fn publish(&mut self, topic: &str, payload: &str);
}

// ───────────────────────────────────────────────────────────────
// ICMP ping (connectivity diagnostics)
// ───────────────────────────────────────────────────────────────

/// A single echo reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingReply {
    pub response_time_ms: u16,
    pub ttl: u8,
}

pub trait PingPort {
    /// One echo request; `None` on timeout.
    fn ping(&mut self, host: &str, timeout_ms: u32) -> Option<PingReply>;
}
