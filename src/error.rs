//! Unified error types for the pe32hud firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level control loop's error handling uniform. All variants are `Copy`
//! so they can be passed around the tick loop without allocation.
//!
//! Nothing in this firmware treats an error as fatal: every failure path
//! parks the owning component in a retrying state and raises an alert bit
//! on the [`Device`](crate::device::Device) blackboard.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be initialised or returned an error flag.
    Sensor(SensorError),
    /// A communication subsystem failed.
    Comms(CommsError),
    /// The display panel could not be driven.
    Display(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Display(msg) => write!(f, "display: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The device handshake (`begin`) failed after a reset cycle.
    HandshakeFailed,
    /// The sensor raised its internal error flag during a read.
    ErrorFlagSet,
    /// Reading is outside the physically plausible range.
    OutOfRange,
    /// The sensor has no fresh measurement yet.
    DataNotReady,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandshakeFailed => write!(f, "handshake failed"),
            Self::ErrorFlagSet => write!(f, "error flag set"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::DataNotReady => write!(f, "data not ready"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    WifiDown,
    MqttConnectFailed,
    /// HTTP transfer failed before any status line was received.
    HttpConnectFailed,
    /// HTTP completed with a non-2xx status code.
    HttpStatus(u16),
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiDown => write!(f, "WiFi down"),
            Self::MqttConnectFailed => write!(f, "MQTT connect failed"),
            Self::HttpConnectFailed => write!(f, "HTTP connect failed"),
            Self::HttpStatus(code) => write!(f, "HTTP/{code}"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
