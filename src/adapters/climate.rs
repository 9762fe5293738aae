//! DHT11 humidity/temperature sensor adapter.
//!
//! The single-wire bit-banging protocol belongs to an external driver; the
//! component above consumes the narrow [`ClimateSensorPort`] only and
//! publishes whatever comes out, status string included.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the single-wire driver hooks in here; until it is wired
//! reads report a TIMEOUT status.
//! On host/test: readings come from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

use crate::ports::ClimateSensorPort;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMPERATURE_BITS: AtomicU32 = AtomicU32::new(0x41A8_0000); // 21.0
#[cfg(not(target_os = "espidf"))]
static SIM_HUMIDITY_BITS: AtomicU32 = AtomicU32::new(0x4220_0000); // 40.0

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature: f32, humidity: f32) {
    SIM_TEMPERATURE_BITS.store(temperature.to_bits(), Ordering::Relaxed);
    SIM_HUMIDITY_BITS.store(humidity.to_bits(), Ordering::Relaxed);
}

pub struct Dht11Adapter {
    _data_gpio: i32,
}

impl Dht11Adapter {
    pub fn new(data_gpio: i32) -> Self {
        Self {
            _data_gpio: data_gpio,
        }
    }
}

impl ClimateSensorPort for Dht11Adapter {
    fn setup(&mut self) {
        // The external driver claims the data pin here.
    }

    #[cfg(target_os = "espidf")]
    fn humidity(&mut self) -> f32 {
        0.0
    }

    #[cfg(not(target_os = "espidf"))]
    fn humidity(&mut self) -> f32 {
        f32::from_bits(SIM_HUMIDITY_BITS.load(Ordering::Relaxed))
    }

    #[cfg(target_os = "espidf")]
    fn temperature(&mut self) -> f32 {
        0.0
    }

    #[cfg(not(target_os = "espidf"))]
    fn temperature(&mut self) -> f32 {
        f32::from_bits(SIM_TEMPERATURE_BITS.load(Ordering::Relaxed))
    }

    #[cfg(target_os = "espidf")]
    fn status(&self) -> &'static str {
        "TIMEOUT"
    }

    #[cfg(not(target_os = "espidf"))]
    fn status(&self) -> &'static str {
        "OK"
    }
}
