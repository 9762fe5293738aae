//! Humidity/temperature sensor component.
//!
//! No FSM here — the single-wire climate sensor needs no reset cycle, so a
//! plain interval timer triggers a synchronous read.  Readings are always
//! published, whatever their value; unlike the gas sensor there is no
//! plausibility ceiling (see DESIGN.md).

use log::info;

use crate::device::{Alert, Device};
use crate::ports::ClimateSensorPort;

/// MQTT topic for climate telemetry.
pub const TOPIC_TEMP: &str = "pe32/hud/temp/xwwwform";

const SAMPLE_INTERVAL_MS: u32 = 30_000;

pub struct TemperatureSensorComponent<C: ClimateSensorPort> {
    climate: C,
    lastact_ms: u32,
}

impl<C: ClimateSensorPort> TemperatureSensorComponent<C> {
    pub fn new(climate: C) -> Self {
        Self {
            climate,
            lastact_ms: 0,
        }
    }

    pub fn setup(&mut self, now_ms: u32, device: &mut Device) {
        device.set_alert(Alert::TempSensorDown);
        self.climate.setup();
        // Backdate the timer one full interval so the first tick samples
        // straight away.
        self.lastact_ms = now_ms.wrapping_sub(SAMPLE_INTERVAL_MS);
        device.clear_alert(Alert::TempSensorDown);
    }

    pub fn tick(&mut self, now_ms: u32, device: &mut Device) {
        if now_ms.wrapping_sub(self.lastact_ms) >= SAMPLE_INTERVAL_MS {
            self.lastact_ms = now_ms;
            self.sample(device);
        }
    }

    fn sample(&mut self, device: &mut Device) {
        let humidity = self.climate.humidity();
        let temperature = self.climate.temperature();
        let status = self.climate.status();

        info!(
            "TemperatureSensorComponent: {} status, {:.2} 'C, {:.2} phi(RH)",
            status, temperature, humidity
        );

        device.publish(
            TOPIC_TEMP,
            format!("status={status}&temperature={temperature:.2}&humidity={humidity:.2}"),
        );
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
