//! Air quality (eCO2/TVOC) sensor component.
//!
//! The gas sensor chip needs a hardware reset pulse, a wake delay and a
//! fresh `begin()` handshake before it produces data, so this component is
//! a proper FSM rather than a plain interval sampler:
//!
//! ```text
//! None ──▶ Resetting ──▶ Waking ──▶ Active ⟲ (sample every 30s)
//!   ▲                       │          │ error flag
//!   │                       ▼          ▼
//!   └────────────────────Failing ◀─────┘
//!            (retry after 30s)
//! ```
//!
//! Readings beyond the chip's plausible range are logged and withheld from
//! publish; "data not ready" is a no-op, not a failure.

use log::{debug, error, info, warn};

use crate::device::{Alert, Device};
use crate::error::SensorError;
use crate::ports::{DigitalOutput, GasSensorPort};

/// MQTT topic for eCO2/TVOC telemetry.
pub const TOPIC_CO2: &str = "pe32/hud/co2/xwwwform";

/// Reset pulses must be at least 20us; 1ms leaves a wide margin.
const RESET_HOLD_MS: u32 = 1;
/// The chip is back up 20ms after boot/reset.
const WAKE_HOLD_MS: u32 = 20;
/// Sampling interval, also the back-off before a failed chip is re-reset.
const SAMPLE_INTERVAL_MS: u32 = 30_000;

/// Upper plausibility bounds straight from the sensor datasheet.
const ECO2_MAX_PPM: u16 = 8192;
const TVOC_MAX_PPB: u16 = 1187;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing running; the next tick starts a reset cycle.
    None,
    /// Reset line asserted.
    Resetting,
    /// Reset released, waiting for the chip to boot.
    Waking,
    /// Handshake done, sampling on the interval timer.
    Active,
    /// Handshake or read failed; waiting before the next reset cycle.
    Failing,
}

pub struct AirQualitySensorComponent<G: GasSensorPort, P: DigitalOutput> {
    gas: G,
    reset_line: P,
    state: State,
    lastact_ms: u32,
}

impl<G: GasSensorPort, P: DigitalOutput> AirQualitySensorComponent<G, P> {
    pub fn new(gas: G, reset_line: P) -> Self {
        Self {
            gas,
            reset_line,
            state: State::None,
            lastact_ms: 0,
        }
    }

    pub fn setup(&mut self, device: &mut Device) {
        device.set_alert(Alert::AirSensorDown);
        self.reset_line.set(false); // not in reset
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn tick(&mut self, now_ms: u32, device: &mut Device) {
        let elapsed = now_ms.wrapping_sub(self.lastact_ms);

        let new_state = match self.state {
            State::None => {
                // Force a reset; we _must_ handshake again after this.
                self.reset_line.set(true);
                State::Resetting
            }
            State::Resetting => {
                if elapsed < RESET_HOLD_MS {
                    return;
                }
                self.reset_line.set(false);
                State::Waking
            }
            State::Waking => {
                if elapsed < WAKE_HOLD_MS {
                    return;
                }
                if self.gas.begin() {
                    device.clear_alert(Alert::AirSensorDown);
                    info!("AirQualitySensorComponent: sensor online");
                    if self.sample(device) {
                        State::Active
                    } else {
                        State::Failing
                    }
                } else {
                    error!(
                        "AirQualitySensorComponent: {}",
                        SensorError::HandshakeFailed
                    );
                    device.set_alert(Alert::AirSensorDown);
                    State::Failing
                }
            }
            State::Active => {
                if elapsed < SAMPLE_INTERVAL_MS {
                    return;
                }
                if self.sample(device) {
                    State::Active
                } else {
                    State::Failing
                }
            }
            State::Failing => {
                if elapsed < SAMPLE_INTERVAL_MS {
                    return;
                }
                State::None
            }
        };

        debug!(
            "AirQualitySensorComponent: state {:?} -> {:?}",
            self.state, new_state
        );
        self.state = new_state;
        self.lastact_ms = now_ms;
    }

    /// One measurement attempt.  Returns `false` when the chip must be
    /// demoted to [`State::Failing`].
    fn sample(&mut self, device: &mut Device) -> bool {
        // Latch the measurement registers, then look at the error flag the
        // read may have raised.
        let ready = self.gas.data_ready();

        if self.gas.error_flag_set() {
            error!("AirQualitySensorComponent: {}", SensorError::ErrorFlagSet);
            device.set_alert(Alert::AirSensorDown);
            return false;
        }

        if !ready {
            debug!("AirQualitySensorComponent: {}", SensorError::DataNotReady);
            return true;
        }

        let eco2 = self.gas.read_eco2();
        let tvoc = self.gas.read_tvoc();
        info!(
            "AirQualitySensorComponent: {} ppm(eCO2), {} ppb(TVOC)",
            eco2, tvoc
        );

        let mut plausible = true;
        if eco2 > ECO2_MAX_PPM {
            warn!(
                "AirQualitySensorComponent: eCO2 {} ppm: {}",
                eco2,
                SensorError::OutOfRange
            );
            plausible = false;
        }
        if tvoc > TVOC_MAX_PPB {
            warn!(
                "AirQualitySensorComponent: TVOC {} ppb: {}",
                tvoc,
                SensorError::OutOfRange
            );
            plausible = false;
        }
        if plausible {
            let mut body = format!("eco2={eco2}&tvoc={tvoc}");
            if let Some(baseline) = self.gas.read_baseline() {
                body.push_str(&format!("&baseline={baseline}"));
            }
            device.publish(TOPIC_CO2, body);
        }
        true
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
