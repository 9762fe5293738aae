//! CCS811 eCO2/TVOC gas sensor adapter.
//!
//! The chip's register protocol (APP_START, MEAS_MODE, ALG_RESULT_DATA,
//! BASELINE, ...) belongs to an external driver that attaches to the shared
//! I²C bus at this seam; the FSM above only ever sees the narrow
//! [`GasSensorPort`] contract.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the I²C driver hooks in here; until it is wired the
//! handshake reports failure and the component stays in its retry cycle.
//! On host/test: readings come from static atomics for injection.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::ports::GasSensorPort;

static SIM_ECO2: AtomicU16 = AtomicU16::new(400);
static SIM_TVOC: AtomicU16 = AtomicU16::new(0);
static SIM_BASELINE: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_BEGIN_OK: AtomicBool = AtomicBool::new(true);
static SIM_READY: AtomicBool = AtomicBool::new(true);
static SIM_ERROR: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_readings(eco2: u16, tvoc: u16) {
    SIM_ECO2.store(eco2, Ordering::Relaxed);
    SIM_TVOC.store(tvoc, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_error(error: bool) {
    SIM_ERROR.store(error, Ordering::Relaxed);
}

/// Adapter over the gas sensor chip at I²C address 0x5A.
pub struct Ccs811Adapter {
    _i2c_addr: u8,
}

impl Ccs811Adapter {
    pub fn new() -> Self {
        Self { _i2c_addr: 0x5A }
    }
}

impl Default for Ccs811Adapter {
    fn default() -> Self {
        Self::new()
    }
}

impl GasSensorPort for Ccs811Adapter {
    #[cfg(target_os = "espidf")]
    fn begin(&mut self) -> bool {
        // Handshake sequence once the external I²C driver is attached:
        // 1. read HW_ID (expect 0x81)
        // 2. APP_START
        // 3. MEAS_MODE = 1s drive mode
        // Reporting failure here keeps the component in its reset/retry
        // cycle and the air-sensor alert visible.
        false
    }

    #[cfg(not(target_os = "espidf"))]
    fn begin(&mut self) -> bool {
        SIM_BEGIN_OK.load(Ordering::Relaxed)
    }

    fn data_ready(&mut self) -> bool {
        SIM_READY.load(Ordering::Relaxed)
    }

    fn error_flag_set(&mut self) -> bool {
        SIM_ERROR.load(Ordering::Relaxed)
    }

    fn read_eco2(&mut self) -> u16 {
        SIM_ECO2.load(Ordering::Relaxed)
    }

    fn read_tvoc(&mut self) -> u16 {
        SIM_TVOC.load(Ordering::Relaxed)
    }

    fn read_baseline(&mut self) -> Option<u16> {
        match SIM_BASELINE.load(Ordering::Relaxed) {
            0 => None,
            b => Some(b),
        }
    }
}
