//! Plain GPIO output lines.
//!
//! The relays, the gas-sensor reset and the two status LEDs on this board
//! are all active-LOW, so [`OutputLine`] separates the logical state the
//! FSMs think in from the electrical level on the pin.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: pokes the GPIO matrix directly.
//! On host/test: tracks state in-memory only.

use crate::ports::DigitalOutput;

#[cfg(target_os = "espidf")]
fn hw_init_output(gpio: i32) {
    use esp_idf_svc::sys::{gpio_mode_t_GPIO_MODE_OUTPUT, gpio_set_direction};
    let _ = unsafe { gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_OUTPUT) };
}

#[cfg(target_os = "espidf")]
fn hw_write(gpio: i32, high: bool) {
    let _ = unsafe { esp_idf_svc::sys::gpio_set_level(gpio, u32::from(high)) };
}

#[cfg(not(target_os = "espidf"))]
fn hw_init_output(_gpio: i32) {}

#[cfg(not(target_os = "espidf"))]
fn hw_write(_gpio: i32, _high: bool) {}

/// One output pin with a fixed polarity.
pub struct OutputLine {
    gpio: i32,
    active_low: bool,
    active: bool,
}

impl OutputLine {
    /// Configure the pin as an output and drive it inactive.
    pub fn new(gpio: i32, active_low: bool) -> Self {
        hw_init_output(gpio);
        let mut line = Self {
            gpio,
            active_low,
            active: false,
        };
        line.set(false);
        line
    }

    /// Convenience for this board's relay/LED wiring.
    pub fn active_low(gpio: i32) -> Self {
        Self::new(gpio, true)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl DigitalOutput for OutputLine {
    fn set(&mut self, active: bool) {
        self.active = active;
        hw_write(self.gpio, active != self.active_low);
    }
}

/// Bridge for boards wired through an `embedded-hal` pin (I/O expanders,
/// HAL-owned GPIOs).  Write errors on a plain pin are not actionable
/// mid-tick and are discarded.
pub struct HalPin<T>(pub T);

impl<T: embedded_hal::digital::OutputPin> DigitalOutput for HalPin<T> {
    fn set(&mut self, active: bool) {
        if active {
            let _ = self.0.set_high();
        } else {
            let _ = self.0.set_low();
        }
    }
}
