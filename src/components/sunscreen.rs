//! Sunscreen actuator — three relay outputs wired across the buttons of a
//! Somfy-style handset.
//!
//! Exactly one relay may be closed at any instant, and a press is held for
//! [`HOLD_MS`] before release.  A new request may redirect an in-flight
//! press to a different button; the overridden press is abandoned without a
//! minimum hold (observed handset behaviour — tolerated, see DESIGN.md).

use log::debug;

use crate::device::{Alert, Device, SunscreenButton};
use crate::ports::DigitalOutput;

/// How long a button stays pressed before it is released.
const HOLD_MS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No relay closed.
    Depressed,
    /// Freshly requested, not yet pressed.
    Request(SunscreenButton),
    /// Relay closed, waiting out the hold interval.
    Held(SunscreenButton),
}

pub struct SunscreenComponent<P: DigitalOutput> {
    select: P,
    down: P,
    up: P,
    state: State,
    pressed_at_ms: u32,
}

impl<P: DigitalOutput> SunscreenComponent<P> {
    /// Takes ownership of the three relay lines and opens them right away —
    /// we must not be pressing buttons before the first tick.
    pub fn new(mut select: P, mut down: P, mut up: P) -> Self {
        select.set(false);
        down.set(false);
        up.set(false);
        Self {
            select,
            down,
            up,
            state: State::Depressed,
            pressed_at_ms: 0,
        }
    }

    pub fn setup(&mut self, device: &mut Device) {
        device.clear_alert(Alert::SunscreenActive);
    }

    /// Request a button press.  Last write wins: an unconsumed request or an
    /// in-flight press is redirected.
    pub fn press(&mut self, button: SunscreenButton) {
        self.state = State::Request(button);
    }

    pub fn press_select(&mut self) {
        self.press(SunscreenButton::Select);
    }

    pub fn press_down(&mut self) {
        self.press(SunscreenButton::Down);
    }

    pub fn press_up(&mut self) {
        self.press(SunscreenButton::Up);
    }

    pub fn tick(&mut self, now_ms: u32, device: &mut Device) {
        if let Some(button) = device.take_press_request() {
            self.press(button);
        }

        match self.state {
            State::Depressed => {}
            State::Request(button) => {
                device.set_alert(Alert::SunscreenActive);
                debug!("SunscreenComponent: pressing {:?}", button);
                self.close_at_most_one(Some(button));
                self.pressed_at_ms = now_ms;
                self.state = State::Held(button);
            }
            State::Held(button) => {
                if now_ms.wrapping_sub(self.pressed_at_ms) >= HOLD_MS {
                    device.clear_alert(Alert::SunscreenActive);
                    debug!("SunscreenComponent: depressing {:?}", button);
                    self.close_at_most_one(None);
                    self.state = State::Depressed;
                }
            }
        }
    }

    /// Write all three lines every time, so at most one can ever be closed
    /// no matter which state we came from.
    fn close_at_most_one(&mut self, button: Option<SunscreenButton>) {
        self.select.set(button == Some(SunscreenButton::Select));
        self.down.set(button == Some(SunscreenButton::Down));
        self.up.set(button == Some(SunscreenButton::Up));
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every level written so tests can check exclusivity at every
    /// sampled instant, not just the final state.
    #[derive(Clone)]
    struct TracedPin {
        level: Rc<RefCell<(bool, Vec<bool>)>>,
    }

    impl TracedPin {
        fn new() -> Self {
            Self {
                level: Rc::new(RefCell::new((false, Vec::new()))),
            }
        }
        fn is_closed(&self) -> bool {
            self.level.borrow().0
        }
        fn ever_closed(&self) -> bool {
            self.level.borrow().1.iter().any(|&l| l)
        }
    }

    impl DigitalOutput for TracedPin {
        fn set(&mut self, active: bool) {
            let mut inner = self.level.borrow_mut();
            inner.0 = active;
            inner.1.push(active);
        }
    }

    struct Rig {
        sunscreen: SunscreenComponent<TracedPin>,
        sel: TracedPin,
        dn: TracedPin,
        up: TracedPin,
        device: Device,
    }

    impl Rig {
        fn new() -> Self {
            let (sel, dn, up) = (TracedPin::new(), TracedPin::new(), TracedPin::new());
            let mut sunscreen = SunscreenComponent::new(sel.clone(), dn.clone(), up.clone());
            let mut device = Device::new();
            sunscreen.setup(&mut device);
            Self {
                sunscreen,
                sel,
                dn,
                up,
                device,
            }
        }

        fn closed_count(&self) -> usize {
            [&self.sel, &self.dn, &self.up]
                .iter()
                .filter(|p| p.is_closed())
                .count()
        }
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut rig = Rig::new();
        rig.sunscreen.tick(0, &mut rig.device);
        assert_eq!(rig.closed_count(), 0);
        assert!(!rig.device.has_alert(Alert::SunscreenActive));
    }

    #[test]
    fn press_holds_for_debounce_then_releases() {
        let mut rig = Rig::new();
        rig.sunscreen.press(SunscreenButton::Up);
        rig.sunscreen.tick(0, &mut rig.device);
        assert!(rig.up.is_closed());
        assert_eq!(rig.closed_count(), 1);
        assert!(rig.device.has_alert(Alert::SunscreenActive));

        // Still held short of 600ms.
        rig.sunscreen.tick(599, &mut rig.device);
        assert!(rig.up.is_closed());

        // Hold interval over: everything open, alert gone.
        rig.sunscreen.tick(600, &mut rig.device);
        assert_eq!(rig.closed_count(), 0);
        assert!(!rig.device.has_alert(Alert::SunscreenActive));
    }

    #[test]
    fn redirect_before_hold_elapses_never_closes_the_old_relay() {
        let mut rig = Rig::new();
        rig.sunscreen.press_up();
        rig.sunscreen.press_down();
        rig.sunscreen.tick(0, &mut rig.device);

        assert!(rig.dn.is_closed());
        assert!(!rig.up.ever_closed(), "UP was overridden before any press");
        assert_eq!(rig.closed_count(), 1);
    }

    #[test]
    fn redirect_of_inflight_press_swaps_relays_exclusively() {
        let mut rig = Rig::new();
        rig.sunscreen.press(SunscreenButton::Up);
        rig.sunscreen.tick(0, &mut rig.device);
        assert!(rig.up.is_closed());

        // Redirect mid-hold.
        rig.sunscreen.press(SunscreenButton::Down);
        rig.sunscreen.tick(100, &mut rig.device);
        assert!(rig.dn.is_closed());
        assert!(!rig.up.is_closed(), "abandoned press opens immediately");
        assert_eq!(rig.closed_count(), 1);

        // The new press gets its own full hold window.
        rig.sunscreen.tick(600, &mut rig.device);
        assert!(rig.dn.is_closed());
        rig.sunscreen.tick(700, &mut rig.device);
        assert_eq!(rig.closed_count(), 0);
    }

    #[test]
    fn consumes_blackboard_requests() {
        let mut rig = Rig::new();
        rig.device.request_action(crate::device::SunscreenAction::Select);
        rig.sunscreen.tick(0, &mut rig.device);
        assert!(rig.sel.is_closed());
    }

    #[test]
    fn hold_timing_survives_clock_wrap() {
        let mut rig = Rig::new();
        let start = u32::MAX - 100;
        rig.sunscreen.press(SunscreenButton::Up);
        rig.sunscreen.tick(start, &mut rig.device);
        assert!(rig.up.is_closed());
        rig.sunscreen.tick(start.wrapping_add(599), &mut rig.device);
        assert!(rig.up.is_closed());
        rig.sunscreen.tick(start.wrapping_add(600), &mut rig.device);
        assert_eq!(rig.closed_count(), 0);
    }
}
