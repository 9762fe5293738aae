//! The status blackboard shared by every component.
//!
//! [`Device`] is the single synchronisation point of the firmware: sensors
//! and the network component push alerts, display text, actuator requests
//! and outbound telemetry into it; the display, LED and sunscreen components
//! consume from it.  No component ever calls another component directly.
//!
//! Every method is a plain O(1) state transition — nothing here blocks or
//! fails.  Because all mutation funnels through these methods from the one
//! control thread, the system needs no locks.

use log::warn;

// ---------------------------------------------------------------------------
// Alert bits
// ---------------------------------------------------------------------------

/// One alert per component-owned resource.  A bit is set exactly while the
/// owning component considers the resource unavailable (or, for the
/// sunscreen, while a button is held).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Alert {
    Booting = 0b0000_0001,
    WifiDown = 0b0000_0010,
    TempSensorDown = 0b0000_0100,
    AirSensorDown = 0b0000_1000,
    SunscreenActive = 0b0001_0000,
}

impl Alert {
    /// Return the bitmask for this alert.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Blink mode (derived from the alert set)
// ---------------------------------------------------------------------------

/// The one waveform the status LED should play, derived from the alert
/// bitmask by fixed priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkMode {
    /// Quiet heartbeat — no alert bits set.
    Normal,
    /// Generic boot/problem pattern for any bit without its own pattern.
    Boot,
    WifiDown,
    TempSensorDown,
    AirSensorDown,
    Sunscreen,
}

/// Pure priority selection: sunscreen > wifi > temperature sensor > air
/// sensor > any remaining bit > heartbeat.
pub fn derive_blink_mode(alerts: u8) -> BlinkMode {
    if alerts & Alert::SunscreenActive.mask() != 0 {
        BlinkMode::Sunscreen
    } else if alerts & Alert::WifiDown.mask() != 0 {
        BlinkMode::WifiDown
    } else if alerts & Alert::TempSensorDown.mask() != 0 {
        BlinkMode::TempSensorDown
    } else if alerts & Alert::AirSensorDown.mask() != 0 {
        BlinkMode::AirSensorDown
    } else if alerts != 0 {
        BlinkMode::Boot
    } else {
        BlinkMode::Normal
    }
}

// ---------------------------------------------------------------------------
// Sunscreen actions
// ---------------------------------------------------------------------------

/// A remote- or locally-requested actuator action.  `None` is the explicit
/// reset: it clears the dedup state so a later repeat of the same action
/// triggers again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SunscreenAction {
    #[default]
    None,
    Select,
    Down,
    Up,
}

/// One of the three handset buttons, as consumed by the sunscreen FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunscreenButton {
    Select,
    Down,
    Up,
}

// ---------------------------------------------------------------------------
// Display state
// ---------------------------------------------------------------------------

pub const COLOR_RED: u32 = 0xff0000;
pub const COLOR_YELLOW: u32 = 0xffff00;
pub const COLOR_GREEN: u32 = 0x00ff00;
pub const COLOR_BLUE: u32 = 0x0000ff;

/// Maximum stored line length.  The panel shows 16 columns; longer text is
/// kept so the renderer decides what to do with the tail.
pub type DisplayLine = heapless::String<64>;

/// A freshly written two-line screen, consumed once by the display
/// component (the dirty flag is its presence in the blackboard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub line0: DisplayLine,
    pub line1: DisplayLine,
    pub color: u32,
}

fn bounded_line(text: &str) -> DisplayLine {
    let mut line = DisplayLine::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}

// ---------------------------------------------------------------------------
// Outbound telemetry
// ---------------------------------------------------------------------------

/// One fire-and-forget telemetry record, drained toward the network
/// component within the same scheduler cycle it was pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub topic: &'static str,
    pub body: String,
}

/// Capacity of the publish outbox drained once per scheduler cycle.
pub const OUTBOX_CAP: usize = 8;

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// Process-wide status blackboard.  Owned by the scheduler and passed
/// `&mut` into every component tick.
pub struct Device {
    /// "EUI48:aa:bb:cc:dd:ee:ff" — something unique to identify the device
    /// by.  Populated from the WiFi MAC address at network setup.
    guid: heapless::String<24>,
    alerts: u8,
    blink: BlinkMode,
    last_sunscreen: SunscreenAction,
    pending_press: Option<SunscreenButton>,
    pending_display: Option<DisplayUpdate>,
    outbox: heapless::Vec<Publication, OUTBOX_CAP>,
}

impl Device {
    pub fn new() -> Self {
        let mut guid = heapless::String::new();
        let _ = guid.push_str("EUI48:11:22:33:44:55:66");
        Self {
            guid,
            alerts: 0,
            blink: BlinkMode::Normal,
            last_sunscreen: SunscreenAction::None,
            pending_press: None,
            pending_display: None,
            outbox: heapless::Vec::new(),
        }
    }

    // ── Identity ──────────────────────────────────────────────

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn set_guid(&mut self, guid: &str) {
        self.guid.clear();
        for ch in guid.chars() {
            if self.guid.push(ch).is_err() {
                break;
            }
        }
    }

    // ── Alerts / blink mode ───────────────────────────────────

    pub fn set_alert(&mut self, alert: Alert) {
        self.set_or_clear_alert(alert, true);
    }

    pub fn clear_alert(&mut self, alert: Alert) {
        self.set_or_clear_alert(alert, false);
    }

    fn set_or_clear_alert(&mut self, alert: Alert, is_alert: bool) {
        if is_alert {
            self.alerts |= alert.mask();
        } else {
            self.alerts &= !alert.mask();
        }
        self.blink = derive_blink_mode(self.alerts);
    }

    pub fn has_alert(&self, alert: Alert) -> bool {
        self.alerts & alert.mask() != 0
    }

    /// The currently selected blink waveform.  Recomputed synchronously on
    /// every alert change.
    pub fn blink_mode(&self) -> BlinkMode {
        self.blink
    }

    // ── Display ───────────────────────────────────────────────

    /// Overwrite the screen wholesale and mark it dirty.  The latest writer
    /// wins; an unconsumed update is silently superseded.
    pub fn set_text(&mut self, line0: &str, line1: &str, color: u32) {
        self.pending_display = Some(DisplayUpdate {
            line0: bounded_line(line0),
            line1: bounded_line(line1),
            color,
        });
    }

    /// Error shorthand: two lines on the pending-yellow background.
    pub fn set_error(&mut self, line0: &str, line1: &str) {
        self.set_text(line0, line1, COLOR_YELLOW);
    }

    /// Consume the dirty screen, if any.
    pub fn take_display_update(&mut self) -> Option<DisplayUpdate> {
        self.pending_display.take()
    }

    // ── Sunscreen actions ─────────────────────────────────────

    /// Forward an action to the sunscreen actuator, unless it repeats the
    /// last forwarded one.  The dedup stops a remote directive that keeps
    /// its `action:` line up from re-triggering the press on every fetch.
    pub fn request_action(&mut self, action: SunscreenAction) {
        if self.last_sunscreen == action {
            return;
        }
        match action {
            SunscreenAction::Select => self.pending_press = Some(SunscreenButton::Select),
            SunscreenAction::Down => self.pending_press = Some(SunscreenButton::Down),
            SunscreenAction::Up => self.pending_press = Some(SunscreenButton::Up),
            SunscreenAction::None => {}
        }
        self.last_sunscreen = action;
    }

    /// Consume the pending button press, if any.  A newer request overwrote
    /// any unconsumed one — there is no queue.
    pub fn take_press_request(&mut self) -> Option<SunscreenButton> {
        self.pending_press.take()
    }

    // ── Telemetry ─────────────────────────────────────────────

    /// Queue one record for the network component.  Fire-and-forget: if the
    /// bounded outbox is full (the network component is not draining), the
    /// record is dropped.
    pub fn publish(&mut self, topic: &'static str, body: String) {
        if let Err(p) = self.outbox.push(Publication { topic, body }) {
            warn!("Device: outbox full, dropping publication for {}", p.topic);
        }
    }

    /// Drain the outbox (called by the scheduler each cycle).
    pub fn take_outbox(&mut self) -> heapless::Vec<Publication, OUTBOX_CAP> {
        core::mem::take(&mut self.outbox)
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
