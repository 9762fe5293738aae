//! Status LED blink-waveform interpreter.
//!
//! Two LEDs: the primary (red) one plays a per-mode waveform, the secondary
//! (blue) one is simply on for every non-normal mode.  A waveform is a
//! sequence of signed millisecond durations — positive means "primary on
//! for this long", negative "off", and a terminating `0` ends one cycle.
//! After the terminator the engine waits exactly [`RESTART_GAP_MS`] before
//! replaying; that fixed dark gap is what visually separates repeated
//! patterns.
//!
//! Mode changes are picked up only at that restart boundary, never
//! mid-cycle, so an alert change becomes visible within at most one full
//! waveform plus the gap.

use log::info;

use crate::device::{BlinkMode, Device};
use crate::ports::DigitalOutput;

/// Dark pause between waveform repetitions.
const RESTART_GAP_MS: u32 = 1000;

/// Quiet heartbeat: a 10 ms blip roughly once a second.
const BLINK_NORMAL: &[i16] = &[10, 0];
/// Generic boot/problem pattern.
const BLINK_BOOT: &[i16] = &[100, 0];
/// "wiii-fi": one long, one short.
const BLINK_WIFI: &[i16] = &[100, 100, 100, -100, 100, 0];
/// "d-h-t": three shorts.
const BLINK_TEMP: &[i16] = &[100, -100, 100, -100, 100, 0];
/// "c-ooo-2": short, long, short.
const BLINK_AIR: &[i16] = &[100, -100, 100, 100, 100, -100, 100, 0];
/// Rapid flicker while a sunscreen button is held.
const BLINK_SUNSCREEN: &[i16] = &[
    50, -50, 50, -50, 50, -50, 50, -50, 50, -50, 50, -50, 50, 0,
];

fn waveform(mode: BlinkMode) -> &'static [i16] {
    match mode {
        BlinkMode::Normal => BLINK_NORMAL,
        BlinkMode::Boot => BLINK_BOOT,
        BlinkMode::WifiDown => BLINK_WIFI,
        BlinkMode::TempSensorDown => BLINK_TEMP,
        BlinkMode::AirSensorDown => BLINK_AIR,
        BlinkMode::Sunscreen => BLINK_SUNSCREEN,
    }
}

/// Cursor into the waveform currently being played.
struct Playback {
    mode: BlinkMode,
    cursor: usize,
    since_ms: u32,
}

pub struct LedStatusComponent<P: DigitalOutput> {
    red: P,
    blue: P,
    /// Requested mode; takes effect at the next restart boundary.
    mode: BlinkMode,
    playback: Option<Playback>,
}

impl<P: DigitalOutput> LedStatusComponent<P> {
    pub fn new(red: P, blue: P) -> Self {
        Self {
            red,
            blue,
            mode: BlinkMode::Boot,
            playback: None,
        }
    }

    pub fn setup(&mut self) {
        // Blue on during boot (or errors). Red can show stuff whenever.
        self.blue.set(true);
        self.red.set(false);
    }

    /// Adopt a new target mode.  The waveform in flight keeps playing.
    fn set_blink(&mut self, mode: BlinkMode) {
        if mode != self.mode {
            info!("LedStatusComponent: switching blinkmode to {:?}", mode);
            self.mode = mode;
        }
    }

    pub fn tick(&mut self, now_ms: u32, device: &Device) {
        self.set_blink(device.blink_mode());

        let Some(play) = &mut self.playback else {
            // Start blinking.
            let wf = waveform(self.mode);
            self.blue.set(self.mode != BlinkMode::Normal);
            self.red.set(wf[0] > 0);
            self.playback = Some(Playback {
                mode: self.mode,
                cursor: 0,
                since_ms: now_ms,
            });
            return;
        };

        let wf = waveform(play.mode);
        let entry = wf[play.cursor];
        if entry != 0 {
            // Mid-cycle: advance once the current segment has elapsed.
            if now_ms.wrapping_sub(play.since_ms) >= u32::from(entry.unsigned_abs()) {
                play.cursor += 1;
                play.since_ms = now_ms;
                let on = wf[play.cursor] > 0;
                self.red.set(on);
            }
        } else if now_ms.wrapping_sub(play.since_ms) >= RESTART_GAP_MS {
            // Terminator reached and the gap has elapsed: restart with the
            // current target mode.
            let wf = waveform(self.mode);
            play.mode = self.mode;
            play.cursor = 0;
            play.since_ms = now_ms;
            let on = wf[0] > 0;
            let non_normal = self.mode != BlinkMode::Normal;
            self.red.set(on);
            self.blue.set(non_normal);
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
