//! 16x2 RGB-backlight LCD component.
//!
//! A dirty-flag renderer: whoever wrote the blackboard last owns the whole
//! screen, and this component repaints only when a fresh
//! [`DisplayUpdate`](crate::device::DisplayUpdate) is waiting.

use log::{debug, info};

use crate::device::{Alert, COLOR_YELLOW, Device, DisplayUpdate};
use crate::ports::DisplayPort;

pub const LCD_COLS: u8 = 16;
pub const LCD_ROWS: u8 = 2;

pub struct DisplayComponent<D: DisplayPort> {
    lcd: D,
}

impl<D: DisplayPort> DisplayComponent<D> {
    pub fn new(lcd: D) -> Self {
        Self { lcd }
    }

    pub fn setup(&mut self, device: &mut Device) {
        device.set_alert(Alert::Booting);
        device.set_text("Initializing...", "", COLOR_YELLOW);
        device.clear_alert(Alert::Booting);
    }

    pub fn tick(&mut self, device: &mut Device) {
        if let Some(update) = device.take_display_update() {
            debug!("DisplayComponent: show");
            self.show(&update);
        }
    }

    fn show(&mut self, update: &DisplayUpdate) {
        self.lcd.set_color(update.color);
        self.lcd.clear();
        self.lcd.set_cursor(0, 0);
        self.lcd.print(&update.line0);
        self.lcd.set_cursor(0, 1);
        self.lcd.print(&update.line1);
        info!("HUD:    [{}] [{}]", update.line0, update.line1);
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::COLOR_GREEN;

    #[derive(Debug, PartialEq)]
    enum LcdOp {
        Color(u32),
        Clear,
        Cursor(u8, u8),
        Print(String),
    }

    #[derive(Default)]
    struct FakeLcd {
        ops: Vec<LcdOp>,
    }

    impl DisplayPort for FakeLcd {
        fn set_color(&mut self, rgb: u32) {
            self.ops.push(LcdOp::Color(rgb));
        }
        fn clear(&mut self) {
            self.ops.push(LcdOp::Clear);
        }
        fn set_cursor(&mut self, col: u8, row: u8) {
            self.ops.push(LcdOp::Cursor(col, row));
        }
        fn print(&mut self, text: &str) {
            self.ops.push(LcdOp::Print(text.to_string()));
        }
    }

    #[test]
    fn setup_queues_the_boot_screen() {
        let mut display = DisplayComponent::new(FakeLcd::default());
        let mut device = Device::new();
        display.setup(&mut device);
        display.tick(&mut device);

        assert_eq!(
            display.lcd.ops,
            vec![
                LcdOp::Color(COLOR_YELLOW),
                LcdOp::Clear,
                LcdOp::Cursor(0, 0),
                LcdOp::Print("Initializing...".to_string()),
                LcdOp::Cursor(0, 1),
                LcdOp::Print(String::new()),
            ]
        );
    }

    #[test]
    fn renders_once_per_update() {
        let mut display = DisplayComponent::new(FakeLcd::default());
        let mut device = Device::new();
        device.set_text("Power: 1.21 GW", "Gas: 0.3 m3", COLOR_GREEN);

        display.tick(&mut device);
        let rendered = display.lcd.ops.len();
        assert!(rendered > 0);

        // No new write: the pane stays untouched.
        display.tick(&mut device);
        display.tick(&mut device);
        assert_eq!(display.lcd.ops.len(), rendered);
    }

    #[test]
    fn latest_writer_wins_wholesale() {
        let mut display = DisplayComponent::new(FakeLcd::default());
        let mut device = Device::new();
        device.set_text("first", "screen", COLOR_GREEN);
        device.set_text("second", "screen", COLOR_YELLOW);

        display.tick(&mut device);
        assert!(display.lcd.ops.contains(&LcdOp::Print("second".to_string())));
        assert!(!display.lcd.ops.contains(&LcdOp::Print("first".to_string())));
    }
}
