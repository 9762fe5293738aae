//! GPIO / peripheral pin assignments for the pe32hud board.
//!
//! Single source of truth — every adapter references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sunscreen remote (three relay-driven buttons on a Somfy handset)
// ---------------------------------------------------------------------------

/// Relay output closing the handset SELECT button (active LOW).
pub const SUNSCREEN_SEL_GPIO: i32 = 12;
/// Relay output closing the handset DOWN button (active LOW).
pub const SUNSCREEN_DN_GPIO: i32 = 13;
/// Relay output closing the handset UP button (active LOW).
pub const SUNSCREEN_UP_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Air quality sensor (I²C, with a dedicated reset line)
// ---------------------------------------------------------------------------

/// Gas sensor hardware reset line (active LOW, >= 20 µs pulse).
pub const AIRQ_RST_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Climate sensor (single-wire humidity/temperature)
// ---------------------------------------------------------------------------

/// Data pin of the humidity/temperature sensor.
pub const CLIMATE_DATA_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Status LEDs
// ---------------------------------------------------------------------------

/// Primary (red) status LED — blink waveform output (active LOW).
pub const LED_RED_GPIO: i32 = 0;
/// Secondary (blue) status LED — on for every non-normal blink mode
/// (active LOW).
pub const LED_BLUE_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// I²C bus (display + gas sensor share it)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 4;
pub const I2C_SCL_GPIO: i32 = 5;
