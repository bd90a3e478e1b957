//! Application configuration: timing constants and display layout.
//!
//! All timing values are in milliseconds and compared with
//! `u32::wrapping_sub`, so they stay correct across tick-counter
//! wraparound after extended uptime.

/// Control loop period. Inputs are polled and state machines advanced
/// at this rate; rendering is throttled separately by [`UI_PERIOD_MS`].
pub const TICK_MS: u64 = 5;

/// Raw level must hold steady this long before a stable change commits.
pub const DEBOUNCE_MS: u32 = 40;

/// Both paddles must be held this long to open the gear-range
/// selection window.
pub const BOTH_HOLD_MS: u32 = 1000;

/// Selection window duration. Expires silently, leaving Neutral engaged.
pub const SELECT_WINDOW_MS: u32 = 3000;

/// UI redraw period (10 Hz). Input latency is decoupled from this.
pub const UI_PERIOD_MS: u32 = 100;

/// Splash screen duration from boot.
pub const SPLASH_MS: u32 = 2000;

/// Drive-mode announcement duration.
pub const MODE_ANNOUNCE_MS: u32 = 1500;

/// Display dimensions (SSD1306, 128x64 monochrome).
pub const SCREEN_WIDTH: i32 = 128;
pub const SCREEN_HEIGHT: i32 = 64;

/// Odometer value shown at startup. There is no persistence; the
/// decoder overwrites this once the bus provides a total.
pub const ODOMETER_SEED_KM: u32 = 423_911;

/// Gauge ranges for the bar widgets. Values outside are clamped.
pub const MAP_KPA_MAX: i32 = 250;
pub const RPM_MAX: i32 = 9000;
pub const LAMBDA_MIN: f32 = 0.70;
pub const LAMBDA_MAX: f32 = 1.24;
