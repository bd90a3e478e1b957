//! State management for the cluster.
//!
//! - `vehicle`: Shared vehicle record (gear range, drive mode, sensors)
//! - `button`: Debounced digital input with one-shot press edges
//! - `gesture`: Two-paddle gear-range selection state machine
//! - `input`: Mode/page button processing

mod button;
mod gesture;
mod input;
mod vehicle;

pub use button::DebouncedInput;
pub use gesture::PaddleGesture;
pub use input::process_buttons;
pub use vehicle::{DriveMode, GearRange, VehicleState};
