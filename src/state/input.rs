//! Mode/page button processing.
//!
//! Translates debounced press edges into state changes: the mode button
//! cycles the drive mode and requests a UI announcement, the page button
//! advances the page index.

use crate::state::VehicleState;
use crate::ui::UiState;

/// Process mode/page button edges for a single tick.
///
/// No guard conditions: a mode edge always advances the drive mode by
/// one position (modulo 4) and enters the announcement view with a
/// fresh start timestamp; a page edge always advances the page
/// (wrapping).
pub fn process_buttons(
    mode_edge: bool,
    page_edge: bool,
    vehicle: &mut VehicleState,
    ui: &mut UiState,
    now_ms: u32,
) {
    if mode_edge {
        vehicle.drive_mode = vehicle.drive_mode.next();
        ui.announce_mode(now_ms);
    }

    if page_edge {
        ui.next_page();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DriveMode;
    use crate::ui::{Page, UiMode};

    #[test]
    fn test_mode_edge_cycles_and_announces() {
        let mut vehicle = VehicleState::new();
        let mut ui = UiState::new(0);

        process_buttons(true, false, &mut vehicle, &mut ui, 2500);
        assert_eq!(vehicle.drive_mode, DriveMode::Sport);
        assert_eq!(ui.mode(), UiMode::ModeAnnounce);
    }

    #[test]
    fn test_each_press_announces_once_through_full_cycle() {
        let mut vehicle = VehicleState::new();
        let mut ui = UiState::new(0);
        let expected = [
            DriveMode::Sport,
            DriveMode::SportPlus,
            DriveMode::Manual,
            DriveMode::Comfort,
        ];

        for (i, want) in expected.iter().enumerate() {
            let now = 3000 + i as u32 * 2000;
            process_buttons(true, false, &mut vehicle, &mut ui, now);
            assert_eq!(vehicle.drive_mode, *want);
            assert_eq!(ui.mode(), UiMode::ModeAnnounce);
            assert_eq!(ui.announce_start_ms(), now);
        }
    }

    #[test]
    fn test_page_edge_advances_page() {
        let mut vehicle = VehicleState::new();
        let mut ui = UiState::new(0);

        process_buttons(false, true, &mut vehicle, &mut ui, 2500);
        assert_eq!(ui.page(), Page::Sensors);
        assert_eq!(vehicle.drive_mode, DriveMode::Comfort);
    }

    #[test]
    fn test_no_edges_no_changes() {
        let mut vehicle = VehicleState::new();
        let mut ui = UiState::new(0);

        process_buttons(false, false, &mut vehicle, &mut ui, 2500);
        assert_eq!(vehicle.drive_mode, DriveMode::Comfort);
        assert_eq!(ui.page(), Page::Main);
    }
}
