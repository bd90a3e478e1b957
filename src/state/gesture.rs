//! Two-paddle gear-range selection state machine.
//!
//! Holding both paddles for [`BOTH_HOLD_MS`] shifts the selector to
//! Neutral and opens a selection window. Within [`SELECT_WINDOW_MS`],
//! a single right-paddle press selects Drive and a left-paddle press
//! selects Reverse; the window honors at most one decision and expires
//! silently, leaving Neutral engaged. While a window is open, paddle
//! edges are consumed exclusively by the selector.
//!
//! The two-stage gesture keeps transient paddle contact while driving
//! from changing the gear range.

use crate::config::{BOTH_HOLD_MS, SELECT_WINDOW_MS};
use crate::state::GearRange;

/// Gesture state, owned by the control loop and fed once per tick.
pub struct PaddleGesture {
    /// Time both paddles were first observed simultaneously held.
    both_held_since: Option<u32>,
    /// One-shot flag: the hold already fired this hold-cycle.
    hold_fired: bool,
    /// Open timestamp of the selection window, if one is open.
    window_opened_ms: Option<u32>,
}

impl PaddleGesture {
    pub const fn new() -> Self {
        Self {
            both_held_since: None,
            hold_fired: false,
            window_opened_ms: None,
        }
    }

    /// Advance the state machine by one tick.
    ///
    /// Evaluation order is fixed: both-hold detection, hold release,
    /// then window lifecycle. A same-tick left+right edge tie inside an
    /// open window resolves right-first (documented policy, not a bug).
    pub fn update(
        &mut self,
        range: &mut GearRange,
        left_edge: bool,
        right_edge: bool,
        left_held: bool,
        right_held: bool,
        now_ms: u32,
    ) {
        if left_held && right_held {
            let since = *self.both_held_since.get_or_insert(now_ms);

            // Fires exactly once per continuous hold
            if !self.hold_fired && now_ms.wrapping_sub(since) >= BOTH_HOLD_MS {
                self.hold_fired = true;
                *range = GearRange::Neutral;
                self.window_opened_ms = Some(now_ms);
            }
        } else {
            // Hold released: rearm, even while a window is open
            self.both_held_since = None;
            self.hold_fired = false;
        }

        if let Some(opened_ms) = self.window_opened_ms {
            if now_ms.wrapping_sub(opened_ms) > SELECT_WINDOW_MS {
                self.window_opened_ms = None; // expired, stay in Neutral
            } else if right_edge {
                *range = GearRange::Drive;
                self.window_opened_ms = None;
            } else if left_edge {
                *range = GearRange::Reverse;
                self.window_opened_ms = None;
            }
        }
    }

    /// Whether a selection window is currently open (drives the PRND
    /// strip marker and blocks other paddle functions).
    #[inline]
    pub const fn window_active(&self) -> bool { self.window_opened_ms.is_some() }
}

impl Default for PaddleGesture {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Hold both paddles from `from_ms` to `to_ms` in 10ms ticks.
    fn hold_both(
        gesture: &mut PaddleGesture,
        range: &mut GearRange,
        from_ms: u32,
        to_ms: u32,
    ) {
        let mut t = from_ms;
        while t <= to_ms {
            gesture.update(range, false, false, true, true, t);
            t += 10;
        }
    }

    #[test]
    fn test_hold_opens_window_once() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 990);
        assert!(!gesture.window_active());
        assert_eq!(range, GearRange::Park);

        gesture.update(&mut range, false, false, true, true, 1000);
        assert!(gesture.window_active());
        assert_eq!(range, GearRange::Neutral);

        // Continuing the hold must not re-fire after a decision closes
        // the window
        gesture.update(&mut range, false, true, true, true, 1100);
        assert_eq!(range, GearRange::Drive);
        assert!(!gesture.window_active());
        hold_both(&mut gesture, &mut range, 1110, 5000);
        assert!(!gesture.window_active());
        assert_eq!(range, GearRange::Drive);
    }

    #[test]
    fn test_short_hold_does_not_fire() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 900);
        gesture.update(&mut range, false, false, false, false, 910);
        assert!(!gesture.window_active());
        assert_eq!(range, GearRange::Park);
    }

    #[test]
    fn test_release_rearms_gesture() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 1000);
        assert!(gesture.window_active());

        // Let the window expire, release, then a second full hold fires
        // a second window
        gesture.update(&mut range, false, false, false, false, 4100);
        assert!(!gesture.window_active());
        hold_both(&mut gesture, &mut range, 5000, 6000);
        assert!(gesture.window_active());
    }

    #[test]
    fn test_right_edge_selects_drive() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 1000);
        gesture.update(&mut range, false, true, false, true, 1200);
        assert_eq!(range, GearRange::Drive);
        assert!(!gesture.window_active());

        // Late left edge has no effect, window already closed
        gesture.update(&mut range, true, false, true, false, 1400);
        assert_eq!(range, GearRange::Drive);
    }

    #[test]
    fn test_left_edge_selects_reverse() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 1000);
        gesture.update(&mut range, true, false, true, false, 1500);
        assert_eq!(range, GearRange::Reverse);
        assert!(!gesture.window_active());
    }

    #[test]
    fn test_simultaneous_edges_right_wins() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 1000);
        gesture.update(&mut range, true, true, true, true, 1200);
        assert_eq!(range, GearRange::Drive);
        assert!(!gesture.window_active());
    }

    #[test]
    fn test_one_decision_per_window() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 1000);
        gesture.update(&mut range, true, false, true, false, 1100);
        assert_eq!(range, GearRange::Reverse);

        // Second edge inside what was the window interval is ignored
        gesture.update(&mut range, false, true, false, true, 1200);
        assert_eq!(range, GearRange::Reverse);
    }

    #[test]
    fn test_window_timeout_leaves_neutral() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        // Hold 0..1000ms opens the window; no edge before t=4010ms
        // closes it with the range unchanged
        hold_both(&mut gesture, &mut range, 0, 1000);
        assert_eq!(range, GearRange::Neutral);

        gesture.update(&mut range, false, false, false, false, 4000);
        assert!(gesture.window_active()); // exactly 3000ms is still open
        gesture.update(&mut range, false, false, false, false, 4010);
        assert!(!gesture.window_active());
        assert_eq!(range, GearRange::Neutral);

        // Edges after expiry are not selection input
        gesture.update(&mut range, false, true, false, true, 4020);
        assert_eq!(range, GearRange::Neutral);
    }

    #[test]
    fn test_release_during_window_keeps_window_open() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;

        hold_both(&mut gesture, &mut range, 0, 1000);
        // Paddles released: hold state rearms but the window stays open
        gesture.update(&mut range, false, false, false, false, 1200);
        assert!(gesture.window_active());

        // Decision still accepted within the window
        gesture.update(&mut range, false, true, false, true, 2000);
        assert_eq!(range, GearRange::Drive);
    }

    #[test]
    fn test_wraparound_hold_timing() {
        let mut gesture = PaddleGesture::new();
        let mut range = GearRange::Park;
        let t0 = u32::MAX - 500;

        gesture.update(&mut range, false, false, true, true, t0);
        gesture.update(&mut range, false, false, true, true, t0.wrapping_add(1000));
        assert!(gesture.window_active());
        assert_eq!(range, GearRange::Neutral);
    }
}
