//! Debounced digital input with time-based edge detection.
//!
//! Filters one raw GPIO line into a stable logical level and one-shot
//! press edges. Inputs are active-low with pull-ups: electrically HIGH
//! means released, LOW means pressed. Any burst of raw transitions
//! shorter than the debounce interval produces zero stable changes.

use crate::config::DEBOUNCE_MS;

/// Debounce state for a single physical input.
pub struct DebouncedInput {
    /// Stable logical level (true = HIGH = released, pull-up convention).
    stable: bool,
    /// Last raw sample, stable or not.
    last_raw: bool,
    /// Timestamp of the last raw-level change (ms).
    last_change_ms: u32,
}

impl DebouncedInput {
    /// Create a new input in the released state.
    pub const fn new() -> Self {
        Self {
            stable: true,
            last_raw: true,
            last_change_ms: 0,
        }
    }

    /// Feed one raw sample; returns true once per press (stable HIGH→LOW).
    ///
    /// A raw change restarts the debounce interval. Only after the raw
    /// level has held for at least `DEBOUNCE_MS` does the stable level
    /// commit, and only the released-to-pressed transition reports an edge.
    pub fn just_pressed(
        &mut self,
        raw_high: bool,
        now_ms: u32,
    ) -> bool {
        if raw_high != self.last_raw {
            self.last_raw = raw_high;
            self.last_change_ms = now_ms;
        }

        if now_ms.wrapping_sub(self.last_change_ms) >= DEBOUNCE_MS && raw_high != self.stable {
            let was_released = self.stable;
            self.stable = raw_high;
            return was_released && !raw_high;
        }

        false
    }

    /// Current stable level interpreted as pressed. Never debounce-pending.
    #[inline]
    pub const fn is_held(&self) -> bool { !self.stable }
}

impl Default for DebouncedInput {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
