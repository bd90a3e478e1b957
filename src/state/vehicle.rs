//! Shared vehicle record mutated by the control loop and overwritten
//! by the bus decoder.

use crate::config::ODOMETER_SEED_KM;

/// P/R/N/D selector position, distinct from the numeric gear.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum GearRange {
    #[default]
    Park,
    Reverse,
    Neutral,
    Drive,
}

impl GearRange {
    /// Single-letter label for the PRND strip.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Park => "P",
            Self::Reverse => "R",
            Self::Neutral => "N",
            Self::Drive => "D",
        }
    }
}

/// Driver-selectable drive mode, cycled by the mode button.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DriveMode {
    #[default]
    Comfort,
    Sport,
    SportPlus,
    Manual,
}

impl DriveMode {
    /// Advance to the next mode (cycles: Comfort → Sport → Sport+ → Manual → Comfort).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Comfort => Self::Sport,
            Self::Sport => Self::SportPlus,
            Self::SportPlus => Self::Manual,
            Self::Manual => Self::Comfort,
        }
    }

    /// One/two character label for the mode box on the main page.
    #[inline]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Comfort => "C",
            Self::Sport => "S",
            Self::SportPlus => "S+",
            Self::Manual => "M",
        }
    }

    /// Full label for the mode announcement view.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comfort => "COMFORT",
            Self::Sport => "SPORT",
            Self::SportPlus => "SPORT+",
            Self::Manual => "MANUAL",
        }
    }
}

/// Mutable record shared by all components.
///
/// Sensor fields are populated exclusively by the bus decoder; the core
/// only reads them. Missing frames are not signalled - fields simply keep
/// their last written values and `last_bus_ms` goes stale.
pub struct VehicleState {
    pub rpm: i16,
    pub map_kpa: i16,
    pub lambda: f32,
    /// Throttle position, percent.
    pub tps: i16,
    /// Coolant temperature, Celsius.
    pub clt: i16,
    /// Intake air temperature, Celsius.
    pub iat: i16,
    /// Oil pressure, bar.
    pub oil_pressure: f32,
    pub odometer_km: u32,
    /// Numeric gear: -1 = R, 0 = N, 1..n.
    pub gear: i8,
    pub gear_range: GearRange,
    pub drive_mode: DriveMode,
    /// Timestamp of the last decoded bus frame (ms).
    pub last_bus_ms: u32,
}

impl VehicleState {
    pub const fn new() -> Self {
        Self {
            rpm: 0,
            map_kpa: 0,
            lambda: 1.0,
            tps: 0,
            clt: 0,
            iat: 0,
            oil_pressure: 0.0,
            odometer_km: ODOMETER_SEED_KM,
            gear: 0,
            gear_range: GearRange::Park,
            drive_mode: DriveMode::Comfort,
            last_bus_ms: 0,
        }
    }
}

impl Default for VehicleState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_state() {
        let vehicle = VehicleState::new();
        assert_eq!(vehicle.gear_range, GearRange::Park);
        assert_eq!(vehicle.drive_mode, DriveMode::Comfort);
        assert_eq!(vehicle.gear, 0);
        assert_eq!(vehicle.odometer_km, ODOMETER_SEED_KM);
    }

    #[test]
    fn test_drive_mode_cycle_wraps() {
        let mode = DriveMode::Comfort;
        let mode = mode.next(); // -> Sport
        assert_eq!(mode, DriveMode::Sport);
        let mode = mode.next(); // -> SportPlus
        assert_eq!(mode, DriveMode::SportPlus);
        let mode = mode.next(); // -> Manual
        assert_eq!(mode, DriveMode::Manual);
        let mode = mode.next(); // -> Comfort
        assert_eq!(mode, DriveMode::Comfort);
    }

    #[test]
    fn test_labels() {
        assert_eq!(GearRange::Park.label(), "P");
        assert_eq!(GearRange::Drive.label(), "D");
        assert_eq!(DriveMode::SportPlus.short_label(), "S+");
        assert_eq!(DriveMode::SportPlus.label(), "SPORT+");
        assert_eq!(DriveMode::Manual.label(), "MANUAL");
    }
}
