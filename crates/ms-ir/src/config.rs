//! Machine configuration read (and overridden) by the playback driver.

use core::fmt;

use crate::score::CHANNEL_COUNT;

/// Total axes on the machine: three spatial axes plus the extruder.
pub const AXIS_COUNT: usize = 4;

/// Index of the extruder axis, which playback never moves.
pub const E_AXIS: usize = 3;

/// Timbre divisor programmed on channel 0 during playback.
pub const DEFAULT_TIMBRE: u8 = 4;

/// Per-axis motion parameters.
#[derive(Clone, Copy, Debug)]
pub struct AxisConfig {
    /// Full steps (times microstepping) per mm of travel
    pub steps_per_unit: f32,
    /// Software travel limit in mm
    pub travel_limit: f32,
    /// Maximum feed rate in mm/s
    pub max_feed_rate: f32,
    /// Maximum acceleration in mm/s^2
    pub max_acceleration: f32,
}

/// Machine-wide motion configuration.
///
/// Playback reads steps-per-unit and travel limits and lifts every
/// velocity/acceleration/jerk limit; see [`MachineConfig::lift_motion_limits`].
#[derive(Clone, Copy, Debug)]
pub struct MachineConfig {
    /// The three spatial axes used as synthesis channels
    pub axes: [AxisConfig; CHANNEL_COUNT],
    /// Global acceleration in mm/s^2
    pub acceleration: f32,
    /// Retract acceleration in mm/s^2
    pub retract_acceleration: f32,
    /// XY jerk limit in mm/s
    pub max_xy_jerk: f32,
    /// Z jerk limit in mm/s
    pub max_z_jerk: f32,
    /// Configured microstep mode per channel
    pub microstep_modes: [u8; CHANNEL_COUNT],
}

impl Default for MachineConfig {
    fn default() -> Self {
        // A garden-variety Cartesian machine.
        Self {
            axes: [
                AxisConfig {
                    steps_per_unit: 78.74,
                    travel_limit: 205.0,
                    max_feed_rate: 500.0,
                    max_acceleration: 9000.0,
                },
                AxisConfig {
                    steps_per_unit: 78.74,
                    travel_limit: 205.0,
                    max_feed_rate: 500.0,
                    max_acceleration: 9000.0,
                },
                AxisConfig {
                    steps_per_unit: 2560.0,
                    travel_limit: 120.0,
                    max_feed_rate: 5.0,
                    max_acceleration: 100.0,
                },
            ],
            acceleration: 3000.0,
            retract_acceleration: 3000.0,
            max_xy_jerk: 20.0,
            max_z_jerk: 0.4,
            microstep_modes: [16, 16, 16],
        }
    }
}

impl MachineConfig {
    /// Check the preconditions playback relies on: strictly positive,
    /// finite steps-per-unit and travel limit on every channel axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, cfg) in self.axes.iter().enumerate() {
            if !(cfg.steps_per_unit.is_finite() && cfg.steps_per_unit > 0.0) {
                return Err(ConfigError::BadStepsPerUnit(axis));
            }
            if !(cfg.travel_limit.is_finite() && cfg.travel_limit > 0.0) {
                return Err(ConfigError::BadTravelLimit(axis));
            }
        }
        Ok(())
    }

    /// Lift every velocity/acceleration/jerk limit to the maximum finite
    /// value so tone-driven feed rates are honored exactly instead of being
    /// clipped (which would detune the pitch).
    ///
    /// This is not undone after playback; callers that care should keep a
    /// copy of the prior configuration.
    pub fn lift_motion_limits(&mut self) {
        for axis in &mut self.axes {
            axis.max_feed_rate = f32::MAX;
            axis.max_acceleration = f32::MAX;
        }
        self.acceleration = f32::MAX;
        self.retract_acceleration = f32::MAX;
        self.max_xy_jerk = f32::MAX;
        self.max_z_jerk = f32::MAX;
    }

    /// Timbre divisor per channel: channel 0 is driven at a coarser mode
    /// for a deeper voice, channels 1 and 2 keep their configured mode.
    pub fn timbre_divisors(&self) -> [u8; CHANNEL_COUNT] {
        [
            DEFAULT_TIMBRE,
            self.microstep_modes[1],
            self.microstep_modes[2],
        ]
    }
}

/// Error type for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// steps-per-unit on this axis is zero, negative or non-finite
    BadStepsPerUnit(usize),
    /// travel limit on this axis is zero, negative or non-finite
    BadTravelLimit(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BadStepsPerUnit(axis) => {
                write!(f, "axis {} has an invalid steps-per-unit", axis)
            }
            ConfigError::BadTravelLimit(axis) => {
                write!(f, "axis {} has an invalid travel limit", axis)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(MachineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_steps_per_unit_rejected() {
        let mut config = MachineConfig::default();
        config.axes[1].steps_per_unit = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::BadStepsPerUnit(1)));
    }

    #[test]
    fn negative_travel_limit_rejected() {
        let mut config = MachineConfig::default();
        config.axes[2].travel_limit = -10.0;
        assert_eq!(config.validate(), Err(ConfigError::BadTravelLimit(2)));
    }

    #[test]
    fn nan_steps_per_unit_rejected() {
        let mut config = MachineConfig::default();
        config.axes[0].steps_per_unit = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::BadStepsPerUnit(0)));
    }

    #[test]
    fn lift_motion_limits_maxes_everything() {
        let mut config = MachineConfig::default();
        config.lift_motion_limits();

        for axis in &config.axes {
            assert_eq!(axis.max_feed_rate, f32::MAX);
            assert_eq!(axis.max_acceleration, f32::MAX);
        }
        assert_eq!(config.acceleration, f32::MAX);
        assert_eq!(config.retract_acceleration, f32::MAX);
        assert_eq!(config.max_xy_jerk, f32::MAX);
        assert_eq!(config.max_z_jerk, f32::MAX);
    }

    #[test]
    fn lift_does_not_touch_geometry() {
        let mut config = MachineConfig::default();
        let before = config;
        config.lift_motion_limits();

        for (axis, prior) in config.axes.iter().zip(before.axes.iter()) {
            assert_eq!(axis.steps_per_unit, prior.steps_per_unit);
            assert_eq!(axis.travel_limit, prior.travel_limit);
        }
        assert_eq!(config.microstep_modes, before.microstep_modes);
    }

    #[test]
    fn timbre_divisors_follow_microstepping() {
        let mut config = MachineConfig::default();
        config.microstep_modes = [16, 8, 4];
        assert_eq!(config.timbre_divisors(), [DEFAULT_TIMBRE, 8, 4]);
    }
}
