//! Per-run gameplay settings.
//!
//! These are fixed when a run starts; the simulation never writes them.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Toggles and sliders that shape a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Whether player noise reaches Granny.
    pub attract_granny: bool,
    /// Footstep noise multiplier (0.0-1.0).
    pub creaking_intensity: f32,
    /// Occasional phantom footsteps.
    pub paranoid_mode: bool,
    /// Random background flashes.
    pub paradox_mode: bool,
    /// Suppress flashes and fog.
    pub epilepsy_mode: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            attract_granny: true,
            creaking_intensity: 0.5,
            paranoid_mode: false,
            paradox_mode: false,
            epilepsy_mode: false,
        }
    }
}

impl RunSettings {
    /// Returns a copy with out-of-range values clamped.
    #[must_use]
    pub fn validated(mut self) -> Self {
        if !self.creaking_intensity.is_finite() {
            warn!("creaking_intensity is not finite, using default");
            self.creaking_intensity = Self::default().creaking_intensity;
        } else if !(0.0..=1.0).contains(&self.creaking_intensity) {
            warn!(
                "creaking_intensity {} out of range, clamping",
                self.creaking_intensity
            );
            self.creaking_intensity = self.creaking_intensity.clamp(0.0, 1.0);
        }
        self
    }

    /// Whether background flashes may be shown.
    #[must_use]
    pub const fn flashes_allowed(&self) -> bool {
        self.paradox_mode && !self.epilepsy_mode
    }

    /// Whether distance fog may be drawn.
    #[must_use]
    pub const fn fog_allowed(&self) -> bool {
        !self.epilepsy_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RunSettings::default();
        assert!(settings.attract_granny);
        assert!((settings.creaking_intensity - 0.5).abs() < f32::EPSILON);
        assert!(!settings.paranoid_mode);
        assert!(!settings.paradox_mode);
        assert!(!settings.epilepsy_mode);
    }

    #[test]
    fn test_validated_clamps_intensity() {
        let high = RunSettings {
            creaking_intensity: 3.0,
            ..RunSettings::default()
        };
        assert!((high.validated().creaking_intensity - 1.0).abs() < f32::EPSILON);

        let nan = RunSettings {
            creaking_intensity: f32::NAN,
            ..RunSettings::default()
        };
        assert!((nan.validated().creaking_intensity - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_epilepsy_suppresses_flashes() {
        let settings = RunSettings {
            paradox_mode: true,
            epilepsy_mode: true,
            ..RunSettings::default()
        };
        assert!(!settings.flashes_allowed());
        assert!(!settings.fog_allowed());
    }
}
