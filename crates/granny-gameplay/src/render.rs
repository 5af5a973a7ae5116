//! Rendering seam.
//!
//! The simulation never draws. Once per played frame it hands a
//! [`FrameSnapshot`] to whatever [`Renderer`] the host injected. Visual
//! tuning that depends on the run (nightmare darkness, fog, eye colour) is
//! exposed as [`RenderHints`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::antagonist::GrannyMode;
use crate::difficulty::Difficulty;
use crate::settings::RunSettings;
use crate::spatial::RoomType;

/// Background colour outside nightmare runs.
pub const DEFAULT_BACKGROUND: u32 = 0x05_05_05;

/// Background colour of nightmare runs.
pub const NIGHTMARE_BACKGROUND: u32 = 0x00_00_00;

/// Run-wide visual parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderHints {
    /// Background colour as 0xRRGGBB
    pub background: u32,
    /// Exponential fog density, `None` when fog is disabled
    pub fog_density: Option<f32>,
    /// Granny's eye colour as 0xRRGGBB
    pub eye_color: u32,
    /// Flashlight reach
    pub flashlight_range: f32,
}

impl RenderHints {
    /// Derives the hints for a run.
    #[must_use]
    pub fn for_run(difficulty: Difficulty, settings: &RunSettings) -> Self {
        let nightmare = difficulty.is_nightmare();
        let fog = if nightmare { 0.04 } else { 0.01 };
        Self {
            background: if nightmare {
                NIGHTMARE_BACKGROUND
            } else {
                DEFAULT_BACKGROUND
            },
            fog_density: settings.fog_allowed().then_some(fog),
            eye_color: if nightmare { 0xFF_00_00 } else { 0xFF_FF_FF },
            flashlight_range: if nightmare { 40.0 } else { 80.0 },
        }
    }
}

impl Default for RenderHints {
    fn default() -> Self {
        Self::for_run(Difficulty::default(), &RunSettings::default())
    }
}

/// Granny as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrannyView {
    /// Position
    pub position: Vec3,
    /// Heading in radians
    pub facing: f32,
    /// Behaviour state
    pub mode: GrannyMode,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Simulation tick counter
    pub tick: u64,
    /// Seconds of simulated play
    pub elapsed: f64,
    /// Camera position
    pub camera: Vec3,
    /// Camera yaw
    pub yaw: f32,
    /// Camera pitch
    pub pitch: f32,
    /// Player's room
    pub room: RoomType,
    /// Crouch state
    pub crouching: bool,
    /// Hidden state
    pub hidden: bool,
    /// Granny, absent under Practice
    pub granny: Option<GrannyView>,
    /// Background colour for this frame
    pub background: u32,
    /// Run-wide visual parameters
    pub hints: RenderHints,
    /// Items still lying around
    pub items_remaining: usize,
}

/// Draws frames.
pub trait Renderer {
    /// Whether the renderer's resources are available.
    fn is_ready(&self) -> bool {
        true
    }

    /// Draws one frame.
    fn render(&mut self, snapshot: &FrameSnapshot);
}

/// A renderer that draws nothing and counts frames.
#[derive(Debug, Clone, Default)]
pub struct NullRenderer {
    frames: u64,
    last: Option<FrameSnapshot>,
}

impl NullRenderer {
    /// Creates a null renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.last.as_ref()
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot) {
        self.frames += 1;
        self.last = Some(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nightmare_hints() {
        let hints = RenderHints::for_run(Difficulty::Nightmare, &RunSettings::default());
        assert_eq!(hints.background, NIGHTMARE_BACKGROUND);
        assert_eq!(hints.fog_density, Some(0.04));
        assert_eq!(hints.eye_color, 0xFF_00_00);
        assert!((hints.flashlight_range - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_epilepsy_disables_fog() {
        let settings = RunSettings {
            epilepsy_mode: true,
            ..RunSettings::default()
        };
        let hints = RenderHints::for_run(Difficulty::Medium, &settings);
        assert_eq!(hints.fog_density, None);
        assert_eq!(hints.background, DEFAULT_BACKGROUND);
    }
}
