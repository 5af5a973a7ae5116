//! Footstep and floorboard noise.
//!
//! Moving upright makes noise at random; stepping on a creaking floorboard
//! makes noise for certain, at most once per cooldown. Noise is what draws
//! Granny away from her patrol.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{NoiseSource, SimEvent, SoundCue};
use crate::player::PlayerKinematics;
use crate::settings::RunSettings;
use crate::spatial::HouseLayout;

/// Seconds between two creaking-floor noises.
pub const CREAK_COOLDOWN: f32 = 2.0;

/// Per-tick footstep noise chance while walking, before the intensity scale.
pub const WALK_NOISE_CHANCE: f32 = 0.005;

/// Per-tick footstep noise chance while running, before the intensity scale.
pub const RUN_NOISE_CHANCE: f32 = 0.05;

/// Horizontal speed below which the player is considered still.
pub const MIN_NOISY_SPEED: f32 = 0.1;

/// Returns the per-tick footstep chance.
#[must_use]
pub fn footstep_chance(running: bool, creaking_intensity: f32) -> f32 {
    let base = if running {
        RUN_NOISE_CHANCE
    } else {
        WALK_NOISE_CHANCE
    };
    base * (creaking_intensity + 0.1)
}

/// Owns the shared creaking-floor cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseSubsystem {
    creak_cooldown: f32,
}

impl NoiseSubsystem {
    /// Creates the subsystem with the cooldown expired.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            creak_cooldown: 0.0,
        }
    }

    /// Seconds until a floorboard can creak again.
    #[must_use]
    pub const fn creak_cooldown(&self) -> f32 {
        self.creak_cooldown
    }

    /// Counts the cooldown down.
    pub fn advance(&mut self, dt: f32) {
        if self.creak_cooldown > 0.0 {
            self.creak_cooldown -= dt;
        }
    }

    /// Rolls footstep noise and checks creaking floors for this tick.
    ///
    /// Returns the location Granny should investigate, if any noise reached
    /// her. Sound cues are pushed even when `attract_granny` is off.
    pub fn listen(
        &mut self,
        player: &PlayerKinematics,
        layout: &HouseLayout,
        settings: &RunSettings,
        rng: &mut fastrand::Rng,
        events: &mut Vec<SimEvent>,
    ) -> Option<Vec3> {
        if player.is_hidden() || player.is_crouching() || player.horizontal_speed() <= MIN_NOISY_SPEED {
            return None;
        }

        let feet = player.feet();
        let mut heard = None;

        let chance = footstep_chance(player.is_running(), settings.creaking_intensity);
        if rng.f32() < chance {
            events.push(SimEvent::Sound(SoundCue::Footstep {
                running: player.is_running(),
            }));
            heard = Self::emit(feet, NoiseSource::Footstep, settings, events).or(heard);
        }

        if self.creak_cooldown <= 0.0 {
            if let Some(zone) = layout
                .creaking_zones()
                .iter()
                .find(|zone| zone.contains_feet(feet))
            {
                debug!("Floor creaked in {}", zone.room);
                self.creak_cooldown = CREAK_COOLDOWN;
                events.push(SimEvent::Sound(SoundCue::FloorCreak));
                heard = Self::emit(feet, NoiseSource::Creak, settings, events).or(heard);
            }
        }

        heard
    }

    fn emit(
        position: Vec3,
        source: NoiseSource,
        settings: &RunSettings,
        events: &mut Vec<SimEvent>,
    ) -> Option<Vec3> {
        if !settings.attract_granny {
            return None;
        }
        events.push(SimEvent::Noise { position, source });
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FrameInput, MoveIntent};

    fn walking_player_at(eye: Vec3, layout: &HouseLayout) -> PlayerKinematics {
        let mut player = PlayerKinematics::new(eye, layout);
        let mut events = Vec::new();
        let input = FrameInput::captured().with_movement(MoveIntent::FORWARD);
        player.update(&input, 1.0 / 60.0, layout, &mut events);
        player
    }

    #[test]
    fn test_footstep_chance_scales() {
        assert!((footstep_chance(false, 0.5) - 0.003).abs() < 1e-6);
        assert!((footstep_chance(true, 0.5) - 0.03).abs() < 1e-6);
        assert!(footstep_chance(false, 0.0) > 0.0);
    }

    #[test]
    fn test_creak_zone_emits_once_per_cooldown() {
        let layout = HouseLayout::standard();
        // Bathroom creak patch at (-20, 10, 10)
        let player = walking_player_at(Vec3::new(-20.0, 15.0, 10.0), &layout);
        let settings = RunSettings {
            creaking_intensity: 0.0,
            ..RunSettings::default()
        };
        let mut noise = NoiseSubsystem::new();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut events = Vec::new();

        let mut creaks = 0;
        for _ in 0..10 {
            let before = events.len();
            noise.listen(&player, &layout, &settings, &mut rng, &mut events);
            creaks += events[before..]
                .iter()
                .filter(|e| matches!(e, SimEvent::Noise { source: NoiseSource::Creak, .. }))
                .count();
            noise.advance(0.1);
        }
        assert_eq!(creaks, 1);
        assert!(noise.creak_cooldown() > 0.0);
    }

    #[test]
    fn test_crouching_is_silent() {
        let layout = HouseLayout::standard();
        let mut player = walking_player_at(Vec3::new(-20.0, 15.0, 10.0), &layout);
        let mut events = Vec::new();
        player.toggle_crouch(&mut events);
        events.clear();

        let mut noise = NoiseSubsystem::new();
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..1000 {
            let heard = noise.listen(&player, &layout, &RunSettings::default(), &mut rng, &mut events);
            assert!(heard.is_none());
        }
        assert!(events.is_empty());
    }

    #[test]
    fn test_attract_off_keeps_sound_drops_noise() {
        let layout = HouseLayout::standard();
        let player = walking_player_at(Vec3::new(-20.0, 15.0, 10.0), &layout);
        let settings = RunSettings {
            attract_granny: false,
            ..RunSettings::default()
        };
        let mut noise = NoiseSubsystem::new();
        let mut rng = fastrand::Rng::with_seed(9);
        let mut events = Vec::new();
        let heard = noise.listen(&player, &layout, &settings, &mut rng, &mut events);
        assert!(heard.is_none());
        assert!(events.contains(&SimEvent::Sound(SoundCue::FloorCreak)));
        assert!(!events.iter().any(|e| matches!(e, SimEvent::Noise { .. })));
        assert!((noise.creak_cooldown() - CREAK_COOLDOWN).abs() < f32::EPSILON);
    }

    #[test]
    fn test_still_player_is_silent() {
        let layout = HouseLayout::standard();
        let player = PlayerKinematics::new(Vec3::new(-20.0, 15.0, 10.0), &layout);
        let mut noise = NoiseSubsystem::new();
        let mut rng = fastrand::Rng::with_seed(1);
        let mut events = Vec::new();
        assert!(noise
            .listen(&player, &layout, &RunSettings::default(), &mut rng, &mut events)
            .is_none());
        assert!(events.is_empty());
    }
}
