//! Granny's perception and pursuit.
//!
//! Granny runs a three-state machine each tick, in priority order:
//! - Investigate: a heard noise pulls her toward it until she arrives
//! - Chase: a visible player within detection range is pursued at speed
//! - Patrol: otherwise she wanders slowly, turning at random
//!
//! Chase is kept with hysteresis: it starts inside the detection range and
//! only ends once the player is hidden or beyond [`CHASE_RELEASE`] times the
//! range.

use glam::Vec3;
use granny_common::{heading_towards, heading_vector, horizontal_distance};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use tracing::{debug, info, trace};

use crate::difficulty::DifficultyProfile;
use crate::events::SimEvent;
use crate::player::PlayerKinematics;
use crate::spatial::{FloorLevel, HouseLayout};

/// Height of Granny's origin above her floor.
pub const FLOOR_OFFSET: f32 = 1.75;

/// Speed multiplier while chasing.
pub const CHASE_MULTIPLIER: f32 = 1.5;

/// Speed multiplier while wandering.
pub const WANDER_MULTIPLIER: f32 = 0.5;

/// Distance at which Granny catches the player.
pub const CATCH_DISTANCE: f32 = 3.0;

/// Horizontal distance at which a noise counts as investigated.
pub const NOISE_ARRIVAL_DISTANCE: f32 = 1.0;

/// Per-tick chance of turning while wandering.
pub const TURN_CHANCE: f32 = 0.01;

/// Turn applied while wandering.
pub const TURN_ANGLE: f32 = FRAC_PI_2;

/// Chase ends beyond this multiple of the detection range.
pub const CHASE_RELEASE: f32 = 1.25;

/// Granny's behaviour state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GrannyMode {
    /// Wandering the house
    #[default]
    Patrol,
    /// Heading to the last noise
    Investigate,
    /// Pursuing the player
    Chase,
}

impl GrannyMode {
    /// Check if Granny is pursuing the player.
    #[must_use]
    pub const fn is_chasing(self) -> bool {
        matches!(self, Self::Chase)
    }
}

/// The antagonist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Granny {
    position: Vec3,
    facing: f32,
    mode: GrannyMode,
    noise_location: Option<Vec3>,
    profile: DifficultyProfile,
    catch_armed: bool,
}

impl Granny {
    /// Creates Granny standing on the floor nearest to `spawn`.
    #[must_use]
    pub fn new(spawn: Vec3, profile: DifficultyProfile) -> Self {
        Self {
            position: snap_to_floor(spawn + Vec3::new(0.0, FLOOR_OFFSET, 0.0)),
            facing: 0.0,
            mode: GrannyMode::Patrol,
            noise_location: None,
            profile,
            catch_armed: true,
        }
    }

    /// Resets Granny to `spawn` for a new day and re-arms the catch.
    pub fn respawn(&mut self, spawn: Vec3) {
        *self = Self::new(spawn, self.profile);
    }

    /// Current position (origin, [`FLOOR_OFFSET`] above the floor).
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Feet position.
    #[must_use]
    pub fn feet(&self) -> Vec3 {
        self.position - Vec3::new(0.0, FLOOR_OFFSET, 0.0)
    }

    /// Heading in radians (zero along +Z).
    #[must_use]
    pub const fn facing(&self) -> f32 {
        self.facing
    }

    /// Current behaviour state.
    #[must_use]
    pub const fn mode(&self) -> GrannyMode {
        self.mode
    }

    /// Noise she is heading to, if any.
    #[must_use]
    pub const fn noise_location(&self) -> Option<Vec3> {
        self.noise_location
    }

    /// Speed and range for this run.
    #[must_use]
    pub const fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    /// Whether the next close approach will catch the player.
    #[must_use]
    pub const fn is_catch_armed(&self) -> bool {
        self.catch_armed
    }

    /// Places Granny directly, snapping to the floor. Used by hosts and tests.
    pub fn place(&mut self, position: Vec3, facing: f32) {
        self.position = snap_to_floor(position);
        self.facing = facing;
    }

    /// Registers a noise. The newest noise replaces any earlier one and
    /// interrupts whatever Granny was doing.
    pub fn hear_noise(&mut self, location: Vec3, events: &mut Vec<SimEvent>) {
        debug!(
            "Granny heard noise at ({:.1}, {:.1}, {:.1})",
            location.x, location.y, location.z
        );
        self.noise_location = Some(location);
        self.set_mode(GrannyMode::Investigate, events);
    }

    /// Advances Granny by `dt` seconds.
    pub fn update(
        &mut self,
        player: &PlayerKinematics,
        dt: f32,
        layout: &HouseLayout,
        rng: &mut fastrand::Rng,
        events: &mut Vec<SimEvent>,
    ) {
        let speed = self.profile.speed;

        if let Some(target) = self.noise_location {
            if horizontal_distance(self.position, target) < NOISE_ARRIVAL_DISTANCE {
                self.noise_location = None;
                self.set_mode(GrannyMode::Patrol, events);
            } else {
                self.step_towards(target, speed * dt);
            }
        } else if self.sees(player) {
            self.set_mode(GrannyMode::Chase, events);
            self.step_towards(player.position, speed * CHASE_MULTIPLIER * dt);

            let distance = self.feet().distance(player.feet());
            if distance < CATCH_DISTANCE {
                if self.catch_armed {
                    self.catch_armed = false;
                    info!("Granny caught the player ({distance:.2} away)");
                    events.push(SimEvent::PlayerCaught);
                }
            } else {
                self.catch_armed = true;
            }
        } else {
            if self.mode.is_chasing() {
                self.set_mode(GrannyMode::Patrol, events);
            }
            self.wander(speed * WANDER_MULTIPLIER * dt, layout, rng);
        }

        self.position = snap_to_floor(self.position);

        trace!(
            "granny {:?} at ({:.2}, {:.2}, {:.2})",
            self.mode,
            self.position.x,
            self.position.y,
            self.position.z
        );
    }

    fn sees(&self, player: &PlayerKinematics) -> bool {
        if player.is_hidden() {
            return false;
        }
        let distance = self.feet().distance(player.feet());
        let range = if self.mode.is_chasing() {
            self.profile.detection_range * CHASE_RELEASE
        } else {
            self.profile.detection_range
        };
        distance < range
    }

    fn step_towards(&mut self, target: Vec3, max_step: f32) {
        let remaining = horizontal_distance(self.position, target);
        if remaining <= f32::EPSILON {
            return;
        }
        self.facing = heading_towards(self.position, target);
        self.position += heading_vector(self.facing) * max_step.min(remaining);
    }

    fn wander(&mut self, step: f32, layout: &HouseLayout, rng: &mut fastrand::Rng) {
        // A chase can end outside the house; walk back in before wandering
        if !layout.is_inside(self.position) {
            let room = layout.nearest_room(self.position).bounds().origin();
            self.step_towards(Vec3::new(room.x, self.position.y, room.z), step);
            return;
        }

        let next = self.position + heading_vector(self.facing) * step;
        if layout.is_inside(next) {
            self.position = next;
        } else {
            self.facing += TURN_ANGLE;
        }
        if rng.f32() < TURN_CHANCE {
            self.facing += TURN_ANGLE;
        }
    }

    fn set_mode(&mut self, mode: GrannyMode, events: &mut Vec<SimEvent>) {
        if self.mode == mode {
            return;
        }
        debug!("Granny {:?} -> {:?}", self.mode, mode);
        events.push(SimEvent::GrannyModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
    }
}

/// Puts an origin position on the floor band under its feet.
fn snap_to_floor(position: Vec3) -> Vec3 {
    let floor = FloorLevel::band_for(position.y - FLOOR_OFFSET);
    Vec3::new(position.x, floor.height() + FLOOR_OFFSET, position.z)
}
