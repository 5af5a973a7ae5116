//! First-person player controller.
//!
//! This module provides the player's kinematic state and the per-tick
//! movement update: damping, gravity, speed tiers, floor snapping and room
//! tracking.

use glam::{Vec2, Vec3};
use granny_common::Ray;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::events::SimEvent;
use crate::input::FrameInput;
use crate::spatial::{FloorLevel, HidingSpot, HouseLayout, RoomType};

/// Eye height above the floor while standing.
pub const STAND_HEIGHT: f32 = 5.0;

/// Eye height above the floor while crouching.
pub const CROUCH_HEIGHT: f32 = 2.5;

/// Horizontal velocity damping per second.
pub const DAMPING: f32 = 15.0;

/// Downward acceleration.
pub const GRAVITY: f32 = 9.8 * 30.0;

/// Offset applied when leaving a hiding spot.
pub const UNHIDE_OFFSET: Vec3 = Vec3::new(5.0, 0.0, 0.0);

/// Pitch limit (just short of straight up or down).
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Movement speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpeedTier {
    /// Crouch-walking
    Crouch,
    /// Walking
    #[default]
    Walk,
    /// Running
    Run,
}

impl SpeedTier {
    /// Acceleration applied along the movement intent.
    #[must_use]
    pub const fn acceleration(self) -> f32 {
        match self {
            Self::Crouch => 25.0,
            Self::Walk => 60.0,
            Self::Run => 100.0,
        }
    }
}

/// Where the player is hiding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concealment {
    /// Hiding spot id
    pub spot_id: String,
    /// Base position of the hiding spot
    pub anchor: Vec3,
}

/// Player position, motion and stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerKinematics {
    /// Eye position
    pub position: Vec3,
    /// Velocity in the look frame (x = right, y = up, z = forward)
    pub velocity: Vec3,
    /// Look yaw in radians
    pub yaw: f32,
    /// Look pitch in radians
    pub pitch: f32,
    crouching: bool,
    running: bool,
    hidden: Option<Concealment>,
    room: RoomType,
    floor: FloorLevel,
}

impl PlayerKinematics {
    /// Creates a standing player at `position` facing down -Z.
    #[must_use]
    pub fn new(position: Vec3, layout: &HouseLayout) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            crouching: false,
            running: false,
            hidden: None,
            room: layout.room_or_fallback(position),
            floor: layout.player_floor(position, STAND_HEIGHT),
        }
    }

    /// Puts the player back at `position` with a fresh stance.
    pub fn respawn(&mut self, position: Vec3, layout: &HouseLayout) {
        *self = Self::new(position, layout);
    }

    /// Current eye height above the floor.
    #[must_use]
    pub const fn stand_height(&self) -> f32 {
        if self.crouching {
            CROUCH_HEIGHT
        } else {
            STAND_HEIGHT
        }
    }

    /// Feet position.
    #[must_use]
    pub fn feet(&self) -> Vec3 {
        self.position - Vec3::new(0.0, self.stand_height(), 0.0)
    }

    /// Whether the player is crouching.
    #[must_use]
    pub const fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// Whether the player is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the player is inside a hiding spot.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden.is_some()
    }

    /// The hiding spot the player is in, if any.
    #[must_use]
    pub fn concealment(&self) -> Option<&Concealment> {
        self.hidden.as_ref()
    }

    /// Room derived on the last update.
    #[must_use]
    pub const fn room(&self) -> RoomType {
        self.room
    }

    /// Floor used by the last snap.
    #[must_use]
    pub const fn floor(&self) -> FloorLevel {
        self.floor
    }

    /// Current speed tier.
    #[must_use]
    pub const fn speed_tier(&self) -> SpeedTier {
        if self.crouching {
            SpeedTier::Crouch
        } else if self.running {
            SpeedTier::Run
        } else {
            SpeedTier::Walk
        }
    }

    /// Horizontal speed.
    #[must_use]
    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }

    /// Unit forward vector on the ground plane.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Unit right vector on the ground plane.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Unit look direction including pitch.
    #[must_use]
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            -self.yaw.sin() * cos_pitch,
            sin_pitch,
            -self.yaw.cos() * cos_pitch,
        )
    }

    /// Ray from the eye along the look direction.
    #[must_use]
    pub fn eye_ray(&self) -> Ray {
        Ray::new(self.position, self.look_direction())
    }

    /// Velocity expressed in world axes.
    #[must_use]
    pub fn world_velocity(&self) -> Vec3 {
        self.right() * self.velocity.x
            + Vec3::Y * self.velocity.y
            + self.forward() * self.velocity.z
    }

    /// Sets the look angles, clamping pitch.
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Flips crouch. Entering crouch cancels running.
    pub fn toggle_crouch(&mut self, events: &mut Vec<SimEvent>) {
        if self.is_hidden() {
            return;
        }
        self.crouching = !self.crouching;
        debug!("Crouch {}", if self.crouching { "on" } else { "off" });
        events.push(SimEvent::CrouchChanged {
            crouching: self.crouching,
        });
        if self.crouching {
            self.set_running(false, events);
        }
    }

    /// Requests a run state. Running is refused while crouching or hidden.
    pub fn set_running(&mut self, run: bool, events: &mut Vec<SimEvent>) {
        if self.is_hidden() || (self.crouching && run) || self.running == run {
            return;
        }
        self.running = run;
        events.push(SimEvent::RunChanged { running: run });
    }

    /// Enters a hiding spot, moving the eye to its vantage point.
    pub fn hide(&mut self, spot: &HidingSpot) {
        self.hidden = Some(Concealment {
            spot_id: spot.id.to_string(),
            anchor: spot.position,
        });
        self.position = spot.vantage_point();
        self.velocity = Vec3::ZERO;
    }

    /// Leaves the hiding spot, stepping out beside it.
    ///
    /// Returns false if the player wasn't hidden.
    pub fn unhide(&mut self) -> bool {
        match self.hidden.take() {
            Some(concealment) => {
                self.position = concealment.anchor + UNHIDE_OFFSET;
                true
            }
            None => false,
        }
    }

    /// Advances movement by `dt` seconds.
    ///
    /// Does nothing while hidden or when the pointer isn't captured. Pushes a
    /// [`SimEvent::RoomChanged`] when the derived room changes.
    pub fn update(
        &mut self,
        input: &FrameInput,
        dt: f32,
        layout: &HouseLayout,
        events: &mut Vec<SimEvent>,
    ) {
        if self.is_hidden() || !input.look_captured {
            return;
        }

        let damping = (DAMPING * dt).min(1.0);
        self.velocity.x -= self.velocity.x * damping;
        self.velocity.z -= self.velocity.z * damping;

        let stand = self.stand_height();
        let floor = layout.player_floor(self.position, stand);

        self.velocity.y -= GRAVITY * dt;

        let intent = input.movement;
        let (strafe, forward) = intent.axes();
        let direction = Vec2::new(strafe, forward).normalize_or_zero();
        let accel = self.speed_tier().acceleration();
        if intent.forward || intent.backward {
            self.velocity.z += direction.y * accel * dt;
        }
        if intent.left || intent.right {
            self.velocity.x += direction.x * accel * dt;
        }

        self.position += self.world_velocity() * dt;

        let floor_y = floor.height();
        if self.position.y - floor_y < stand {
            self.velocity.y = 0.0;
            self.position.y = floor_y + stand;
        }
        self.floor = floor;

        let room = layout.room_or_fallback(self.position);
        if room != self.room {
            debug!("Player moved from {} to {}", self.room, room);
            events.push(SimEvent::RoomChanged {
                from: self.room,
                to: room,
            });
            self.room = room;
        }

        trace!(
            "player at ({:.2}, {:.2}, {:.2}) floor {:?}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.floor
        );
    }
}
