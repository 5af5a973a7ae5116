//! Scripted input for headless runs.
//!
//! The autopilot wanders the house the way a nervous player might: it holds
//! a movement direction for a while, glances around, sometimes runs or
//! crouches and presses interact at a fixed cadence. Once the Master Key is
//! in the inventory it keeps it selected so the front door opens.

use granny_gameplay::{FrameInput, Inventory, ItemType, MoveIntent};
use std::f32::consts::PI;
use tracing::debug;

/// Shortest time a movement choice is held, in frames.
const MIN_SEGMENT_FRAMES: u32 = 30;

/// Longest time a movement choice is held, in frames.
const MAX_SEGMENT_FRAMES: u32 = 180;

/// Per-frame chance of toggling crouch.
const CROUCH_CHANCE: f32 = 0.002;

/// Chance a segment is run rather than walked.
const RUN_CHANCE: f32 = 0.25;

/// Largest pitch the autopilot looks up or down.
const MAX_PITCH: f32 = 0.3;

/// Fraction of the remaining turn covered each frame.
const TURN_RATE: f32 = 0.05;

/// Input driver for runs without a player.
#[derive(Debug)]
pub struct Autopilot {
    rng: fastrand::Rng,
    interact_interval: u32,
    frame: u64,
    segment_left: u32,
    movement: MoveIntent,
    running: bool,
    yaw: f32,
    target_yaw: f32,
    pitch: f32,
}

impl Autopilot {
    /// Create an autopilot pressing interact every `interact_interval` frames.
    #[must_use]
    pub fn new(seed: u64, interact_interval: u32) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            interact_interval: interact_interval.max(1),
            frame: 0,
            segment_left: 0,
            movement: MoveIntent::NONE,
            running: false,
            yaw: 0.0,
            target_yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Produce the input for the next frame.
    pub fn next_input(&mut self, inventory: &Inventory) -> FrameInput {
        if self.segment_left == 0 {
            self.new_segment();
        }
        self.segment_left -= 1;
        self.frame += 1;

        self.yaw += (self.target_yaw - self.yaw) * TURN_RATE;

        let mut input = FrameInput::captured()
            .with_movement(self.movement)
            .with_look(self.yaw, self.pitch);
        if self.running {
            input = input.with_run();
        }
        if self.rng.f32() < CROUCH_CHANCE {
            input = input.with_crouch_toggle();
        }
        if self.frame % u64::from(self.interact_interval) == 0 {
            input = input.with_interact();
        }
        if inventory.has_exit_key() && inventory.selected() != Some(ItemType::MasterKey) {
            input = input.with_selection(ItemType::MasterKey);
        }
        input
    }

    fn new_segment(&mut self) {
        self.segment_left = self.rng.u32(MIN_SEGMENT_FRAMES..=MAX_SEGMENT_FRAMES);
        self.movement = match self.rng.u8(0..6) {
            0 => MoveIntent::NONE,
            1 => MoveIntent {
                left: true,
                ..MoveIntent::FORWARD
            },
            2 => MoveIntent {
                right: true,
                ..MoveIntent::FORWARD
            },
            3 => MoveIntent {
                backward: true,
                ..MoveIntent::NONE
            },
            _ => MoveIntent::FORWARD,
        };
        self.running = self.rng.f32() < RUN_CHANCE;
        self.target_yaw = self.yaw + (self.rng.f32() - 0.5) * PI;
        self.pitch = (self.rng.f32() * 2.0 - 1.0) * MAX_PITCH;
        debug!(
            "Autopilot segment: {:?} for {} frames, running {}",
            self.movement, self.segment_left, self.running
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_captured() {
        let mut pilot = Autopilot::new(1, 10);
        let inventory = Inventory::new();
        for _ in 0..500 {
            let input = pilot.next_input(&inventory);
            assert!(input.look_captured);
            assert!(input.pitch.abs() <= MAX_PITCH);
        }
        assert_eq!(pilot.frame, 500);
    }

    #[test]
    fn test_interact_cadence() {
        let mut pilot = Autopilot::new(2, 10);
        let inventory = Inventory::new();
        let presses = (0..100)
            .filter(|_| pilot.next_input(&inventory).interact)
            .count();
        assert_eq!(presses, 10);
    }

    #[test]
    fn test_selects_master_key() {
        let mut pilot = Autopilot::new(3, 10);
        let mut inventory = Inventory::new();
        assert_eq!(pilot.next_input(&inventory).select_item, None);

        inventory.add(ItemType::MasterKey);
        assert_eq!(
            pilot.next_input(&inventory).select_item,
            Some(ItemType::MasterKey)
        );

        inventory.select(ItemType::MasterKey);
        assert_eq!(pilot.next_input(&inventory).select_item, None);
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let inventory = Inventory::new();
        let mut a = Autopilot::new(9, 7);
        let mut b = Autopilot::new(9, 7);
        for _ in 0..300 {
            assert_eq!(a.next_input(&inventory), b.next_input(&inventory));
        }
    }
}
