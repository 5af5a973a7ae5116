//! Per-frame player input.
//!
//! The host samples its devices once per frame and hands the simulation a
//! [`FrameInput`]. Held keys are levels; toggles and presses are edges that
//! are true only on the frame they happened.

use serde::{Deserialize, Serialize};

use crate::items::ItemType;

/// Directional movement keys currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Move forward
    pub forward: bool,
    /// Move backward
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
}

impl MoveIntent {
    /// No movement.
    pub const NONE: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    /// Forward only.
    pub const FORWARD: Self = Self {
        forward: true,
        backward: false,
        left: false,
        right: false,
    };

    /// Returns the intent as (strafe, forward) axes in -1..=1.
    #[must_use]
    pub fn axes(self) -> (f32, f32) {
        let strafe = f32::from(i8::from(self.right) - i8::from(self.left));
        let forward = f32::from(i8::from(self.forward) - i8::from(self.backward));
        (strafe, forward)
    }

    /// Whether any opposing pair doesn't cancel out.
    #[must_use]
    pub fn is_moving(self) -> bool {
        let (strafe, forward) = self.axes();
        strafe != 0.0 || forward != 0.0
    }
}

/// Everything the simulation reads from the player in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Held movement keys
    pub movement: MoveIntent,
    /// Crouch key pressed this frame
    pub crouch_toggle: bool,
    /// Run key held
    pub run_held: bool,
    /// Interact key pressed this frame
    pub interact: bool,
    /// Whether the pointer is captured by the game view
    pub look_captured: bool,
    /// Look yaw in radians
    pub yaw: f32,
    /// Look pitch in radians
    pub pitch: f32,
    /// Inventory item picked this frame, if any
    pub select_item: Option<ItemType>,
}

impl FrameInput {
    /// Creates an idle input with the pointer captured.
    #[must_use]
    pub fn captured() -> Self {
        Self {
            look_captured: true,
            ..Self::default()
        }
    }

    /// Sets the held movement keys.
    #[must_use]
    pub fn with_movement(mut self, movement: MoveIntent) -> Self {
        self.movement = movement;
        self
    }

    /// Sets the look angles.
    #[must_use]
    pub fn with_look(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Presses the interact key.
    #[must_use]
    pub fn with_interact(mut self) -> Self {
        self.interact = true;
        self
    }

    /// Presses the crouch toggle.
    #[must_use]
    pub fn with_crouch_toggle(mut self) -> Self {
        self.crouch_toggle = true;
        self
    }

    /// Holds the run key.
    #[must_use]
    pub fn with_run(mut self) -> Self {
        self.run_held = true;
        self
    }

    /// Picks an inventory item.
    #[must_use]
    pub fn with_selection(mut self, item: ItemType) -> Self {
        self.select_item = Some(item);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposing_keys_cancel() {
        let intent = MoveIntent {
            forward: true,
            backward: true,
            left: true,
            right: false,
        };
        assert_eq!(intent.axes(), (-1.0, 0.0));
        assert!(intent.is_moving());

        let still = MoveIntent {
            left: true,
            right: true,
            ..MoveIntent::NONE
        };
        assert!(!still.is_moving());
    }

    #[test]
    fn test_builder() {
        let input = FrameInput::captured()
            .with_movement(MoveIntent::FORWARD)
            .with_run()
            .with_interact();
        assert!(input.look_captured);
        assert!(input.run_held);
        assert!(input.interact);
        assert!(!input.crouch_toggle);
        assert_eq!(input.movement.axes(), (0.0, 1.0));
    }
}
