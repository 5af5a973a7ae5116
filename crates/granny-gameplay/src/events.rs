//! Events reported by the simulation.
//!
//! Each tick returns the events it raised, in the order they happened. Hosts
//! forward them to UI, audio and analytics collaborators.

use glam::Vec3;
use granny_common::ItemId;
use serde::{Deserialize, Serialize};

use crate::antagonist::GrannyMode;
use crate::items::ItemType;
use crate::session::GameMode;
use crate::spatial::RoomType;

/// What made a noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseSource {
    /// A random footstep
    Footstep,
    /// A creaking floorboard
    Creak,
}

/// Sound cues for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player footstep
    Footstep {
        /// Whether the player was running
        running: bool,
    },
    /// Floorboard creak
    FloorCreak,
    /// Item picked up
    Pickup,
    /// Phantom footstep from paranoid mode
    DecoyFootstep,
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The player's room changed
    RoomChanged {
        /// Previous room
        from: RoomType,
        /// New room
        to: RoomType,
    },
    /// Crouch toggled
    CrouchChanged {
        /// New crouch state
        crouching: bool,
    },
    /// Run state changed
    RunChanged {
        /// New run state
        running: bool,
    },
    /// The player made a noise Granny can hear
    Noise {
        /// Where the noise came from (feet height)
        position: Vec3,
        /// What caused it
        source: NoiseSource,
    },
    /// A sound should be played
    Sound(SoundCue),
    /// Granny switched behaviour
    GrannyModeChanged {
        /// Previous mode
        from: GrannyMode,
        /// New mode
        to: GrannyMode,
    },
    /// Granny caught the player
    PlayerCaught,
    /// An item was picked up
    ItemCollected {
        /// Item id
        id: ItemId,
        /// Item type
        item_type: ItemType,
    },
    /// The player hid
    PlayerHid {
        /// Hiding spot id
        spot: String,
    },
    /// The player left a hiding spot
    PlayerUnhid,
    /// The exit was tried with an item selected
    UsedExitWithItem {
        /// The selected item
        item: ItemType,
    },
    /// The exit was tried empty-handed
    ExitLocked,
    /// The exit was tried without the master key in the inventory
    ExitNeedsMasterKey,
    /// Pointer capture was released while playing
    PauseRequested,
    /// Cosmetic background flash started
    BackgroundFlash {
        /// Flash colour as 0xRRGGBB
        color: u32,
    },
    /// The session moved to another mode
    ModeChanged {
        /// Previous mode
        from: GameMode,
        /// New mode
        to: GameMode,
    },
    /// A new day began
    DayStarted {
        /// Day number, starting at 1
        day: u32,
    },
}

impl SimEvent {
    /// Check if this event ends the current day.
    #[must_use]
    pub fn ends_day(&self) -> bool {
        matches!(self, Self::PlayerCaught)
    }

    /// Returns the sound cue carried by this event, if any.
    #[must_use]
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            Self::Sound(cue) => Some(*cue),
            _ => None,
        }
    }
}

/// Counts events of one kind in a batch.
#[must_use]
pub fn count_events(events: &[SimEvent], predicate: impl Fn(&SimEvent) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_extraction() {
        let event = SimEvent::Sound(SoundCue::Pickup);
        assert_eq!(event.sound(), Some(SoundCue::Pickup));
        assert_eq!(SimEvent::PlayerUnhid.sound(), None);
    }

    #[test]
    fn test_count_events() {
        let events = vec![
            SimEvent::PlayerCaught,
            SimEvent::ExitLocked,
            SimEvent::PlayerCaught,
        ];
        assert_eq!(count_events(&events, SimEvent::ends_day), 2);
    }
}
