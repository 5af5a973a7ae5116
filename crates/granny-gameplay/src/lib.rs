//! # Granny Gameplay
//!
//! Simulation core for Granny House, a first-person stealth-horror game.
//!
//! This crate provides everything that runs between input and rendering:
//! - Static house catalogs (rooms, floors, hiding spots, creaking zones)
//! - Item randomization and the inventory
//! - Player kinematics with crouch, run and concealment
//! - Noise emission from footsteps and creaking floorboards
//! - The antagonist state machine (patrol, investigate, chase)
//! - Look-and-use interaction against an explicit volume index
//! - Cosmetic run modes (paranoid decoys, paradox flashes)
//! - The session: days, pause, victory and the frame orchestrator
//! - A renderer seam fed with per-frame snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod antagonist;
pub mod difficulty;
pub mod events;
pub mod game_state;
pub mod input;
pub mod interaction;
pub mod items;
pub mod noise;
pub mod player;
pub mod render;
pub mod session;
pub mod settings;
pub mod spatial;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::antagonist::*;
    pub use crate::difficulty::*;
    pub use crate::events::*;
    pub use crate::game_state::*;
    pub use crate::input::*;
    pub use crate::interaction::*;
    pub use crate::items::*;
    pub use crate::noise::*;
    pub use crate::player::*;
    pub use crate::render::*;
    pub use crate::session::*;
    pub use crate::settings::*;
    pub use crate::spatial::*;
}

pub use prelude::*;
