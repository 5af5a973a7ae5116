//! Error types for the Granny House crates.
//!
//! The simulation tick itself never fails; these cover setup-time work such as
//! catalog validation, session mode changes and configuration loading.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum GrannyError {
    /// House catalog errors
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Session mode errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while validating the static house catalogs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Fewer spawn slots than item types to place
    #[error("Not enough spawn slots: {items} items, {slots} slots")]
    NotEnoughSpawnSlots {
        /// Number of items to place
        items: usize,
        /// Number of available slots
        slots: usize,
    },

    /// A room box with a non-positive extent
    #[error("Degenerate room bounds: {0}")]
    DegenerateRoom(String),

    /// Two hiding spots share an id
    #[error("Duplicate hiding spot id: {0}")]
    DuplicateHidingSpot(String),

    /// A catalog entry placed outside every room
    #[error("Catalog entry outside the house: {0}")]
    OutsideHouse(String),
}

/// Errors raised by illegal session mode changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The requested action is not valid in the current mode
    #[error("Cannot {action} while {mode}")]
    InvalidTransition {
        /// Name of the current mode
        mode: String,
        /// The attempted action
        action: &'static str,
    },

    /// The run has already finished
    #[error("Run already finished")]
    Finished,
}

/// Result type alias for Granny House operations.
pub type GrannyResult<T> = Result<T, GrannyError>;

/// Result type alias for catalog validation.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
