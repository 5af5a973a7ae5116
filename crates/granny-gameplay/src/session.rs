//! Run session: days, modes and the frame orchestrator.
//!
//! This module handles everything above a single simulation tick:
//! - The mode gate (only `Playing` ticks the simulation)
//! - Day progression after a catch, up to [`MAX_DAYS`]
//! - Victory through the exit, pause on pointer release, retry
//! - Handing each played frame to the injected renderer
//! - Teardown, after which no frame runs again

use granny_common::{GrannyResult, SessionError, SessionResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::events::SimEvent;
use crate::game_state::GameState;
use crate::input::FrameInput;
use crate::render::Renderer;

/// Number of days the player survives before a catch ends the run.
pub const MAX_DAYS: u32 = 5;

// ============================================================================
// Game mode
// ============================================================================

/// Session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Day card between days
    #[default]
    Transition,
    /// The simulation is running
    Playing,
    /// Paused by the player
    Paused,
    /// Caught on the last day
    GameOver,
    /// Escaped through the front door
    Victory,
}

impl GameMode {
    /// Check if the simulation should tick.
    #[must_use]
    pub const fn should_tick(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Check if the run is over.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }

    /// Get display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transition => "Transition",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::GameOver => "GameOver",
            Self::Victory => "Victory",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Session
// ============================================================================

/// A run from the first day card to victory or game over.
pub struct Session {
    state: GameState,
    mode: GameMode,
    day: u32,
    renderer: Option<Box<dyn Renderer>>,
    cancelled: bool,
    frames: u64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("day", &self.day)
            .field("has_renderer", &self.renderer.is_some())
            .field("cancelled", &self.cancelled)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session showing the first day card.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            mode: GameMode::Transition,
            day: 1,
            renderer: None,
            cancelled: false,
            frames: 0,
        }
    }

    /// Injects the renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Replaces or removes the renderer.
    pub fn set_renderer(&mut self, renderer: Option<Box<dyn Renderer>>) {
        self.renderer = renderer;
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current day, starting at 1.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Frames played so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the session has been torn down.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The simulation state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the simulation state.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Text of the current objective.
    #[must_use]
    pub fn objective(&self) -> &'static str {
        if self.state.inventory().has_exit_key() {
            "Unlock the Main Door!"
        } else {
            "Find the Master Key"
        }
    }

    /// Ends the day card and starts playing the current day.
    pub fn begin_day(&mut self) -> SessionResult<Vec<SimEvent>> {
        self.ensure_live()?;
        if self.mode != GameMode::Transition {
            return Err(self.invalid("begin a day"));
        }
        self.state.start_day();
        let mut events = vec![SimEvent::DayStarted { day: self.day }];
        self.transition_to(GameMode::Playing, &mut events);
        info!("Day {} begins", self.day);
        Ok(events)
    }

    /// Pauses play.
    pub fn pause(&mut self) -> SessionResult<Vec<SimEvent>> {
        self.ensure_live()?;
        if self.mode != GameMode::Playing {
            return Err(self.invalid("pause"));
        }
        let mut events = Vec::new();
        self.transition_to(GameMode::Paused, &mut events);
        Ok(events)
    }

    /// Resumes play.
    pub fn resume(&mut self) -> SessionResult<Vec<SimEvent>> {
        self.ensure_live()?;
        if self.mode != GameMode::Paused {
            return Err(self.invalid("resume"));
        }
        let mut events = Vec::new();
        self.transition_to(GameMode::Playing, &mut events);
        Ok(events)
    }

    /// Starts over from day one with fresh items.
    ///
    /// Allowed from the pause menu and once the run has finished.
    pub fn retry(&mut self) -> GrannyResult<Vec<SimEvent>> {
        self.ensure_live()?;
        if !(self.mode == GameMode::Paused || self.mode.is_finished()) {
            return Err(self.invalid("retry").into());
        }
        self.state.restart()?;
        self.day = 1;
        let mut events = Vec::new();
        self.transition_to(GameMode::Transition, &mut events);
        info!("Retrying from day 1");
        Ok(events)
    }

    /// Tears the session down. Every later frame is a no-op.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            info!("Session torn down after {} frames", self.frames);
        }
        self.cancelled = true;
        self.renderer = None;
    }

    /// Runs one frame.
    ///
    /// Does nothing unless the session is live, playing and has a ready
    /// renderer. Releasing the pointer while playing pauses instead of
    /// ticking.
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> Vec<SimEvent> {
        if self.cancelled || !self.mode.should_tick() {
            return Vec::new();
        }
        let ready = self.renderer.as_ref().is_some_and(|r| r.is_ready());
        if !ready {
            return Vec::new();
        }

        if !input.look_captured {
            let mut events = vec![SimEvent::PauseRequested];
            self.transition_to(GameMode::Paused, &mut events);
            return events;
        }

        let mut events = self.state.tick(input, dt);
        let mut follow_up = Vec::new();
        for event in &events {
            if event.ends_day() {
                self.on_caught(&mut follow_up);
            } else if matches!(event, SimEvent::UsedExitWithItem { .. }) {
                self.on_exit(&mut follow_up);
            }
        }
        events.append(&mut follow_up);

        let snapshot = self.state.snapshot();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&snapshot);
        }
        self.frames += 1;
        events
    }

    fn on_caught(&mut self, events: &mut Vec<SimEvent>) {
        if self.mode != GameMode::Playing {
            return;
        }
        if self.day < MAX_DAYS {
            self.day += 1;
            info!("Caught; advancing to day {}", self.day);
            self.transition_to(GameMode::Transition, events);
        } else {
            info!("Caught on the last day");
            self.transition_to(GameMode::GameOver, events);
        }
    }

    fn on_exit(&mut self, events: &mut Vec<SimEvent>) {
        if self.mode != GameMode::Playing {
            return;
        }
        if self.state.inventory().has_exit_key() {
            info!("Escaped on day {}", self.day);
            self.transition_to(GameMode::Victory, events);
        } else {
            warn!("Need Master Key");
            events.push(SimEvent::ExitNeedsMasterKey);
        }
        self.state.inventory_mut().clear_selection();
    }

    fn transition_to(&mut self, mode: GameMode, events: &mut Vec<SimEvent>) {
        if self.mode == mode {
            return;
        }
        debug!("Session {} -> {}", self.mode, mode);
        events.push(SimEvent::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
    }

    fn ensure_live(&self) -> SessionResult<()> {
        if self.cancelled {
            return Err(SessionError::Finished);
        }
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            mode: self.mode.to_string(),
            action,
        }
    }
}
