//! End-of-run summary.

use granny_gameplay::{Difficulty, GameMode, Session, SimEvent};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome and counters for one headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed the run was started with
    pub seed: u64,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Mode the session ended in
    pub outcome: GameMode,
    /// Day reached
    pub day: u32,
    /// Frames played
    pub frames: u64,
    /// Seconds of simulated play
    pub simulated_secs: f64,
    /// Items in the inventory at the end
    pub items_collected: usize,
    /// Times the player was caught
    pub catches: u32,
    /// Noises Granny heard
    pub noises: u32,
    /// Times the player hid
    pub hides: u32,
}

impl RunSummary {
    /// Start an empty summary for a run.
    #[must_use]
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            seed,
            difficulty,
            outcome: GameMode::Transition,
            day: 1,
            frames: 0,
            simulated_secs: 0.0,
            items_collected: 0,
            catches: 0,
            noises: 0,
            hides: 0,
        }
    }

    /// Count the events of one frame.
    pub fn record(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::PlayerCaught => self.catches += 1,
                SimEvent::Noise { .. } => self.noises += 1,
                SimEvent::PlayerHid { .. } => self.hides += 1,
                _ => {},
            }
        }
    }

    /// Copy the final session state.
    pub fn finish(&mut self, session: &Session) {
        self.outcome = session.mode();
        self.day = session.day();
        self.frames = session.frames();
        self.simulated_secs = session.state().elapsed();
        self.items_collected = session.state().inventory().len();
    }

    /// Write the summary to the log.
    pub fn log(&self) {
        info!("Run finished: {}", self.outcome);
        info!("  Difficulty: {} (seed {})", self.difficulty, self.seed);
        info!("  Day reached: {}", self.day);
        info!(
            "  Frames: {} ({:.1}s simulated)",
            self.frames, self.simulated_secs
        );
        info!("  Items collected: {}", self.items_collected);
        info!(
            "  Caught {} times, {} noises heard, hid {} times",
            self.catches, self.noises, self.hides
        );
    }

    /// Render the summary as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use granny_gameplay::NoiseSource;

    #[test]
    fn test_record_counts_events() {
        let mut summary = RunSummary::new(7, Difficulty::Hard);
        summary.record(&[
            SimEvent::PlayerCaught,
            SimEvent::Noise {
                position: Vec3::ZERO,
                source: NoiseSource::Footstep,
            },
            SimEvent::PlayerHid {
                spot: "bed-start".to_string(),
            },
            SimEvent::PlayerUnhid,
        ]);
        summary.record(&[SimEvent::PlayerCaught]);
        assert_eq!(summary.catches, 2);
        assert_eq!(summary.noises, 1);
        assert_eq!(summary.hides, 1);
    }

    #[test]
    fn test_json_fields() {
        let summary = RunSummary::new(42, Difficulty::Nightmare);
        let json = summary.to_json().expect("Failed to serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("Failed to parse");
        assert_eq!(value["seed"], 42);
        assert_eq!(value["difficulty"], "Nightmare");
        assert_eq!(value["outcome"], "Transition");
    }
}
