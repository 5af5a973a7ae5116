//! Difficulty tiers and the antagonist profile each one selects.

use serde::{Deserialize, Serialize};

/// Difficulty tier chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// No antagonist at all
    Practice,
    /// Slow, short-sighted Granny
    Easy,
    /// Standard Granny
    #[default]
    Medium,
    /// Faster Granny
    Hard,
    /// Much faster Granny
    Extreme,
    /// Fastest Granny, darker house
    Nightmare,
}

impl Difficulty {
    /// All tiers from easiest to hardest.
    pub const ALL: [Self; 6] = [
        Self::Practice,
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Extreme,
        Self::Nightmare,
    ];

    /// Returns the antagonist profile, or `None` under Practice.
    #[must_use]
    pub const fn profile(self) -> Option<DifficultyProfile> {
        match self {
            Self::Practice => None,
            Self::Easy => Some(DifficultyProfile::new(3.0, 15.0)),
            Self::Medium => Some(DifficultyProfile::new(5.5, 30.0)),
            Self::Hard => Some(DifficultyProfile::new(8.0, 40.0)),
            Self::Extreme => Some(DifficultyProfile::new(10.0, 50.0)),
            Self::Nightmare => Some(DifficultyProfile::new(13.0, 70.0)),
        }
    }

    /// Whether a run at this tier spawns Granny.
    #[must_use]
    pub const fn has_antagonist(self) -> bool {
        !matches!(self, Self::Practice)
    }

    /// Whether the darker nightmare visuals apply.
    #[must_use]
    pub const fn is_nightmare(self) -> bool {
        matches!(self, Self::Nightmare)
    }

    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Practice => "Practice",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Extreme => "Extreme",
            Self::Nightmare => "Nightmare",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Antagonist parameters fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Base movement speed in units per second
    pub speed: f32,
    /// Distance at which Granny spots a visible player
    pub detection_range: f32,
}

impl DifficultyProfile {
    /// Creates a profile.
    #[must_use]
    pub const fn new(speed: f32, detection_range: f32) -> Self {
        Self {
            speed,
            detection_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_has_no_profile() {
        assert!(Difficulty::Practice.profile().is_none());
        assert!(!Difficulty::Practice.has_antagonist());
    }

    #[test]
    fn test_profiles_escalate() {
        let profiles: Vec<_> = Difficulty::ALL
            .iter()
            .filter_map(|d| d.profile())
            .collect();
        assert_eq!(profiles.len(), 5);
        for pair in profiles.windows(2) {
            assert!(pair[0].speed < pair[1].speed);
            assert!(pair[0].detection_range < pair[1].detection_range);
        }
    }

    #[test]
    fn test_nightmare_profile() {
        assert_eq!(
            Difficulty::Nightmare.profile(),
            Some(DifficultyProfile::new(13.0, 70.0))
        );
    }
}
