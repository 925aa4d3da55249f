//! Daily mission tracking.
//!
//! The tracker owns progress only. Completion rewards are credited by the
//! session orchestrator when it sees the one-shot completion notifications,
//! keeping currency mutation single-writer. The "daily" set is regenerated
//! at session start; there is no calendar-day boundary.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What kind of play advances a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    CatchFish,
    EarnPoints,
    PlayCount,
}

/// A single daily objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: u8,
    pub kind: MissionKind,
    pub description: String,
    pub target: u32,
    pub reward: u32,
    pub progress: u32,
    /// Monotonic: once true, never reverts.
    pub is_completed: bool,
}

/// The session's mission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionTracker {
    missions: SmallVec<[Mission; 3]>,
}

impl Default for MissionTracker {
    fn default() -> Self {
        Self::generate_daily_set()
    }
}

const MISSION_TEMPLATES: [(MissionKind, &str, u32, u32); 3] = [
    (MissionKind::CatchFish, "Catch 5 fish", 5, 100),
    (MissionKind::EarnPoints, "Earn 100 points", 100, 150),
    (MissionKind::PlayCount, "Play 10 times", 10, 80),
];

impl MissionTracker {
    /// Instantiate the fixed template list with zeroed progress.
    #[must_use]
    pub fn generate_daily_set() -> Self {
        let missions = MISSION_TEMPLATES
            .iter()
            .enumerate()
            .map(|(idx, (kind, description, target, reward))| Mission {
                id: u8::try_from(idx).unwrap_or(u8::MAX),
                kind: *kind,
                description: (*description).to_string(),
                target: *target,
                reward: *reward,
                progress: 0,
                is_completed: false,
            })
            .collect();
        Self { missions }
    }

    /// All missions in declaration order.
    #[must_use]
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// Number of completed missions.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.missions.iter().filter(|m| m.is_completed).count()
    }

    /// Advance every matching, not-yet-completed mission.
    ///
    /// Progress clamps at the target. Returns the missions that crossed
    /// their target during this call, exactly once each; re-advancing a
    /// completed mission is a no-op.
    pub fn advance(&mut self, kind: MissionKind, amount: u32) -> SmallVec<[Mission; 3]> {
        let mut newly_completed = SmallVec::new();
        for mission in &mut self.missions {
            if mission.kind != kind || mission.is_completed {
                continue;
            }
            mission.progress = mission.progress.saturating_add(amount).min(mission.target);
            if mission.progress >= mission.target {
                mission.is_completed = true;
                newly_completed.push(mission.clone());
            }
        }
        newly_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_set_has_zero_progress() {
        let tracker = MissionTracker::generate_daily_set();
        assert_eq!(tracker.missions().len(), 3);
        for mission in tracker.missions() {
            assert_eq!(mission.progress, 0);
            assert!(!mission.is_completed);
        }
    }

    #[test]
    fn completion_fires_exactly_once_and_progress_clamps() {
        let mut tracker = MissionTracker::generate_daily_set();
        for _ in 0..4 {
            assert!(tracker.advance(MissionKind::CatchFish, 1).is_empty());
        }
        let done = tracker.advance(MissionKind::CatchFish, 1);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].kind, MissionKind::CatchFish);
        assert_eq!(done[0].reward, 100);

        // A sixth advance neither overflows nor re-fires.
        assert!(tracker.advance(MissionKind::CatchFish, 1).is_empty());
        let mission = &tracker.missions()[0];
        assert_eq!(mission.progress, 5);
        assert!(mission.is_completed);
    }

    #[test]
    fn large_advance_clamps_at_target() {
        let mut tracker = MissionTracker::generate_daily_set();
        let done = tracker.advance(MissionKind::EarnPoints, 5_000);
        assert_eq!(done.len(), 1);
        assert_eq!(tracker.missions()[1].progress, 100);
    }

    #[test]
    fn advance_only_touches_matching_kind() {
        let mut tracker = MissionTracker::generate_daily_set();
        tracker.advance(MissionKind::PlayCount, 3);
        assert_eq!(tracker.missions()[0].progress, 0);
        assert_eq!(tracker.missions()[1].progress, 0);
        assert_eq!(tracker.missions()[2].progress, 3);
        assert_eq!(tracker.completed_count(), 0);
    }
}
