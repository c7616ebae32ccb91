//! Session state: score, combo chain, difficulty scalars and global cooldowns.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities. A reset replaces the
//! whole session, which also drops every pending deferred event.

use bastion_core::constants::COMBO_WINDOW_MS;
use bastion_core::enums::GamePhase;
use bastion_core::types::{Arena, SimTime};

use crate::schedule::EventSchedule;

/// Time-windowed kill chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboState {
    pub count: u32,
    /// Session time at which the window closes (ms).
    pub deadline_ms: f64,
    /// True iff a kill landed within the trailing window.
    pub active: bool,
}

impl ComboState {
    /// Count a kill and push the deadline a full window into the future.
    pub fn register_kill(&mut self, now_ms: f64) {
        self.count += 1;
        self.deadline_ms = now_ms + COMBO_WINDOW_MS;
        self.active = true;
    }

    /// Close the window if it has lapsed.
    ///
    /// Returns the chain length exactly once per lapsed window, and only when
    /// more than one kill landed in it.
    pub fn expire(&mut self, now_ms: f64) -> Option<u32> {
        if !self.active || now_ms <= self.deadline_ms {
            return None;
        }
        let count = self.count;
        self.count = 0;
        self.active = false;
        (count > 1).then_some(count)
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        if self.active {
            (self.deadline_ms - now_ms).max(0.0)
        } else {
            0.0
        }
    }
}

/// Running score and statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreState {
    pub score: u64,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub ground_impacts: u32,
    pub shots_fired: u32,
}

/// Everything that makes up one run, apart from the entity world.
#[derive(Debug, Clone)]
pub struct Session {
    pub arena: Arena,
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: ScoreState,
    pub combo: ComboState,
    /// Enemy speed scale, rises with score up to a cap.
    pub difficulty_multiplier: f64,
    /// Grows with every homing kill and never decreases within a run.
    pub homing_speed_multiplier: f64,
    /// Seconds accumulated toward the next enemy spawn.
    pub spawn_timer_secs: f64,
    /// Last repeat-fire request issued while the trigger was held.
    pub last_hold_fire_ms: Option<f64>,
    /// Nuclear launches are refused before this time. Set at detonation.
    pub nuclear_ready_at_ms: f64,
    /// Barrages are refused before this time. Set at initiation.
    pub barrage_ready_at_ms: f64,
    pub schedule: EventSchedule,
    pub next_enemy_id: u32,
}

impl Session {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            time: SimTime::default(),
            phase: GamePhase::Running,
            score: ScoreState::default(),
            combo: ComboState::default(),
            difficulty_multiplier: 1.0,
            homing_speed_multiplier: 1.0,
            spawn_timer_secs: 0.0,
            last_hold_fire_ms: None,
            nuclear_ready_at_ms: 0.0,
            barrage_ready_at_ms: 0.0,
            schedule: EventSchedule::default(),
            next_enemy_id: 0,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.time.now_ms()
    }

    /// Count a destroyed enemy and restart the combo window.
    pub fn record_kill(&mut self) {
        self.score.enemies_destroyed += 1;
        let now = self.now_ms();
        self.combo.register_kill(now);
    }

    pub fn award(&mut self, points: u64) {
        self.score.score += points;
    }

    pub fn allocate_enemy_id(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_kill_times_out_silently() {
        let mut combo = ComboState::default();
        combo.register_kill(100.0);
        assert!(combo.active);
        assert_eq!(combo.expire(2000.0), None, "window still open");
        assert_eq!(combo.expire(2100.5), None);
        assert!(!combo.active);
        assert_eq!(combo.count, 0);
    }

    #[test]
    fn test_chain_announces_exactly_once() {
        let mut combo = ComboState::default();
        combo.register_kill(0.0);
        combo.register_kill(1500.0);
        combo.register_kill(3000.0);
        // Each kill pushed the deadline; still open at 4999.
        assert_eq!(combo.expire(4999.0), None);
        assert_eq!(combo.expire(5001.0), Some(3));
        assert_eq!(combo.expire(5002.0), None);
        assert_eq!(combo.expire(9000.0), None);
    }

    #[test]
    fn test_remaining_window() {
        let mut combo = ComboState::default();
        assert_eq!(combo.remaining_ms(0.0), 0.0);
        combo.register_kill(1000.0);
        assert!((combo.remaining_ms(1500.0) - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_session_kill_bookkeeping() {
        let mut session = Session::new(Arena::default());
        session.time.advance(1.0);
        session.record_kill();
        session.award(150);
        assert_eq!(session.score.enemies_destroyed, 1);
        assert_eq!(session.score.score, 150);
        assert!(session.combo.active);
        assert!((session.combo.deadline_ms - 3000.0).abs() < 1e-9);
        assert_eq!(session.allocate_enemy_id(), 0);
        assert_eq!(session.allocate_enemy_id(), 1);
    }
}
