//! Deferred one-shot events keyed by session time.
//!
//! Replaces external timers: events are drained at the start of each step
//! and every handler re-validates its subject before acting. The schedule
//! lives in the session, so a reset discards whatever is pending.

use glam::DVec2;

/// Work to perform once its due time is reached.
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredAction {
    /// End a machine-gun overheat and refill its ammo.
    RefillMachineGun { base_id: u8 },
    /// One staggered missile of a guided barrage.
    LaunchBarrageMissile { base_id: u8, aim: DVec2 },
    /// One stage of a destroyed city's burst.
    CityBurst { at: DVec2 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub due_ms: f64,
    pub action: DeferredAction,
}

#[derive(Debug, Clone, Default)]
pub struct EventSchedule {
    events: Vec<ScheduledEvent>,
}

impl EventSchedule {
    pub fn schedule(&mut self, due_ms: f64, action: DeferredAction) {
        self.events.push(ScheduledEvent { due_ms, action });
    }

    /// Remove and return every event due at or before `now_ms`, earliest first.
    /// Events with equal due times keep their scheduling order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<DeferredAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.events)
            .into_iter()
            .partition(|e| e.due_ms <= now_ms);
        self.events = pending;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
