//! Presenter seam: everything that consumes snapshots without feeding back
//! into the simulation (renderers, recorders, log output).

use std::io::Write;

use serde::Serialize;

use bastion_core::enums::GamePhase;
use bastion_core::state::GameStateSnapshot;

/// Receives every snapshot the loop produces. Never influences the simulation.
pub trait Presenter {
    fn present(&mut self, snapshot: &GameStateSnapshot);
}

/// Logs lifecycle changes and a periodic status line.
pub struct LogPresenter {
    status_every: u64,
    last_phase: Option<GamePhase>,
    cities_alive: Option<usize>,
    bases_destroyed: usize,
}

impl LogPresenter {
    /// `status_every`: emit a debug status line every N steps (0 disables).
    pub fn new(status_every: u64) -> Self {
        Self {
            status_every,
            last_phase: None,
            cities_alive: None,
            bases_destroyed: 0,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        if self.last_phase != Some(snapshot.phase) {
            log::info!("Phase: {:?}", snapshot.phase);
            self.last_phase = Some(snapshot.phase);
        }

        let cities = snapshot.cities.iter().filter(|c| c.active).count();
        if let Some(previous) = self.cities_alive {
            if cities < previous {
                log::warn!("Cities remaining: {cities}");
            }
        }
        self.cities_alive = Some(cities);

        let destroyed = snapshot.bases.iter().filter(|b| b.destroyed).count();
        if destroyed > self.bases_destroyed {
            log::warn!("Bases destroyed: {destroyed}/{}", snapshot.bases.len());
        }
        self.bases_destroyed = destroyed;

        for text in snapshot.floating_texts.iter().filter(|t| t.opacity >= 1.0) {
            log::trace!("Floating text: {}", text.text);
        }

        if self.status_every > 0 && snapshot.time.tick % self.status_every == 0 {
            log::debug!(
                "t={:.1}s score={} enemies={} projectiles={} explosions={} combo={}",
                snapshot.time.elapsed_ms / 1000.0,
                snapshot.score.score,
                snapshot.enemies.len(),
                snapshot.projectiles.len(),
                snapshot.explosions.len(),
                snapshot.combo.count,
            );
        }
    }
}

/// Writes each snapshot as one JSON line, for piping into an external renderer.
pub struct JsonLinesPresenter<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        if self.failed {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = result {
            log::error!("Snapshot output failed, disabling: {e}");
            self.failed = true;
        }
    }
}

/// Fans one snapshot out to several presenters.
impl Presenter for Vec<Box<dyn Presenter + Send>> {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        for presenter in self.iter_mut() {
            presenter.present(snapshot);
        }
    }
}

/// End-of-run statistics printed by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub phase: GamePhase,
    pub elapsed_secs: f64,
    pub score: u64,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub ground_impacts: u32,
    pub shots_fired: u32,
    pub cities_remaining: usize,
    pub bases_operational: usize,
}

impl RunSummary {
    pub fn from_snapshot(snapshot: &GameStateSnapshot) -> Self {
        Self {
            phase: snapshot.phase,
            elapsed_secs: snapshot.time.elapsed_ms / 1000.0,
            score: snapshot.score.score,
            enemies_spawned: snapshot.score.enemies_spawned,
            enemies_destroyed: snapshot.score.enemies_destroyed,
            ground_impacts: snapshot.score.ground_impacts,
            shots_fired: snapshot.score.shots_fired,
            cities_remaining: snapshot.cities.iter().filter(|c| c.active).count(),
            bases_operational: snapshot.bases.iter().filter(|b| !b.destroyed).count(),
        }
    }
}
