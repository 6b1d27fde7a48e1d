//! Deterministic stand-in for a game client's object table.
//!
//! Walkers move back and forth between two points so they cross alert and
//! detection boundaries on a fixed schedule.

use std::cell::Cell;
use std::time::Duration;

use super::error::{RadarError, Result};
use super::model::{ObjectKind, Position, WorldObject};
use super::world::{LocalPlayer, WorldObjectSource};

#[derive(Debug, Clone)]
pub struct Walker {
    pub id: String,
    pub name: String,
    pub kind: ObjectKind,
    pub from: Position,
    pub to: Position,
    /// Time for one full from -> to -> from lap. Zero means standing still.
    pub lap: Duration,
}

impl Walker {
    pub fn stationary(id: &str, name: &str, kind: ObjectKind, at: Position) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            from: at,
            to: at,
            lap: Duration::ZERO,
        }
    }

    pub fn patrol(
        id: &str,
        name: &str,
        kind: ObjectKind,
        from: Position,
        to: Position,
        lap: Duration,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            from,
            to,
            lap,
        }
    }

    pub fn position_at(&self, elapsed: Duration) -> Position {
        if self.lap.is_zero() {
            return self.from;
        }
        let phase = (elapsed.as_secs_f32() / self.lap.as_secs_f32()).fract();
        // Triangle wave: 0 -> 1 over the first half lap, back to 0 over the second
        let t = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        self.from + (self.to - self.from) * t
    }
}

pub struct SimulatedWorld {
    player: Option<LocalPlayer>,
    walkers: Vec<Walker>,
    elapsed: Duration,
    fail_next: Cell<bool>,
}

impl SimulatedWorld {
    pub fn new(player_at: Position) -> Self {
        Self {
            player: Some(LocalPlayer {
                id: "local".to_string(),
                position: player_at,
            }),
            walkers: Vec::new(),
            elapsed: Duration::ZERO,
            fail_next: Cell::new(false),
        }
    }

    /// A small plaza: one player patrolling through alert range, one idling
    /// just outside it, and a few non-player objects.
    pub fn demo() -> Self {
        let mut world = Self::new(Position::origin());
        world.add(Walker::patrol(
            "0x1001",
            "Roaming Adventurer",
            ObjectKind::Player,
            Position::new(45.0, 0.0, 0.0),
            Position::new(5.0, 0.0, 0.0),
            Duration::from_secs(16),
        ));
        world.add(Walker::stationary(
            "0x1002",
            "Idle Crafter",
            ObjectKind::Player,
            Position::new(0.0, 0.0, 30.0),
        ));
        world.add(Walker::stationary(
            "0x2001",
            "Aetheryte Plaza",
            ObjectKind::Aetheryte,
            Position::new(10.0, 0.0, 10.0),
        ));
        world.add(Walker::stationary(
            "0x2002",
            "Treasure Coffer",
            ObjectKind::Treasure,
            Position::new(-12.0, 0.0, 4.0),
        ));
        world.add(Walker::stationary(
            "0x2003",
            "Mammet",
            ObjectKind::Other(14),
            Position::new(-20.0, 0.0, -20.0),
        ));
        world
    }

    pub fn add(&mut self, walker: Walker) {
        self.walkers.push(walker);
    }

    pub fn remove(&mut self, id: &str) {
        self.walkers.retain(|w| w.id != id);
    }

    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn set_logged_in(&mut self, logged_in: bool) {
        match (logged_in, self.player.is_some()) {
            (true, false) => {
                self.player = Some(LocalPlayer {
                    id: "local".to_string(),
                    position: Position::origin(),
                })
            }
            (false, true) => self.player = None,
            _ => {}
        }
    }

    /// Make the next enumeration fail once
    pub fn fail_next_enumeration(&mut self) {
        self.fail_next.set(true);
    }
}

impl WorldObjectSource for SimulatedWorld {
    fn local_player(&self) -> Option<LocalPlayer> {
        self.player.clone()
    }

    fn enumerate(&self) -> Result<Vec<WorldObject>> {
        if self.fail_next.replace(false) {
            return Err(RadarError::source_failed("object table not ready"));
        }

        let mut objects: Vec<WorldObject> = self
            .walkers
            .iter()
            .map(|w| WorldObject {
                id: w.id.clone(),
                name: w.name.clone(),
                kind: w.kind,
                position: w.position_at(self.elapsed),
            })
            .collect();

        if let Some(player) = &self.player {
            objects.push(WorldObject {
                id: player.id.clone(),
                name: "You".to_string(),
                kind: ObjectKind::Player,
                position: player.position,
            });
        }

        Ok(objects)
    }
}
