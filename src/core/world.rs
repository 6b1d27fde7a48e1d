// Host-facing seams: where world objects and time come from.
//
// Everything here is read on the frame thread only.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::error::Result;
use super::model::{EntityId, Position, WorldObject};

/// The local player as seen by the host
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlayer {
    pub id: EntityId,
    pub position: Position,
}

/// Enumerates objects currently loaded in the world.
pub trait WorldObjectSource {
    /// None while logged out, zoning, or otherwise without a character
    fn local_player(&self) -> Option<LocalPlayer>;

    /// All objects in the object table, the local player included
    fn enumerate(&self) -> Result<Vec<WorldObject>>;
}

impl<S: WorldObjectSource + ?Sized> WorldObjectSource for Box<S> {
    fn local_player(&self) -> Option<LocalPlayer> {
        (**self).local_player()
    }

    fn enumerate(&self) -> Result<Vec<WorldObject>> {
        (**self).enumerate()
    }
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
