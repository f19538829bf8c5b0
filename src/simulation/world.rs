//! The world: every solid by identity, plus the updater that moves them.

use std::collections::btree_map::{BTreeMap, Values};
use std::thread;
use std::time::Instant;

use crate::simulation::solid::{Solid, SolidId};
use crate::simulation::updater::{StepOutcome, Updater};

#[derive(Debug, Default)]
pub struct World {
    solids: BTreeMap<SolidId, Solid>,
    pub updater: Updater,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_updater(updater: Updater) -> Self {
        Self {
            solids: BTreeMap::new(),
            updater,
        }
    }

    /// Add a solid and return its identity. Solids are never removed.
    pub fn add_solid(&mut self, solid: Solid) -> SolidId {
        let id = solid.id();
        self.solids.insert(id, solid);
        id
    }

    pub fn solid(&self, id: SolidId) -> Option<&Solid> {
        self.solids.get(&id)
    }

    pub fn solid_mut(&mut self, id: SolidId) -> Option<&mut Solid> {
        self.solids.get_mut(&id)
    }

    /// First solid with the given name, in identity order.
    pub fn find_by_name(&self, name: &str) -> Option<&Solid> {
        self.solids.values().find(|s| s.name() == name)
    }

    /// Read-only view of every solid, in identity order.
    pub fn solids(&self) -> Values<'_, SolidId, Solid> {
        self.solids.values()
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.solids.values().map(Solid::kinetic_energy).sum()
    }

    /// Give the updater a chance to step, as if the clock read `now`.
    pub fn step_at(&mut self, now: Instant) -> StepOutcome {
        self.updater.step_at(self.solids.values_mut(), now)
    }

    pub fn tick(&mut self) -> StepOutcome {
        self.step_at(Instant::now())
    }

    /// Start the updater and keep stepping until it is stopped.
    ///
    /// `between_steps` runs after every step attempt, before the updater is
    /// asked for the next one. It is where other cooperative work happens
    /// (rendering, tuning `time_scale`) and where `updater.stop()` is expected
    /// to be called.
    pub fn run<F>(&mut self, mut between_steps: F)
    where
        F: FnMut(&mut World, StepOutcome),
    {
        self.updater.start();
        while self.updater.is_commanded() {
            let outcome = self.tick();
            between_steps(self, outcome);
            thread::yield_now();
        }
    }
}
