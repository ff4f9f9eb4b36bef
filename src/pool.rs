use crate::entity::{Entity, EntityKind};
use crate::geo::*;

/// fixed capacity recycler, every slot is allocated up front and reused
pub struct Pool {
    kind: EntityKind,
    slots: Vec<Entity>,
    // slots[..alive] are alive, slots[alive..] are dead
    alive: usize,
}

impl Pool {
    /// pre-allocates `capacity` dead entities of `kind`, sized after the sprite
    pub fn new(kind: EntityKind, capacity: usize, size: V2) -> Pool {
        Pool {
            kind,
            slots: vec![Entity::new(kind, size); capacity],
            alive: 0,
        }
    }

    /// kills every slot, used when the game restarts
    pub fn init(&mut self) {
        for entity in self.slots.iter_mut() {
            entity.clear();
        }
        self.alive = 0;
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    pub fn is_full(&self) -> bool {
        self.alive == self.slots.len()
    }

    /// revives the last dead slot and moves it to the front.
    /// returns false and does nothing when every slot is in use
    pub fn spawn(&mut self, position: P2, velocity: V2) -> bool {
        if self.is_full() {
            log::trace!("{:?} pool exhausted, spawn dropped", self.kind);
            return false;
        }
        let last = self.slots.len() - 1;
        self.slots[last].spawn(position, velocity);
        // last -> boundary -> front, the old front ends up at the boundary
        self.slots.swap(last, self.alive);
        self.slots.swap(self.alive, 0);
        self.alive += 1;
        true
    }

    /// spawns both entities or none of them
    pub fn spawn_pair(&mut self, first: (P2, V2), second: (P2, V2)) -> bool {
        if self.slots.len() - self.alive < 2 {
            log::trace!("{:?} pool cannot hold a pair, spawn dropped", self.kind);
            return false;
        }
        self.spawn(first.0, first.1);
        self.spawn(second.0, second.1);
        true
    }

    pub fn iter_alive(&self) -> std::slice::Iter<'_, Entity> {
        self.slots[..self.alive].iter()
    }

    /// entity fields may be changed, membership may not
    pub fn iter_alive_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.slots[..self.alive].iter_mut()
    }

    pub fn slots(&self) -> &[Entity] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&Entity> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.slots.get_mut(slot)
    }

    /// advances every alive entity. `advance` returns true when the entity's
    /// lifetime ended, it is then cleared and moved behind the alive ones.
    /// returns the number of reclaimed entities
    pub fn step<F>(&mut self, mut advance: F) -> usize
    where
        F: FnMut(&mut Entity) -> bool,
    {
        let mut reclaimed = 0;
        let mut i = 0;
        while i < self.alive {
            debug_assert!(self.slots[i].alive);
            if advance(&mut self.slots[i]) {
                self.slots[i].clear();
                self.alive -= 1;
                self.slots.swap(i, self.alive);
                reclaimed += 1;
                // slot i now holds an entity that was not advanced yet
            } else {
                i += 1;
            }
        }
        reclaimed
    }

    /// whether the alive entities form a prefix of the storage
    pub fn is_partitioned(&self) -> bool {
        self.slots[..self.alive].iter().all(|e| e.alive)
            && self.slots[self.alive..].iter().all(|e| !e.alive)
    }
}
