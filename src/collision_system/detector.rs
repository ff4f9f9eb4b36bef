use super::quadtree::QuadTree;
use crate::config::QuadTreeConfig;
use crate::entity::{Entity, EntityKind};
use crate::geo::*;
use crate::pool::Pool;
use std::collections::HashSet;

/// where an entity lives for the duration of one frame:
/// the index of its source in the pass and its slot within that source
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EntityId {
    pub source: usize,
    pub slot: usize,
}

/// what the quadtree stores: a handle back into the owning source plus
/// the geometry and tags the narrow test needs
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Collider {
    pub id: EntityId,
    pub aabb: AABB,
    pub kind: EntityKind,
    pub collides_with: EntityKind,
}

impl Collider {
    pub fn new(id: EntityId, entity: &Entity) -> Collider {
        Collider {
            id,
            aabb: entity.get_aabb(),
            kind: entity.kind,
            collides_with: entity.collides_with,
        }
    }

    /// directional: only self's target kind is checked
    pub fn hits(&self, other: &Collider) -> bool {
        self.collides_with == other.kind && self.aabb.does_collide(&other.aabb)
    }
}

impl HasAabb for Collider {
    fn get_aabb(&self) -> AABB {
        self.aabb
    }
}

/// owner of entity storage that takes part in the collision pass
pub trait EntitySource {
    /// calls `f` with the slot and entity of every alive entity
    fn for_each_alive(&self, f: &mut dyn FnMut(usize, &Entity));
    fn entity_mut(&mut self, slot: usize) -> Option<&mut Entity>;
}

impl EntitySource for Pool {
    fn for_each_alive(&self, f: &mut dyn FnMut(usize, &Entity)) {
        for (slot, entity) in self.iter_alive().enumerate() {
            f(slot, entity);
        }
    }

    fn entity_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.get_mut(slot)
    }
}

/// a lone entity like the player's ship
impl EntitySource for Entity {
    fn for_each_alive(&self, f: &mut dyn FnMut(usize, &Entity)) {
        if self.alive {
            f(0, self);
        }
    }

    fn entity_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        if slot == 0 {
            Some(self)
        } else {
            None
        }
    }
}

/// broad phase over the playfield. keeps the quadtree and its scratch
/// buffers between frames, the tree itself is rebuilt on every update
pub struct CollisionSystem {
    bounding_rect: AABB,
    tree: QuadTree<Collider>,
    objects: Vec<Collider>,
    candidates: Vec<Collider>,
    pairs: HashSet<(EntityId, EntityId)>,
}

impl CollisionSystem {
    pub fn new(bounding_rect: AABB) -> CollisionSystem {
        CollisionSystem::with_config(bounding_rect, &QuadTreeConfig::default())
    }

    pub fn with_config(bounding_rect: AABB, config: &QuadTreeConfig) -> CollisionSystem {
        CollisionSystem {
            bounding_rect,
            tree: QuadTree::with_limits(bounding_rect, config.max_objects, config.max_levels),
            objects: Vec::new(),
            candidates: Vec::new(),
            pairs: HashSet::new(),
        }
    }

    pub fn bounding_rect(&self) -> AABB {
        self.bounding_rect
    }

    pub fn set_bounding_rect(&mut self, bounding_rect: AABB) {
        self.bounding_rect = bounding_rect;
        self.tree.reset(bounding_rect);
    }

    /// the tree as built by the last update
    pub fn tree(&self) -> &QuadTree<Collider> {
        &self.tree
    }

    /// clears the tree and inserts every alive entity of every source
    pub fn rebuild(&mut self, sources: &[&mut dyn EntitySource]) {
        self.tree.clear();
        let tree = &mut self.tree;
        for (source, entities) in sources.iter().enumerate() {
            entities.for_each_alive(&mut |slot, entity| {
                tree.insert(Collider::new(EntityId { source, slot }, entity));
            });
        }
    }

    /// one collision pass: rebuild, then test every stored entity against its
    /// candidates and flag both sides of every hit as colliding.
    /// returns the number of colliding pairs, a pair where both sides name
    /// each other counts once
    pub fn update(&mut self, sources: &mut [&mut dyn EntitySource]) -> usize {
        self.rebuild(sources);

        self.objects.clear();
        self.pairs.clear();
        self.tree.collect_all(&mut self.objects);

        for a in self.objects.iter() {
            self.candidates.clear();
            self.tree.query_candidates(a, &mut self.candidates);
            for b in self.candidates.iter() {
                if a.hits(b) {
                    flag_colliding(sources, a.id);
                    flag_colliding(sources, b.id);
                    self.pairs.insert((a.id.min(b.id), a.id.max(b.id)));
                }
            }
        }
        let hits = self.pairs.len();
        if hits > 0 {
            log::trace!("{} hits among {} entities", hits, self.objects.len());
        }
        hits
    }
}

fn flag_colliding(sources: &mut [&mut dyn EntitySource], id: EntityId) {
    match sources
        .get_mut(id.source)
        .and_then(|source| source.entity_mut(id.slot))
    {
        Some(entity) => {
            debug_assert!(entity.alive, "dead entity {:?} in the quadtree", id);
            entity.colliding = true;
        }
        None => panic!("collider {:?} does not point to an entity", id),
    }
}

/// one shot collision pass over `playfield`. allocates a fresh tree on every
/// call, keep a `CollisionSystem` around when running it every frame
pub fn run_collision_pass(playfield: AABB, sources: &mut [&mut dyn EntitySource]) -> usize {
    CollisionSystem::new(playfield).update(sources)
}
