use crate::geo::*;
use serde::{Deserialize, Serialize};

/// kind tag of every collidable object in the game
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    PlayerBullet,
    Enemy,
    EnemyBullet,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Ship,
        EntityKind::PlayerBullet,
        EntityKind::Enemy,
        EntityKind::EnemyBullet,
    ];

    /// the single kind this kind is checked against.
    /// every pair is named in both directions, the detector only looks at one side
    pub fn collision_target(self) -> EntityKind {
        match self {
            EntityKind::Ship => EntityKind::EnemyBullet,
            EntityKind::EnemyBullet => EntityKind::Ship,
            EntityKind::PlayerBullet => EntityKind::Enemy,
            EntityKind::Enemy => EntityKind::PlayerBullet,
        }
    }
}

/// one ship/bullet/enemy slot
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Entity {
    /// top left corner
    pub position: P2,
    pub size: V2,
    pub velocity: V2,
    /// patrol speed of enemies, unused by the other kinds
    pub speed: Float,
    /// where the entity was spawned, enemies patrol around it
    pub anchor: P2,
    pub alive: bool,
    pub kind: EntityKind,
    pub collides_with: EntityKind,
    pub colliding: bool,
}

impl Entity {
    /// a dead entity of the given kind, sized after its sprite
    pub fn new(kind: EntityKind, size: V2) -> Entity {
        Entity {
            position: P2::origin(),
            size,
            velocity: V2::zeros(),
            speed: 0.0,
            anchor: P2::origin(),
            alive: false,
            kind,
            collides_with: kind.collision_target(),
            colliding: false,
        }
    }

    pub fn spawn(&mut self, position: P2, velocity: V2) {
        self.position = position;
        self.anchor = position;
        self.velocity = velocity;
        // enemies patrol with the magnitude of their initial velocity
        self.speed = velocity.norm();
        self.alive = true;
        self.colliding = false;
    }

    /// resets everything but the per kind fields
    pub fn clear(&mut self) {
        self.position = P2::origin();
        self.anchor = P2::origin();
        self.velocity = V2::zeros();
        self.speed = 0.0;
        self.alive = false;
        self.colliding = false;
    }

    pub fn width(&self) -> Float {
        self.size.x
    }

    pub fn height(&self) -> Float {
        self.size.y
    }
}

impl HasAabb for Entity {
    fn get_aabb(&self) -> AABB {
        AABB::new(self.position, self.size.x, self.size.y)
    }
}

impl HasOrigin for Entity {
    fn get_origin(&self) -> P2 {
        self.position
    }
    fn set_origin(&mut self, origin: P2) {
        self.position = origin;
    }
}
