use crate::entity::EntityKind;
use crate::error::{Error, Result};
use crate::geo::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// loaded once at startup from toml
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub playfield: PlayfieldConfig,
    pub quadtree: QuadTreeConfig,
    pub pools: PoolConfig,
    pub sprites: SpriteConfig,
    pub ship: ShipConfig,
    pub enemies: EnemyConfig,
    pub wave: WaveConfig,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: Float,
    pub height: Float,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        PlayfieldConfig {
            width: 600.0,
            height: 360.0,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// objects a node holds before it tries to split
    pub max_objects: usize,
    pub max_levels: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        QuadTreeConfig {
            max_objects: 10,
            max_levels: 5,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub player_bullets: usize,
    pub enemies: usize,
    pub enemy_bullets: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            player_bullets: 30,
            enemies: 30,
            enemy_bullets: 50,
        }
    }
}

/// sprite dimensions, they double as collision boxes
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub ship: V2,
    pub player_bullet: V2,
    pub enemy: V2,
    pub enemy_bullet: V2,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        SpriteConfig {
            ship: V2::new(39.0, 42.0),
            player_bullet: V2::new(5.0, 10.0),
            enemy: V2::new(32.0, 30.0),
            enemy_bullet: V2::new(5.0, 10.0),
        }
    }
}

impl SpriteConfig {
    pub fn size_of(&self, kind: EntityKind) -> V2 {
        match kind {
            EntityKind::Ship => self.ship,
            EntityKind::PlayerBullet => self.player_bullet,
            EntityKind::Enemy => self.enemy,
            EntityKind::EnemyBullet => self.enemy_bullet,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// bullet spawn points relative to the ship's top left corner
    pub gun_offsets: [V2; 2],
    /// subtracted from a bullet's position every step
    pub bullet_velocity: V2,
}

impl Default for ShipConfig {
    fn default() -> Self {
        ShipConfig {
            gun_offsets: [V2::new(6.0, 0.0), V2::new(33.0, 0.0)],
            bullet_velocity: V2::new(0.0, 3.0),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub speed: Float,
    /// chance to fire per step
    pub fire_chance: Float,
    pub patrol_half_width: Float,
    pub dive_depth: Float,
    pub patrol_speed: Float,
    pub lift: Float,
    pub bullet_velocity: V2,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            speed: 2.0,
            fire_chance: 0.01,
            patrol_half_width: 90.0,
            dive_depth: 140.0,
            patrol_speed: 1.5,
            lift: 5.0,
            bullet_velocity: V2::new(0.0, -2.5),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub count: usize,
    pub per_row: usize,
    pub start_x: Float,
    pub gap: Float,
    /// distance between rows in enemy heights, rows stack upwards
    pub row_spacing: Float,
}

impl Default for WaveConfig {
    fn default() -> Self {
        WaveConfig {
            count: 18,
            per_row: 6,
            start_x: 100.0,
            gap: 25.0,
            row_spacing: 1.5,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<GameConfig> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<GameConfig> {
        let contents = std::fs::read_to_string(path)?;
        GameConfig::from_toml_str(&contents)
    }

    pub fn playfield_bounds(&self) -> AABB {
        AABB::from_xywh(0.0, 0.0, self.playfield.width, self.playfield.height)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.playfield_bounds().is_valid()
            || self.playfield.width <= 0.0
            || self.playfield.height <= 0.0
        {
            return Err(invalid(format!(
                "playfield must have a positive size, got {}x{}",
                self.playfield.width, self.playfield.height
            )));
        }
        if self.quadtree.max_objects == 0 {
            return Err(invalid("quadtree.max_objects must be at least 1"));
        }
        for kind in EntityKind::ALL.iter() {
            let size = self.sprites.size_of(*kind);
            if !(size.x > 0.0 && size.y > 0.0 && size.x.is_finite() && size.y.is_finite()) {
                return Err(invalid(format!(
                    "sprite size of {:?} must be positive, got {}x{}",
                    kind, size.x, size.y
                )));
            }
        }
        if !between(self.enemies.fire_chance, 0.0, 1.0) {
            return Err(invalid(format!(
                "enemies.fire_chance must lie in [0, 1], got {}",
                self.enemies.fire_chance
            )));
        }
        let enemies = &self.enemies;
        finite("enemies.speed", enemies.speed)?;
        finite("enemies.patrol_half_width", enemies.patrol_half_width)?;
        finite("enemies.dive_depth", enemies.dive_depth)?;
        finite("enemies.patrol_speed", enemies.patrol_speed)?;
        finite("enemies.lift", enemies.lift)?;
        finite_vector("enemies.bullet_velocity", enemies.bullet_velocity)?;
        finite_vector("ship.gun_offsets[0]", self.ship.gun_offsets[0])?;
        finite_vector("ship.gun_offsets[1]", self.ship.gun_offsets[1])?;
        finite_vector("ship.bullet_velocity", self.ship.bullet_velocity)?;
        finite("wave.start_x", self.wave.start_x)?;
        finite("wave.gap", self.wave.gap)?;
        finite("wave.row_spacing", self.wave.row_spacing)?;
        if self.wave.per_row == 0 {
            return Err(invalid("wave.per_row must be at least 1"));
        }
        if self.wave.count > self.pools.enemies {
            log::warn!(
                "wave of {} enemies does not fit a pool of {}, the rest is dropped",
                self.wave.count,
                self.pools.enemies
            );
        }
        Ok(())
    }
}

/// anything that moves an entity has to be finite or its box turns malformed
fn finite(name: &str, value: Float) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{} must be finite, got {}", name, value)))
    }
}

fn finite_vector(name: &str, value: V2) -> Result<()> {
    if value.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(invalid(format!("{} must be finite, got {:?}", name, value)))
    }
}

fn invalid<S: Into<String>>(msg: S) -> Error {
    Error::InvalidConfig(msg.into())
}
