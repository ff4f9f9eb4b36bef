use crate::config::EnemyConfig;
use crate::entity::{Entity, EntityKind};
use crate::geo::*;

/// what an enemy did during its step
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct EnemyStep {
    /// the enemy was hit and is gone
    pub destroyed: bool,
    /// where the enemy fired a bullet from
    pub fired_from: Option<P2>,
}

/// bullets fly against their velocity and die when hit or off screen
pub fn advance_bullet(bullet: &mut Entity, playfield: &AABB) -> bool {
    bullet.position -= bullet.velocity;

    if bullet.colliding {
        return true;
    }
    match bullet.kind {
        EntityKind::PlayerBullet => bullet.position.y <= playfield.top() - bullet.height(),
        EntityKind::EnemyBullet => bullet.position.y >= playfield.bottom(),
        _ => false,
    }
}

/// enemies drop in, then patrol sideways around their spawn point
pub fn advance_enemy<R: Rng + ?Sized>(
    enemy: &mut Entity,
    config: &EnemyConfig,
    rng: &mut R,
) -> EnemyStep {
    enemy.position += enemy.velocity;

    let left_edge = enemy.anchor.x - config.patrol_half_width;
    let right_edge = enemy.anchor.x + config.patrol_half_width;
    let bottom_edge = enemy.anchor.y + config.dive_depth;

    if enemy.position.x <= left_edge {
        enemy.velocity.x = enemy.speed;
    } else if enemy.position.x >= right_edge + enemy.width() {
        enemy.velocity.x = -enemy.speed;
    } else if enemy.position.y >= bottom_edge {
        enemy.speed = config.patrol_speed;
        enemy.velocity.y = 0.0;
        enemy.position.y -= config.lift;
        enemy.velocity.x = -enemy.speed;
    }

    if enemy.colliding {
        return EnemyStep {
            destroyed: true,
            fired_from: None,
        };
    }

    let fired_from = if rng.gen::<Float>() < config.fire_chance {
        Some(P2::new(
            enemy.position.x + enemy.width() * 0.5,
            enemy.position.y + enemy.height(),
        ))
    } else {
        None
    };
    EnemyStep {
        destroyed: false,
        fired_from,
    }
}

/// dispatches on the entity's kind. the ship is moved by the host,
/// it only ends its life by being hit
pub fn advance<R: Rng + ?Sized>(
    entity: &mut Entity,
    playfield: &AABB,
    enemies: &EnemyConfig,
    rng: &mut R,
) -> (bool, Option<P2>) {
    match entity.kind {
        EntityKind::PlayerBullet | EntityKind::EnemyBullet => {
            (advance_bullet(entity, playfield), None)
        }
        EntityKind::Enemy => {
            let step = advance_enemy(entity, enemies, rng);
            (step.destroyed, step.fired_from)
        }
        EntityKind::Ship => (entity.colliding, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playfield() -> AABB {
        AABB::from_xywh(0.0, 0.0, 600.0, 360.0)
    }

    fn spawned(kind: EntityKind, position: P2, velocity: V2) -> Entity {
        let mut e = Entity::new(kind, V2::new(10.0, 10.0));
        e.spawn(position, velocity);
        e
    }

    fn calm() -> EnemyConfig {
        EnemyConfig {
            fire_chance: 0.0,
            ..EnemyConfig::default()
        }
    }

    #[test]
    fn player_bullet_leaves_through_the_top() {
        let mut bullet = spawned(EntityKind::PlayerBullet, P2::new(50.0, 2.0), V2::new(0.0, 3.0));
        assert!(!advance_bullet(&mut bullet, &playfield()));
        assert_eq!(bullet.position, P2::new(50.0, -1.0));
        let mut steps = 1;
        while !advance_bullet(&mut bullet, &playfield()) {
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert!(bullet.position.y <= -10.0);
    }

    #[test]
    fn enemy_bullet_leaves_through_the_bottom() {
        let mut bullet = spawned(EntityKind::EnemyBullet, P2::new(50.0, 355.0), V2::new(0.0, -2.5));
        assert!(!advance_bullet(&mut bullet, &playfield()));
        assert!(advance_bullet(&mut bullet, &playfield()));
    }

    #[test]
    fn hit_bullet_dies() {
        let mut bullet = spawned(EntityKind::EnemyBullet, P2::new(50.0, 50.0), V2::new(0.0, -2.5));
        bullet.colliding = true;
        assert!(advance_bullet(&mut bullet, &playfield()));
    }

    #[test]
    fn enemy_dives_then_patrols() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = calm();
        let mut enemy = spawned(EntityKind::Enemy, P2::new(200.0, -30.0), V2::new(0.0, 2.0));
        let mut steps = 0;
        while enemy.velocity.y > 0.0 {
            let step = advance_enemy(&mut enemy, &config, &mut rng);
            assert!(!step.destroyed);
            assert_eq!(step.fired_from, None);
            steps += 1;
        }
        assert_eq!(steps, 70);
        assert_eq!(enemy.speed, 1.5);
        assert_eq!(enemy.velocity, V2::new(-1.5, 0.0));
        assert_eq!(enemy.position.y, 105.0);

        // swings between the patrol edges from now on
        let mut min_x = enemy.position.x;
        let mut max_x = enemy.position.x;
        for _ in 0..1000 {
            advance_enemy(&mut enemy, &config, &mut rng);
            min_x = min_x.min(enemy.position.x);
            max_x = max_x.max(enemy.position.x);
        }
        assert!(min_x >= 200.0 - 90.0 - 1.5);
        assert!(max_x <= 200.0 + 90.0 + 10.0 + 1.5);
        assert_eq!(enemy.position.y, 105.0);
    }

    #[test]
    fn hit_enemy_is_destroyed() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut enemy = spawned(EntityKind::Enemy, P2::new(200.0, 10.0), V2::new(0.0, 2.0));
        enemy.colliding = true;
        let always = EnemyConfig {
            fire_chance: 1.0,
            ..EnemyConfig::default()
        };
        let step = advance_enemy(&mut enemy, &always, &mut rng);
        assert!(step.destroyed);
        assert_eq!(step.fired_from, None);
    }

    #[test]
    fn trigger_happy_enemy_fires_from_its_belly() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut enemy = spawned(EntityKind::Enemy, P2::new(200.0, 10.0), V2::new(0.0, 2.0));
        let always = EnemyConfig {
            fire_chance: 1.0,
            ..EnemyConfig::default()
        };
        let step = advance_enemy(&mut enemy, &always, &mut rng);
        assert_eq!(step.fired_from, Some(P2::new(205.0, 22.0)));
    }

    #[test]
    fn dispatch_by_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = calm();
        let mut ship = spawned(EntityKind::Ship, P2::new(0.0, 0.0), V2::zeros());
        assert_eq!(advance(&mut ship, &playfield(), &config, &mut rng), (false, None));
        ship.colliding = true;
        assert_eq!(advance(&mut ship, &playfield(), &config, &mut rng), (true, None));

        let mut bullet = spawned(EntityKind::PlayerBullet, P2::new(5.0, 0.0), V2::new(0.0, 3.0));
        assert_eq!(advance(&mut bullet, &playfield(), &config, &mut rng), (false, None));
    }
}
