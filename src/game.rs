use crate::behavior;
use crate::collision_system::{CollisionSystem, EntitySource};
use crate::config::GameConfig;
use crate::entity::{Entity, EntityKind};
use crate::error::Result;
use crate::geo::*;
use crate::pool::Pool;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// what happened during one frame
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct FrameReport {
    /// colliding pairs found by the collision pass
    pub hits: usize,
    pub enemies_destroyed: usize,
    pub ship_hit: bool,
    /// every enemy was gone so a new wave was sent in
    pub wave_spawned: bool,
}

/// owns the ship, the pools and the collision system.
/// the host moves the ship, fires and draws what is alive after `frame`
pub struct Game {
    config: GameConfig,
    ship: Entity,
    player_bullets: Pool,
    enemies: Pool,
    enemy_bullets: Pool,
    collisions: CollisionSystem,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Game> {
        config.validate()?;
        let pool = |kind, capacity| Pool::new(kind, capacity, config.sprites.size_of(kind));
        let mut game = Game {
            ship: Entity::new(EntityKind::Ship, config.sprites.size_of(EntityKind::Ship)),
            player_bullets: pool(EntityKind::PlayerBullet, config.pools.player_bullets),
            enemies: pool(EntityKind::Enemy, config.pools.enemies),
            enemy_bullets: pool(EntityKind::EnemyBullet, config.pools.enemy_bullets),
            collisions: CollisionSystem::with_config(config.playfield_bounds(), &config.quadtree),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        };
        game.restart();
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// puts the ship back to its start, kills everything else and sends in a fresh wave
    pub fn restart(&mut self) {
        self.collisions.set_bounding_rect(self.config.playfield_bounds());
        self.player_bullets.init();
        self.enemies.init();
        self.enemy_bullets.init();

        let start = self.ship_start();
        self.ship.spawn(start, V2::zeros());

        let spawned = self.spawn_wave();
        log::debug!("game restarted, ship at {:?}, {} enemies", start, spawned);
    }

    /// bottom middle of the playfield
    pub fn ship_start(&self) -> P2 {
        let playfield = &self.config.playfield;
        let size = self.config.sprites.ship;
        self.clamp_to_ship_zone(P2::new(
            playfield.width * 0.5 - size.x,
            playfield.height * 0.75 + size.y * 2.0,
        ))
    }

    /// the ship stays inside the lowest quarter of the playfield
    fn clamp_to_ship_zone(&self, position: P2) -> P2 {
        let playfield = &self.config.playfield;
        let size = self.ship.size;
        let max_x = (playfield.width - size.x).max(0.0);
        let max_y = (playfield.height - size.y).max(0.0);
        let min_y = (playfield.height * 0.75).min(max_y);
        P2::new(position.x.max(0.0).min(max_x), position.y.max(min_y).min(max_y))
    }

    pub fn move_ship_to(&mut self, position: P2) {
        let clamped = self.clamp_to_ship_zone(position);
        self.ship.set_origin(clamped);
    }

    /// rows of enemies entering from above the playfield, returns how many fit the pool
    pub fn spawn_wave(&mut self) -> usize {
        let wave = &self.config.wave;
        let size = self.config.sprites.enemy;
        let velocity = V2::new(0.0, self.config.enemies.speed);
        let row_step = -size.y * wave.row_spacing;

        let mut spawned = 0;
        let mut x = wave.start_x;
        let mut y = -size.y;
        for i in 1..=wave.count {
            if self.enemies.spawn(P2::new(x, y), velocity) {
                spawned += 1;
            }
            x += size.x + wave.gap;
            if i % wave.per_row == 0 {
                x = wave.start_x;
                y += row_step;
            }
        }
        log::debug!("spawned a wave of {} enemies", spawned);
        spawned
    }

    /// both guns fire or none. false if the ship is down or out of bullets
    pub fn fire(&mut self) -> bool {
        if !self.ship.alive || self.ship.colliding {
            return false;
        }
        let ship = self.ship.position;
        let velocity = self.config.ship.bullet_velocity;
        let [left, right] = self.config.ship.gun_offsets;
        self.player_bullets
            .spawn_pair((ship + left, velocity), (ship + right, velocity))
    }

    /// collision pass followed by one step of every pool
    pub fn frame(&mut self) -> FrameReport {
        let mut report = FrameReport::default();

        let mut sources: [&mut dyn EntitySource; 4] = [
            &mut self.ship,
            &mut self.player_bullets,
            &mut self.enemies,
            &mut self.enemy_bullets,
        ];
        report.hits = self.collisions.update(&mut sources);

        if self.enemies.alive_count() == 0 {
            report.wave_spawned = self.spawn_wave() > 0;
        }

        if self.ship.colliding {
            report.ship_hit = true;
            self.ship.colliding = false;
        }

        let playfield = self.collisions.bounding_rect();
        let Game {
            config,
            player_bullets,
            enemies,
            enemy_bullets,
            rng,
            ..
        } = self;

        let enemy_config = &config.enemies;
        player_bullets.step(|bullet| {
            behavior::advance(bullet, &playfield, enemy_config, &mut *rng).0
        });

        let mut destroyed = 0;
        enemies.step(|enemy| {
            let (gone, fired_from) =
                behavior::advance(enemy, &playfield, enemy_config, &mut *rng);
            if let Some(muzzle) = fired_from {
                enemy_bullets.spawn(muzzle, enemy_config.bullet_velocity);
            }
            if gone {
                destroyed += 1;
            }
            gone
        });
        report.enemies_destroyed = destroyed;

        enemy_bullets.step(|bullet| {
            behavior::advance(bullet, &playfield, enemy_config, &mut *rng).0
        });

        report
    }

    pub fn ship(&self) -> &Entity {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Entity {
        &mut self.ship
    }

    pub fn player_bullets(&self) -> &Pool {
        &self.player_bullets
    }

    pub fn player_bullets_mut(&mut self) -> &mut Pool {
        &mut self.player_bullets
    }

    pub fn enemies(&self) -> &Pool {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Pool {
        &mut self.enemies
    }

    pub fn enemy_bullets(&self) -> &Pool {
        &self.enemy_bullets
    }

    pub fn enemy_bullets_mut(&mut self) -> &mut Pool {
        &mut self.enemy_bullets
    }

    pub fn collisions(&self) -> &CollisionSystem {
        &self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peaceful() -> Game {
        let mut config = GameConfig::default();
        config.enemies.fire_chance = 0.0;
        Game::new(config).unwrap()
    }

    #[test]
    fn new_game_sends_in_a_wave() {
        let game = peaceful();
        assert!(game.ship().alive);
        assert_eq!(game.enemies().alive_count(), 18);
        assert_eq!(game.enemies().capacity(), 30);
        assert_eq!(game.player_bullets().capacity(), 30);
        assert_eq!(game.enemy_bullets().capacity(), 50);
        assert_eq!(game.player_bullets().alive_count(), 0);

        // three rows of six, stacked upwards from just above the playfield
        let mut ys: Vec<Float> = game.enemies().iter_alive().map(|e| e.position.y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ys.dedup();
        assert_eq!(ys, vec![-120.0, -75.0, -30.0]);
        assert!(game
            .enemies()
            .iter_alive()
            .any(|e| e.position == P2::new(100.0, -30.0)));
        assert!(game
            .enemies()
            .iter_alive()
            .any(|e| e.position == P2::new(385.0, -30.0)));
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut config = GameConfig::default();
        config.playfield.height = -1.0;
        assert!(Game::new(config).is_err());

        let mut config = GameConfig::default();
        config.enemies.speed = Float::NAN;
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn firing_spawns_pairs_until_the_pool_runs_dry() {
        let mut game = peaceful();
        let ship = game.ship().position;
        assert!(game.fire());
        assert_eq!(game.player_bullets().alive_count(), 2);
        let mut xs: Vec<Float> = game
            .player_bullets()
            .iter_alive()
            .map(|b| b.position.x - ship.x)
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![6.0, 33.0]);

        for _ in 0..14 {
            assert!(game.fire());
        }
        assert_eq!(game.player_bullets().alive_count(), 30);
        assert!(!game.fire());
        assert_eq!(game.player_bullets().alive_count(), 30);
    }

    #[test]
    fn downed_ship_cannot_fire() {
        let mut game = peaceful();
        game.ship_mut().alive = false;
        assert!(!game.fire());
        assert_eq!(game.player_bullets().alive_count(), 0);
    }

    #[test]
    fn bullet_destroys_enemy() {
        let mut game = peaceful();
        assert!(game
            .player_bullets_mut()
            .spawn(P2::new(110.0, -20.0), V2::new(0.0, 3.0)));

        let report = game.frame();
        assert_eq!(report.hits, 1);
        assert_eq!(report.enemies_destroyed, 1);
        assert!(!report.ship_hit);
        assert_eq!(game.enemies().alive_count(), 17);
        assert_eq!(game.player_bullets().alive_count(), 0);
        assert!(game.enemies().is_partitioned());
        assert!(game.enemies().slots().iter().all(|e| e.alive || !e.colliding));
    }

    #[test]
    fn enemy_bullet_hits_the_ship() {
        let mut game = peaceful();
        let ship = game.ship().position;
        assert!(game
            .enemy_bullets_mut()
            .spawn(ship + V2::new(10.0, 10.0), V2::new(0.0, -2.5)));

        let report = game.frame();
        assert!(report.ship_hit);
        assert!(!game.ship().colliding);
        assert_eq!(game.enemy_bullets().alive_count(), 0);
    }

    #[test]
    fn empty_sky_brings_a_new_wave() {
        let mut game = peaceful();
        game.enemies_mut().init();
        let report = game.frame();
        assert!(report.wave_spawned);
        assert_eq!(game.enemies().alive_count(), 18);
    }

    #[test]
    fn ship_stays_in_its_zone() {
        let mut game = peaceful();
        game.move_ship_to(P2::new(-50.0, 0.0));
        assert_eq!(game.ship().position, P2::new(0.0, 270.0));
        game.move_ship_to(P2::new(1000.0, 1000.0));
        assert_eq!(game.ship().position, P2::new(561.0, 318.0));
        assert_eq!(game.ship_start(), P2::new(261.0, 318.0));
    }

    #[test]
    fn restart_resets_everything() {
        let mut game = peaceful();
        game.fire();
        game.move_ship_to(P2::new(0.0, 0.0));
        game.enemies_mut().init();
        game.restart();
        assert_eq!(game.player_bullets().alive_count(), 0);
        assert_eq!(game.enemies().alive_count(), 18);
        assert_eq!(game.ship().position, game.ship_start());
        assert!(game.ship().alive);
    }

    #[test]
    fn long_run_keeps_the_pools_in_shape() {
        let mut config = GameConfig::default();
        config.seed = 42;
        config.enemies.fire_chance = 0.05;
        let mut game = Game::new(config).unwrap();

        let mut destroyed = 0;
        for frame in 0..2000 {
            if frame % 15 == 0 {
                game.fire();
            }
            let x = 300.0 + 200.0 * ((frame as Float) * 0.01).sin();
            game.move_ship_to(P2::new(x, 300.0));

            let report = game.frame();
            destroyed += report.enemies_destroyed;
            if report.ship_hit {
                game.restart();
            }

            for pool in [game.player_bullets(), game.enemies(), game.enemy_bullets()].iter() {
                assert!(pool.is_partitioned());
                assert!(pool.alive_count() <= pool.capacity());
                assert!(pool.slots()[pool.alive_count()..].iter().all(|e| !e.colliding));
            }
            assert!(game.collisions().tree().len() <= 1 + 30 + 30 + 50);
        }
        assert!(destroyed > 0);
    }
}
