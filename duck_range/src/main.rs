//! Duck range demo application
//!
//! Headless driver for the hunt engine: spawns a round of ducks, fires the
//! gun on a timer at whichever duck is nearest to the crosshair, and logs
//! what happened. Usage:
//!
//! ```text
//! duck_range [config.toml|config.ron] [frames] [seed]
//! ```

use hunt_engine::assets::ResourceCache;
use hunt_engine::config::SimulationConfig;
use hunt_engine::ecs::components::{EntityTags, HealthComponent, TagComponent, TransformComponent};
use hunt_engine::ecs::{Entity, SceneManager};
use hunt_engine::foundation::math::Vec3;
use hunt_engine::game::factories::names;
use hunt_engine::game::{aim_gun, spawn_duck, spawn_gun, DuckParams, RoundStatus, RoundTracker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

const FRAME_TIME: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 1800;
const DEFAULT_SEED: u64 = 7;
/// Frames between two shots
const FIRE_INTERVAL: u64 = 45;
/// Frames between two duck launches
const LAUNCH_INTERVAL: u64 = 30;

pub struct DuckRangeApp {
    scene: SceneManager,
    tracker: Rc<RefCell<RoundTracker>>,
    resources: Arc<ResourceCache>,
    gun: Entity,
    rng: StdRng,
    launched: u32,
    rounds_played: u32,
}

impl DuckRangeApp {
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, Box<dyn std::error::Error>> {
        log::info!("Creating duck range (seed {seed})...");

        let mut cache = ResourceCache::new();
        cache.insert_mesh(names::DUCK, 812);
        cache.insert_material(names::DUCK, [0.35, 0.55, 0.2, 1.0]);
        cache.insert_mesh(names::DUCK_DOWNED, 812);
        cache.insert_material(names::DUCK_DOWNED, [0.4, 0.4, 0.4, 1.0]);
        cache.insert_mesh(names::GUN, 240);
        cache.insert_material(names::GUN, [0.15, 0.15, 0.15, 1.0]);
        cache.insert_mesh(names::BLOCK, 24);
        let resources = Arc::new(cache);

        let tracker = Rc::new(RefCell::new(RoundTracker::new(config.rules.clone())));
        let mut scene = SceneManager::new(config.clone(), resources.clone());
        scene.register_handler(Box::new(tracker.clone()));

        let gun = spawn_gun(
            scene.world_mut(),
            &config,
            resources.as_ref(),
            Vec3::new(0.0, 1.5, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        )?;
        hunt_engine::game::spawn_environment_block(
            scene.world_mut(),
            resources.as_ref(),
            Vec3::new(0.0, -1.0, -20.0),
            Vec3::new(60.0, 2.0, 40.0),
        )?;

        Ok(Self {
            scene,
            tracker,
            resources,
            gun,
            rng: StdRng::seed_from_u64(seed),
            launched: 0,
            rounds_played: 1,
        })
    }

    fn launch_duck(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let config = self.scene.config().clone();
        let side = if self.rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        let position = Vec3::new(
            -side * 12.0,
            self.rng.gen_range(2.0..6.0),
            self.rng.gen_range(-25.0..-10.0),
        );
        let direction = Vec3::new(side, self.rng.gen_range(0.1..0.5), 0.0);
        let speed = self.rng.gen_range(3.0..7.0);

        let mut params = DuckParams::new(position, direction, speed, &config);
        if self.rng.gen_ratio(1, 8) {
            params = params.as_decoy();
        }
        let duck = spawn_duck(self.scene.world_mut(), &config, self.resources.as_ref(), &params)?;
        self.launched += 1;
        log::info!(
            "Launched {}{duck} at ({:.1}, {:.1}, {:.1})",
            if params.decoy { "decoy " } else { "" },
            position.x,
            position.y,
            position.z
        );
        Ok(())
    }

    /// Nearest live, scoring duck to the gun
    fn pick_target(&self) -> Option<Vec3> {
        let world = self.scene.world();
        let gun_position = world.get_component::<TransformComponent>(self.gun)?.position;

        world
            .entities_with::<(TransformComponent, HealthComponent, TagComponent)>()
            .into_iter()
            .filter(|&e| {
                world.get_component::<HealthComponent>(e).is_some_and(HealthComponent::is_alive)
                    && world
                        .get_component::<TagComponent>(e)
                        .is_some_and(|t| !t.has(EntityTags::DECOY))
            })
            .filter_map(|e| world.get_component::<TransformComponent>(e))
            .map(|t| t.position - gun_position)
            .min_by(|a, b| a.norm().total_cmp(&b.norm()))
    }

    fn fire(&mut self) {
        if let Some(aim) = self.pick_target() {
            aim_gun(self.scene.world_mut(), self.gun, aim);
        }
        self.scene.request_fire(self.gun);
    }

    fn start_next_round(&mut self) {
        let status = self.tracker.borrow().status();
        if status == RoundStatus::InProgress {
            return;
        }
        let ducks_left = self
            .scene
            .world()
            .entities_with::<(HealthComponent,)>()
            .len();
        if ducks_left > 0 {
            return;
        }

        log::info!(
            "Round {} {:?}: score {}",
            self.tracker.borrow().round(),
            status,
            self.tracker.borrow().score()
        );
        self.tracker.borrow_mut().next_round();
        self.launched = 0;
        self.rounds_played += 1;
    }

    pub fn run(&mut self, frames: u64) -> Result<(), Box<dyn std::error::Error>> {
        let ducks_per_round = self.scene.config().rules.ducks_per_round;

        for frame in 1..=frames {
            if frame % LAUNCH_INTERVAL == 0 && self.launched < ducks_per_round {
                self.launch_duck()?;
            }
            if frame % FIRE_INTERVAL == 0 {
                self.fire();
            }

            let report = self.scene.update(FRAME_TIME);
            for duck in &report.hits {
                log::info!("Frame {}: hit {duck}", report.frame);
            }
            for duck in &report.escapes {
                log::info!("Frame {}: {duck} escaped", report.frame);
            }
            for duck in &report.fell {
                log::debug!("Frame {}: {duck} hit the ground", report.frame);
            }

            self.start_next_round();
        }

        let tracker = self.tracker.borrow();
        log::info!(
            "Finished {} frames ({:.1}s): {} rounds, score {}, status {:?}",
            self.scene.frame_count(),
            self.scene.total_time(),
            self.rounds_played,
            tracker.score(),
            tracker.status()
        );
        log::info!(
            "Render list holds {} items",
            self.scene.render_items().len()
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    hunt_engine::foundation::logging::init();

    log::info!("Starting duck range");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            SimulationConfig::load(&path)?
        }
        None => SimulationConfig::default(),
    };
    let frames = match args.next() {
        Some(value) => value.parse()?,
        None => DEFAULT_FRAMES,
    };
    let seed = match args.next() {
        Some(value) => value.parse()?,
        None => DEFAULT_SEED,
    };

    let mut app = DuckRangeApp::new(config, seed)?;
    let result = app.run(frames);

    match result {
        Ok(()) => {
            log::info!("Duck range completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Duck range failed: {:?}", e);
            Err(e)
        }
    }
}
