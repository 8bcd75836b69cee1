//! Game session
//!
//! One session owns the physics world and the player and advances both once
//! per frame from an [`InputFrame`]:
//! 1. Clamp the frame delta and record it for the FPS readout
//! 2. Tick the shot cooldown
//! 3. Apply mouse look and pressed actions
//! 4. Move the player
//! 5. Step the physics world

use tumble_core::time::{clamp_step, Cooldown, FrameCounter};
use tumble_physics::{BodyId, PhysicsWorld, StepStats};

use crate::config::{ConfigResult, GameConfig};
use crate::hud::HudInfo;
use crate::input::{Actions, InputFrame};
use crate::player::PlayerController;
use crate::spawner::Spawner;

/// Running sandbox
pub struct Session {
    config: GameConfig,
    world: PhysicsWorld,
    player: PlayerController,
    spawner: Spawner,
    shoot_cooldown: Cooldown,
    frames: FrameCounter,
    running: bool,
    elapsed: f32,
}

impl Session {
    /// Validate `config` and start a session whose crates follow `seed`
    pub fn new(config: GameConfig, seed: u64) -> ConfigResult<Self> {
        config.validate()?;
        log::info!("Starting session (seed {})", seed);

        Ok(Self {
            world: PhysicsWorld::new(config.physics.clone()),
            player: PlayerController::new(&config),
            spawner: Spawner::new(&config, seed),
            shoot_cooldown: Cooldown::new(config.gameplay.shoot_cooldown),
            frames: FrameCounter::new(config.gameplay.fps_sample_size),
            running: true,
            elapsed: 0.0,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Simulated seconds since start or the last reset
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance one frame. Does nothing once the session has quit.
    pub fn update(&mut self, dt: f32, input: &InputFrame) {
        if !self.running {
            return;
        }

        let dt = clamp_step(dt, self.config.physics.max_dt);
        self.frames.tick(dt);
        self.shoot_cooldown.tick(dt);

        self.player.look(input.mouse_delta);
        self.handle_pressed(input.pressed);

        self.player.update(dt, input.held);
        self.world.step(dt);
        self.elapsed += dt;
    }

    fn handle_pressed(&mut self, pressed: Actions) {
        if pressed.contains(Actions::QUIT) {
            log::info!("Quit requested");
            self.running = false;
        }
        if pressed.contains(Actions::RESET) {
            self.reset();
        }
        if pressed.contains(Actions::SHOOT) {
            self.shoot();
        }
        if pressed.contains(Actions::SPAWN_CRATE) {
            self.spawn_crate();
        }
    }

    /// Fire a sphere along the view if the cooldown allows
    pub fn shoot(&mut self) -> Option<BodyId> {
        if !self.shoot_cooldown.is_ready() {
            return None;
        }
        let request = self.spawner.sphere(self.player.shoot_sphere());
        let id = self.world.spawn(request).ok()?;
        self.shoot_cooldown.trigger();
        Some(id)
    }

    /// Drop a random crate at the crosshair
    pub fn spawn_crate(&mut self) -> Option<BodyId> {
        let target = self.player.crosshair_target(self.spawner.crate_distance());
        let request = self.spawner.crate_at(target);
        self.world.spawn(request).ok()
    }

    /// Clear the world and return the player to the start
    pub fn reset(&mut self) {
        log::info!("Resetting scene ({} objects)", self.world.len());
        self.world.reset();
        self.player.reset();
        self.shoot_cooldown.reset();
        self.elapsed = 0.0;
    }

    /// Statistics from the last physics step
    pub fn last_step(&self) -> &StepStats {
        self.world.last_step()
    }

    /// Current overlay readouts
    pub fn hud(&self) -> HudInfo {
        HudInfo {
            fps: self.frames.fps(),
            object_count: self.world.len(),
            player_position: self.player.position(),
        }
    }
}
