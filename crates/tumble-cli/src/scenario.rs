//! Headless scenarios
//!
//! `run` drives a full session with scripted input, `drop` measures a single
//! bounce. Both only log; the caller decides what to print.

use anyhow::{bail, Result};
use glam::{Vec2, Vec3};
use serde::Serialize;
use tumble_game::{GameConfig, HudInfo, InputFrame, Session};
use tumble_physics::{PhysicsConfig, PhysicsWorld, SpawnRequest};

/// Settings for a scripted session
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub seconds: f32,
    pub fps: u32,
    pub spheres: usize,
    pub crates: usize,
    pub seed: u64,
    /// Seconds between HUD log lines
    pub report_interval: f32,
}

/// Totals from a scripted session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub frames: u64,
    pub seed: u64,
    pub spheres_fired: usize,
    pub crates_spawned: usize,
    pub contacts: usize,
    pub expired: usize,
    pub out_of_bounds: usize,
    pub corrupted: usize,
    pub evicted: usize,
    pub hud: HudInfo,
}

/// Play a session for `options.seconds`, firing spheres and tossing crates
/// evenly over the first half while the view slowly pans.
pub fn run_session(config: &GameConfig, options: &RunOptions) -> Result<RunReport> {
    if options.fps == 0 {
        bail!("fps must be at least 1");
    }
    if !(options.seconds > 0.0 && options.seconds.is_finite()) {
        bail!("seconds must be positive, got {}", options.seconds);
    }

    let dt = 1.0 / options.fps as f32;
    let frames = (options.seconds * options.fps as f32).ceil() as u64;
    let spawn_window = (frames / 2).max(1);
    let report_every = ((options.report_interval * options.fps as f32).round() as u64).max(1);

    let mut session = Session::new(config.clone(), options.seed)?;
    let mut report = RunReport {
        frames,
        seed: options.seed,
        spheres_fired: 0,
        crates_spawned: 0,
        contacts: 0,
        expired: 0,
        out_of_bounds: 0,
        corrupted: 0,
        evicted: 0,
        hud: session.hud(),
    };

    // Tilt the view toward the ground once, then pan
    let mut input = InputFrame::new().with_mouse_delta(Vec2::new(0.0, 60.0));
    for frame in 0..frames {
        let due = |total: usize| ((total as u64 * (frame + 1)) / spawn_window).min(total as u64) as usize;

        if report.spheres_fired < due(options.spheres) && session.shoot().is_some() {
            report.spheres_fired += 1;
        }
        if report.crates_spawned < due(options.crates) && session.spawn_crate().is_some() {
            report.crates_spawned += 1;
        }

        session.update(dt, &input);
        input = InputFrame::new().with_mouse_delta(Vec2::new(2.0, 0.0));

        let stats = *session.last_step();
        report.contacts += stats.collisions();
        report.expired += stats.expired;
        report.out_of_bounds += stats.out_of_bounds;
        report.corrupted += stats.corrupted;
        report.evicted += stats.evicted;

        if (frame + 1) % report_every == 0 {
            log::info!("t={:.1}s {}", (frame + 1) as f32 * dt, session.hud());
        }
    }

    report.hud = session.hud();
    Ok(report)
}

/// Settings for the single-sphere drop
#[derive(Debug, Clone, PartialEq)]
pub struct DropOptions {
    /// Center height above the ground
    pub height: f32,
    /// Overrides the configured restitution
    pub restitution: Option<f32>,
    pub radius: f32,
    pub mass: f32,
    /// Give up after this much simulated time
    pub max_seconds: f32,
}

impl Default for DropOptions {
    fn default() -> Self {
        Self {
            height: 10.0,
            restitution: None,
            radius: 0.5,
            mass: 1.0,
            max_seconds: 30.0,
        }
    }
}

/// Measurements from a drop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropReport {
    pub restitution: f32,
    /// Downward speed at the first ground contact
    pub impact_speed: f32,
    /// Upward speed right after it
    pub rebound_speed: f32,
    pub ratio: f32,
    pub first_contact_time: f32,
    /// When the sphere came to rest, if it did in time
    pub settle_time: Option<f32>,
}

/// Drop one sphere onto the ground at 60 Hz and measure the first bounce
pub fn drop_sphere(physics: &PhysicsConfig, options: &DropOptions) -> Result<DropReport> {
    const DT: f32 = 1.0 / 60.0;

    let mut config = physics.clone();
    if let Some(restitution) = options.restitution {
        config.restitution = restitution;
    }
    if options.height <= options.radius {
        bail!("drop height {} must exceed the radius {}", options.height, options.radius);
    }

    let restitution = config.restitution;
    let gravity = config.gravity;
    let start = Vec3::new(0.0, config.ground_height + options.height, 0.0);
    let mut world = PhysicsWorld::try_new(config)?;
    let request = SpawnRequest::sphere(start, options.radius, options.mass).with_lifetime(options.max_seconds + 1.0);
    let id = world.spawn(request)?;

    let mut first_contact = None;
    let mut settle_time = None;
    let max_steps = (options.max_seconds / DT).ceil() as u64;
    for step in 1..=max_steps {
        let Some(before) = world.get(id).map(|body| body.velocity.y) else {
            bail!("sphere left the world");
        };
        world.step(DT);
        let Some(body) = world.get(id) else {
            bail!("sphere left the world");
        };
        let time = step as f32 * DT;

        if first_contact.is_none() && body.on_ground() {
            let impact = (before + gravity * DT).abs();
            log::debug!("First contact at {:.3}s, impact {:.3} m/s", time, impact);
            first_contact = Some((time, impact, body.velocity.y));
        }
        if first_contact.is_some() && body.on_ground() && body.velocity.length() < 1e-3 {
            settle_time = Some(time);
            break;
        }
    }

    let Some((first_contact_time, impact_speed, rebound_speed)) = first_contact else {
        bail!("sphere never reached the ground within {}s", options.max_seconds);
    };

    Ok(DropReport {
        restitution,
        impact_speed,
        rebound_speed,
        ratio: if impact_speed > 0.0 { rebound_speed / impact_speed } else { 0.0 },
        first_contact_time,
        settle_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_options() -> RunOptions {
        RunOptions {
            seconds: 3.0,
            fps: 60,
            spheres: 5,
            crates: 3,
            seed: 17,
            report_interval: 1.0,
        }
    }

    #[test]
    fn test_run_spawns_everything() {
        let report = run_session(&GameConfig::default(), &run_options()).unwrap();
        assert_eq!(report.frames, 180);
        assert_eq!(report.spheres_fired, 5);
        assert_eq!(report.crates_spawned, 3);
        assert_eq!(report.hud.object_count, 8);
        assert!(report.contacts > 0);
        assert_eq!(report.corrupted, 0);
    }

    #[test]
    fn test_run_is_reproducible() {
        let a = run_session(&GameConfig::default(), &run_options()).unwrap();
        let b = run_session(&GameConfig::default(), &run_options()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_rejects_zero_fps() {
        let options = RunOptions { fps: 0, ..run_options() };
        assert!(run_session(&GameConfig::default(), &options).is_err());
    }

    #[test]
    fn test_drop_ratio_matches_restitution() {
        let options = DropOptions {
            restitution: Some(0.5),
            ..Default::default()
        };
        let report = drop_sphere(&PhysicsConfig::default(), &options).unwrap();

        assert_eq!(report.restitution, 0.5);
        assert!(report.impact_speed > 13.0 && report.impact_speed < 14.0);
        assert!((report.ratio - 0.5).abs() < 1e-3);
        assert!(report.settle_time.is_some());
    }

    #[test]
    fn test_drop_rejects_bad_input() {
        let physics = PhysicsConfig::default();
        let too_low = DropOptions { height: 0.2, ..Default::default() };
        assert!(drop_sphere(&physics, &too_low).is_err());

        let bouncy = DropOptions { restitution: Some(2.0), ..Default::default() };
        assert!(drop_sphere(&physics, &bouncy).is_err());
    }
}
