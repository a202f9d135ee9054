//! Gravity particles for the shatter burst.
//!
//! `ParticleSystem` is pure state (emit + step) so it runs under native tests;
//! `render` projects it onto a 2D canvas and holds nothing of its own.

use web_sys::CanvasRenderingContext2d;

use crate::config::ParticleConfig;
use crate::rng::GameRng;

/// Life at or below this counts as expired. Covers the rounding that
/// `ceil(1 / decay)` repeated subtractions can accumulate, and nothing more.
fn life_epsilon(decay: f64) -> f64 {
    if decay <= 0.0 {
        return 0.0;
    }
    4.0 * f64::EPSILON * (1.0 / decay).ceil().max(1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Point,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub hue: f64,
    pub life: f64, // 1.0 at birth, drives alpha
}

impl Particle {
    pub fn color(&self) -> String {
        format!("hsl({:.0}, 80%, 60%)", self.hue)
    }
}

pub struct ParticleSystem {
    cfg: ParticleConfig,
    particles: Vec<Particle>,
    expired_at: f64,
}

impl ParticleSystem {
    pub fn new(cfg: ParticleConfig) -> Self {
        let expired_at = life_epsilon(cfg.decay);
        Self { cfg, particles: Vec::new(), expired_at }
    }

    pub fn emit(&mut self, origin: Point, count: usize, rng: &mut GameRng) {
        self.particles.reserve(count);
        for _ in 0..count {
            let speed = rng.range(self.cfg.min_speed, self.cfg.max_speed);
            let dir = rng.angle();
            self.particles.push(Particle {
                pos: origin,
                vx: dir.cos() * speed,
                vy: dir.sin() * speed,
                radius: rng.range(self.cfg.min_radius, self.cfg.max_radius),
                hue: rng.hue(),
                life: 1.0,
            });
        }
    }

    /// Advance one frame. Returns true while any particle is still alive.
    pub fn step(&mut self) -> bool {
        let (gravity, decay, expired_at) = (self.cfg.gravity, self.cfg.decay, self.expired_at);
        self.particles.retain_mut(|p| {
            p.pos.x += p.vx;
            p.pos.y += p.vy;
            p.vy += gravity;
            p.life -= decay;
            p.life > expired_at
        });
        !self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn steps_to_expire(&self) -> usize {
        steps_to_expire(self.cfg.decay)
    }
}

/// Frames a freshly emitted particle survives: `ceil(1 / decay)`.
///
/// Uses the same threshold as [`ParticleSystem::step`], so the two agree.
pub fn steps_to_expire(decay: f64) -> usize {
    if decay <= 0.0 {
        return usize::MAX;
    }
    ((1.0 - life_epsilon(decay)) / decay).ceil() as usize
}

/// Clear the surface and draw every live particle at alpha = life.
pub fn render(ctx: &CanvasRenderingContext2d, width: f64, height: f64, particles: &[Particle]) {
    ctx.clear_rect(0.0, 0.0, width, height);
    for p in particles {
        ctx.set_global_alpha(p.life.clamp(0.0, 1.0));
        ctx.set_fill_style_str(&p.color());
        ctx.begin_path();
        if ctx
            .arc(p.pos.x, p.pos.y, p.radius, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            ctx.fill();
        }
    }
    ctx.set_global_alpha(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> ParticleSystem {
        ParticleSystem::new(ParticleConfig::default())
    }

    #[test]
    fn emit_sets_full_life_at_origin() {
        let mut ps = system();
        let mut rng = GameRng::seeded(3);
        ps.emit(Point::new(200.0, 200.0), 40, &mut rng);
        assert_eq!(ps.len(), 40);
        for p in ps.particles() {
            assert_eq!(p.life, 1.0);
            assert_eq!(p.pos, Point::new(200.0, 200.0));
            assert!((5.0..15.0).contains(&p.radius));
            let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
            assert!(speed >= 1.0 - 1e-9 && speed < 7.5 + 1e-9);
        }
    }

    #[test]
    fn step_applies_velocity_then_gravity() {
        let mut ps = system();
        ps.particles.push(Particle {
            pos: Point::new(0.0, 0.0),
            vx: 1.0,
            vy: -2.0,
            radius: 5.0,
            hue: 0.0,
            life: 1.0,
        });
        assert!(ps.step());
        let p = &ps.particles()[0];
        assert_eq!(p.pos, Point::new(1.0, -2.0));
        assert!((p.vy - (-1.8)).abs() < 1e-12);
        assert!((p.life - 0.98).abs() < 1e-12);
    }

    #[test]
    fn batch_expires_after_fifty_steps() {
        let mut ps = system();
        let mut rng = GameRng::seeded(11);
        ps.emit(Point::new(0.0, 0.0), 10, &mut rng);
        assert_eq!(ps.steps_to_expire(), 50);
        for _ in 0..49 {
            assert!(ps.step());
        }
        assert!(!ps.step());
        assert!(ps.is_idle());
    }

    #[test]
    fn decay_just_below_a_quarter_needs_a_fifth_step() {
        // 1 - 4 * decay leaves 4e-10 of life after the fourth step.
        let decay = 0.25 * (1.0 - 4e-10);
        assert_eq!(steps_to_expire(decay), 5);

        let mut ps = ParticleSystem::new(ParticleConfig { decay, ..ParticleConfig::default() });
        ps.emit(Point::new(0.0, 0.0), 3, &mut GameRng::seeded(2));
        for _ in 0..4 {
            assert!(ps.step());
        }
        assert!(!ps.step());
    }

    #[test]
    fn exact_reciprocal_decays_expire_on_time() {
        for (decay, steps) in [(0.02, 50), (0.25, 4), (0.1, 10), (1.0, 1), (2.0, 1)] {
            assert_eq!(steps_to_expire(decay), steps, "decay {decay}");
        }
    }

    #[test]
    fn stepping_empty_system_reports_idle() {
        let mut ps = system();
        assert!(!ps.step());
    }
}
