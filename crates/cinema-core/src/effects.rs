use std::time::Duration;

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{DEFAULT_PARTICLE_COUNT, DEFAULT_PARTICLE_LIFE_SEC};

/// Radial particle burst emitted from `origin`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBurst {
    pub origin: Vec3,
    pub count: u32,
    pub speed: f32,
    pub spread: f32,
    pub color: Vec3,
    pub life_sec: f32,
    pub seed: u64,
}

impl Default for ParticleBurst {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            count: DEFAULT_PARTICLE_COUNT,
            speed: 2.0,
            spread: 0.3,
            color: Vec3::new(1.0, 0.85, 0.55),
            life_sec: DEFAULT_PARTICLE_LIFE_SEC,
            seed: 7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub life_sec: f32,
}

impl ParticleBurst {
    /// Deterministic particle set for this burst; the same seed always yields
    /// the same particles.
    pub fn sample(&self) -> Vec<Particle> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.count)
            .map(|_| {
                // Uniform direction on the unit sphere
                let z: f32 = rng.gen_range(-1.0..=1.0);
                let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
                let r = (1.0 - z * z).max(0.0).sqrt();
                let dir = Vec3::new(r * theta.cos(), r * theta.sin(), z);
                let jitter = Vec3::new(
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                ) * self.spread;
                let speed = self.speed * rng.gen_range(0.5_f32..=1.0);
                Particle {
                    position: self.origin + jitter,
                    velocity: dir * speed,
                    life_sec: self.life_sec * rng.gen_range(0.6_f32..=1.0),
                }
            })
            .collect()
    }
}

/// Short point-light flash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlashLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for FlashLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 2.0),
            color: Vec3::ONE,
            intensity: 3.0,
        }
    }
}

/// What a stop does when it fires.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectDescriptor {
    pub particles: Option<ParticleBurst>,
    pub flash: Option<FlashLight>,
}

impl EffectDescriptor {
    pub fn burst_and_flash() -> Self {
        Self {
            particles: Some(ParticleBurst::default()),
            flash: Some(FlashLight::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Particles,
    Flash,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EffectParams {
    Particles(ParticleBurst),
    Flash(FlashLight),
}

impl EffectParams {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectParams::Particles(_) => EffectKind::Particles,
            EffectParams::Flash(_) => EffectKind::Flash,
        }
    }
}

/// Fire-and-forget event for the external particle/light systems.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectEvent {
    pub stop_index: usize,
    pub params: EffectParams,
}

/// Flash as the renderer should draw it this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlashState {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Live window opened by the most recent firing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveEffect {
    pub stop_index: usize,
    pub window: Duration,
    pub remaining: Duration,
}

impl ActiveEffect {
    pub fn new(stop_index: usize, window: Duration) -> Self {
        Self {
            stop_index,
            window,
            remaining: window,
        }
    }

    /// Advance by `dt`; returns false once the window has run out.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        !self.remaining.is_zero()
    }

    /// 1 right after firing, falling linearly to 0 at expiry.
    pub fn strength(&self) -> f32 {
        if self.window.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f32() / self.window.as_secs_f32()).clamp(0.0, 1.0)
    }
}
