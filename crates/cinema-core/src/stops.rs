use std::time::Duration;

use fnv::FnvHashSet;
use smallvec::SmallVec;

use crate::constants::{DEFAULT_EFFECT_WINDOW_MS, DEFAULT_STOP_RADIUS, REARM_RADIUS_FACTOR};
use crate::effects::{ActiveEffect, EffectDescriptor, EffectEvent, EffectParams};
use crate::error::{invalid, Result};

/// A fixed progress threshold with the effect it fires.
#[derive(Clone, Debug, PartialEq)]
pub struct StopDefinition {
    pub position: f32,
    /// Trigger radius ε around `position`.
    pub radius: f32,
    pub effect: EffectDescriptor,
}

impl StopDefinition {
    pub fn new(position: f32) -> Self {
        Self {
            position,
            radius: DEFAULT_STOP_RADIUS,
            effect: EffectDescriptor::burst_and_flash(),
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_effect(mut self, effect: EffectDescriptor) -> Self {
        self.effect = effect;
        self
    }
}

/// Whether a stop may fire again after the user scrolls away and back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetriggerPolicy {
    /// Fire at most once until [`StopTriggerEngine::reset`] (page remount).
    #[default]
    OncePerSession,
    /// Re-arm once progress moves more than `2ε` away from the stop.
    Rearm,
}

/// A stop that fired on this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FiredStop {
    pub index: usize,
    pub position: f32,
    pub effect: EffectDescriptor,
}

impl FiredStop {
    /// Flatten into the fire-and-forget events the external effect systems consume.
    pub fn events(&self) -> impl Iterator<Item = EffectEvent> + '_ {
        let particles = self.effect.particles.clone().map(EffectParams::Particles);
        let flash = self.effect.flash.map(EffectParams::Flash);
        particles.into_iter().chain(flash).map(move |params| EffectEvent {
            stop_index: self.index,
            params,
        })
    }
}

pub type FiredStops = SmallVec<[FiredStop; 2]>;

pub fn validate_stops(stops: &[StopDefinition]) -> Result<()> {
    if stops.is_empty() {
        return Err(invalid("stop list must not be empty"));
    }
    for (i, s) in stops.iter().enumerate() {
        if !s.position.is_finite() || !(0.0..=1.0).contains(&s.position) {
            return Err(invalid(format!("stop {i} position {} outside [0, 1]", s.position)));
        }
        if !s.radius.is_finite() || s.radius <= 0.0 {
            return Err(invalid(format!("stop {i} radius {} must be positive", s.radius)));
        }
    }
    if stops.windows(2).any(|w| w[1].position < w[0].position) {
        return Err(invalid("stop positions must be sorted ascending"));
    }
    Ok(())
}

#[derive(Debug)]
pub struct StopTriggerEngine {
    stops: Vec<StopDefinition>,
    triggered: FnvHashSet<usize>,
    policy: RetriggerPolicy,
    effect_window: Duration,
    active: Option<ActiveEffect>,
}

impl StopTriggerEngine {
    pub fn new(stops: Vec<StopDefinition>) -> Result<Self> {
        Self::with_policy(
            stops,
            RetriggerPolicy::default(),
            Duration::from_millis(DEFAULT_EFFECT_WINDOW_MS),
        )
    }

    pub fn with_policy(
        stops: Vec<StopDefinition>,
        policy: RetriggerPolicy,
        effect_window: Duration,
    ) -> Result<Self> {
        validate_stops(&stops)?;
        Ok(Self {
            stops,
            triggered: FnvHashSet::default(),
            policy,
            effect_window,
            active: None,
        })
    }

    pub fn stops(&self) -> &[StopDefinition] {
        &self.stops
    }

    pub fn policy(&self) -> RetriggerPolicy {
        self.policy
    }

    pub fn is_triggered(&self, stop_index: usize) -> bool {
        self.triggered.contains(&stop_index)
    }

    pub fn triggered_count(&self) -> usize {
        self.triggered.len()
    }

    /// The live effect window, if the last firing has not expired yet.
    pub fn active_effect(&self) -> Option<&ActiveEffect> {
        self.active.as_ref()
    }

    /// Forget every firing; equivalent to a page remount.
    pub fn reset(&mut self) {
        self.triggered.clear();
        self.active = None;
    }

    /// Age the active window by `dt`, then fire every untriggered stop within ε
    /// of `progress`, in ascending stop order. Stops closer than `2ε` to each
    /// other may fire on the same frame.
    pub fn update(&mut self, progress: f32, dt: Duration) -> FiredStops {
        if let Some(active) = &mut self.active {
            if !active.tick(dt) {
                self.active = None;
            }
        }

        let mut fired = FiredStops::new();
        if !progress.is_finite() {
            return fired;
        }
        let p = progress.clamp(0.0, 1.0);

        if self.policy == RetriggerPolicy::Rearm {
            let stops = &self.stops;
            self.triggered.retain(|&i| {
                let s = &stops[i];
                (p - s.position).abs() < s.radius * REARM_RADIUS_FACTOR
            });
        }

        for (i, stop) in self.stops.iter().enumerate() {
            if self.triggered.contains(&i) || (p - stop.position).abs() >= stop.radius {
                continue;
            }
            self.triggered.insert(i);
            self.active = Some(ActiveEffect::new(i, self.effect_window));
            log::debug!("[stops] stop {} fired at progress {:.3}", i, p);
            fired.push(FiredStop {
                index: i,
                position: stop.position,
                effect: stop.effect.clone(),
            });
        }
        fired
    }
}
