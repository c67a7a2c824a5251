// Stop proximity firing, de-duplication and the active effect window.

use std::collections::HashMap;
use std::time::Duration;

use cinema_core::*;

const FRAME: Duration = Duration::from_millis(16);

fn engine(positions: &[f32], radius: f32) -> StopTriggerEngine {
    let stops = positions
        .iter()
        .map(|&p| StopDefinition::new(p).with_radius(radius))
        .collect();
    StopTriggerEngine::new(stops).unwrap()
}

#[test]
fn sweep_up_and_back_fires_each_stop_once() {
    let mut e = engine(&[0.0, 0.125, 0.25], 0.02);
    let mut counts: HashMap<usize, usize> = HashMap::new();
    let up = (0..=60).map(|i| i as f32 * 0.005);
    let down = (0..=60).rev().map(|i| i as f32 * 0.005);
    for p in up.chain(down) {
        for fired in e.update(p, FRAME) {
            *counts.entry(fired.index).or_default() += 1;
        }
    }
    assert_eq!(counts.get(&0), Some(&1));
    assert_eq!(counts.get(&1), Some(&1));
    assert_eq!(counts.get(&2), Some(&1));
    assert_eq!(e.triggered_count(), 3);
}

#[test]
fn oscillating_across_a_stop_fires_at_most_once() {
    let mut e = engine(&[0.5], 0.02);
    let mut total = 0;
    for k in 0..200 {
        let p = if k % 2 == 0 { 0.49 } else { 0.7 };
        total += e.update(p, FRAME).len();
    }
    assert_eq!(total, 1);
    assert!(e.is_triggered(0));
}

#[test]
fn stop_outside_radius_does_not_fire() {
    let mut e = engine(&[0.5], 0.02);
    assert!(e.update(0.47, FRAME).is_empty());
    assert!(e.update(0.53, FRAME).is_empty());
    assert_eq!(e.update(0.51, FRAME).len(), 1);
}

#[test]
fn neighbouring_stops_may_fire_on_the_same_frame() {
    let mut e = engine(&[0.5, 0.53], 0.02);
    let fired = e.update(0.515, FRAME);
    let idx: Vec<usize> = fired.iter().map(|f| f.index).collect();
    assert_eq!(idx, vec![0, 1]);
}

#[test]
fn rearm_policy_fires_again_after_leaving() {
    let stops = vec![StopDefinition::new(0.5).with_radius(0.02)];
    let mut e = StopTriggerEngine::with_policy(
        stops,
        RetriggerPolicy::Rearm,
        Duration::from_millis(DEFAULT_EFFECT_WINDOW_MS),
    )
    .unwrap();
    assert_eq!(e.update(0.5, FRAME).len(), 1);
    // Still inside the re-arm band: no second firing
    assert!(e.update(0.53, FRAME).is_empty());
    assert!(e.update(0.5, FRAME).is_empty());
    // Leave beyond 2ε, come back
    assert!(e.update(0.6, FRAME).is_empty());
    assert!(!e.is_triggered(0));
    assert_eq!(e.update(0.505, FRAME).len(), 1);
}

#[test]
fn reset_allows_a_fresh_session() {
    let mut e = engine(&[0.2], 0.02);
    assert_eq!(e.update(0.2, FRAME).len(), 1);
    assert!(e.update(0.2, FRAME).is_empty());
    e.reset();
    assert!(e.active_effect().is_none());
    assert_eq!(e.update(0.2, FRAME).len(), 1);
}

#[test]
fn active_effect_expires_after_window() {
    let mut e = engine(&[0.0], 0.02);
    e.update(0.0, FRAME);
    let active = *e.active_effect().unwrap();
    assert_eq!(active.stop_index, 0);
    assert_eq!(active.strength(), 1.0);

    e.update(0.3, Duration::from_millis(300));
    let strength = e.active_effect().unwrap().strength();
    assert!((strength - 0.4).abs() < 1e-4, "strength {strength}");

    e.update(0.3, Duration::from_millis(300));
    assert!(e.active_effect().is_none());
}

#[test]
fn non_finite_progress_fires_nothing() {
    let mut e = engine(&[0.0], 0.02);
    assert!(e.update(f32::NAN, FRAME).is_empty());
    assert_eq!(e.triggered_count(), 0);
}

#[test]
fn fired_stop_flattens_into_effect_events() {
    let mut e = engine(&[0.0], 0.02);
    let fired = e.update(0.0, FRAME);
    let events: Vec<EffectEvent> = fired[0].events().collect();
    let kinds: Vec<EffectKind> = events.iter().map(|ev| ev.params.kind()).collect();
    assert_eq!(kinds, vec![EffectKind::Particles, EffectKind::Flash]);
    assert!(events.iter().all(|ev| ev.stop_index == 0));
}

#[test]
fn invalid_stop_lists_are_rejected() {
    assert!(StopTriggerEngine::new(Vec::new()).is_err());
    assert!(StopTriggerEngine::new(vec![StopDefinition::new(0.5), StopDefinition::new(0.2)]).is_err());
    assert!(StopTriggerEngine::new(vec![StopDefinition::new(1.5)]).is_err());
    assert!(StopTriggerEngine::new(vec![StopDefinition::new(0.5).with_radius(0.0)]).is_err());
    assert!(StopTriggerEngine::new(vec![StopDefinition::new(f32::NAN)]).is_err());
}

#[test]
fn particle_bursts_are_deterministic_per_seed() {
    let burst = ParticleBurst {
        count: 16,
        ..ParticleBurst::default()
    };
    let a = burst.sample();
    let b = burst.sample();
    assert_eq!(a.len(), 16);
    assert_eq!(a, b);
    for p in &a {
        assert!(p.velocity.length() <= burst.speed + 1e-4);
        assert!(p.life_sec > 0.0 && p.life_sec <= burst.life_sec);
    }
    let other = ParticleBurst {
        seed: burst.seed + 1,
        ..burst.clone()
    }
    .sample();
    assert_ne!(a, other);
}
