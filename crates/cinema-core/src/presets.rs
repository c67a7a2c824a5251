use glam::Vec3;

use crate::chapter::{Chapter, DirectionalLight};
use crate::easing::Easing;
use crate::effects::{EffectDescriptor, FlashLight, ParticleBurst};
use crate::orchestrator::{CameraTrack, OrchestratorConfig, StopTrack, TimelineSpec};
use crate::progress::{ProgressMode, ScrollAnchors};
use crate::stops::StopDefinition;
use crate::timeline::{ScrubRegion, TimelineConfig};

const WARM: Vec3 = Vec3::new(1.0, 0.85, 0.6);
const COOL: Vec3 = Vec3::new(0.6, 0.75, 1.0);

fn light(position: Vec3, intensity: f32, color: Vec3) -> DirectionalLight {
    DirectionalLight {
        position,
        intensity,
        color,
    }
}

/// Course journey: the camera walks down a corridor of learning milestones.
pub fn journey() -> OrchestratorConfig {
    let chapters = vec![
        Chapter::new(Vec3::new(0.0, 1.6, 8.0), Vec3::new(0.0, 1.2, 0.0))
            .with_ambient(0.35)
            .with_light(light(Vec3::new(4.0, 6.0, 4.0), 1.0, WARM)),
        Chapter::new(Vec3::new(2.5, 1.8, 3.0), Vec3::new(0.0, 1.4, -4.0)).with_ambient(0.45),
        Chapter::new(Vec3::new(-2.0, 2.2, -3.0), Vec3::new(0.0, 1.0, -10.0))
            .with_light(light(Vec3::new(-4.0, 5.0, -6.0), 1.3, COOL)),
        Chapter::new(Vec3::new(0.0, 3.0, -9.0), Vec3::new(0.0, 1.0, -16.0)).with_ambient(0.6),
    ];
    let stops = [0.0, 0.25, 0.5, 0.75]
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            StopDefinition::new(p).with_effect(EffectDescriptor {
                particles: Some(ParticleBurst {
                    origin: chapters[i].camera_target,
                    seed: 100 + i as u64,
                    ..ParticleBurst::default()
                }),
                flash: Some(FlashLight {
                    position: chapters[i].camera_target + Vec3::Y * 2.0,
                    ..FlashLight::default()
                }),
            })
        })
        .collect();
    OrchestratorConfig {
        progress_mode: ProgressMode::Document,
        camera: Some(CameraTrack::new(chapters)),
        stops: Some(StopTrack::new(stops)),
        timelines: Vec::new(),
    }
}

/// Museum walk: eight exhibits, a flash-only stop every eighth of the page.
pub fn museum() -> OrchestratorConfig {
    let mut chapters: Vec<Chapter> = (0..8)
        .map(|i| {
            let x = if i % 2 == 0 { -3.0 } else { 3.0 };
            let z = -(i as f32) * 5.0;
            Chapter::new(Vec3::new(0.0, 1.7, z + 4.0), Vec3::new(x, 1.5, z))
        })
        .collect();
    // Unset exhibits in between inherit the ambient level as the camera passes.
    chapters[0].ambient_intensity = Some(0.3);
    chapters[7].ambient_intensity = Some(0.7);
    let stops = (0..8)
        .map(|i| {
            StopDefinition::new(i as f32 * 0.125).with_effect(EffectDescriptor {
                particles: None,
                flash: Some(FlashLight {
                    position: chapters[i].camera_target + Vec3::Y * 3.0,
                    color: WARM,
                    intensity: 2.0,
                }),
            })
        })
        .collect();
    OrchestratorConfig {
        progress_mode: ProgressMode::Document,
        camera: Some(CameraTrack::new(chapters)),
        stops: Some(StopTrack::new(stops)),
        timelines: Vec::new(),
    }
}

/// Book accordion: pages fan out while their section is pinned in view.
pub fn book_accordion(pages: usize) -> OrchestratorConfig {
    OrchestratorConfig {
        progress_mode: ProgressMode::Element(ScrollAnchors::CONTAIN),
        camera: None,
        stops: None,
        timelines: vec![TimelineSpec {
            config: TimelineConfig {
                depth_per_item: 150.0,
                rotation_intensity: 2.0,
                rotation_direction: 1.0,
                tilt_degrees: 1.5,
                scale_decay_per_item: 0.03,
                spread_per_item: 60.0,
                fade_per_item: Some(0.08),
                region: ScrubRegion::new(0.1, 0.9),
                easing: Easing::Linear,
            },
            item_count: pages,
        }],
    }
}

/// Look up a preset by page name.
pub fn by_name(name: &str) -> Option<OrchestratorConfig> {
    match name {
        "journey" => Some(journey()),
        "museum" => Some(museum()),
        "book" | "accordion" => Some(book_accordion(6)),
        _ => None,
    }
}
