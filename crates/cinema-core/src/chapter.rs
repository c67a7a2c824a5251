use glam::Vec3;

use crate::error::{invalid, Result};

/// Directional light attached to a chapter keyframe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
    pub color: Vec3,
}

impl DirectionalLight {
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            intensity: self.intensity + (other.intensity - self.intensity) * t,
            color: self.color.lerp(other.color, t),
        }
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.intensity.is_finite() && self.color.is_finite()
    }
}

/// One authored camera keyframe of a scroll journey.
///
/// Lighting fields are optional; an unset field keeps whatever value the
/// camera already had, so a chapter never flashes a light to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Chapter {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub ambient_intensity: Option<f32>,
    pub directional_light: Option<DirectionalLight>,
}

impl Chapter {
    pub fn new(camera_position: Vec3, camera_target: Vec3) -> Self {
        Self {
            camera_position,
            camera_target,
            ambient_intensity: None,
            directional_light: None,
        }
    }

    pub fn with_ambient(mut self, intensity: f32) -> Self {
        self.ambient_intensity = Some(intensity);
        self
    }

    pub fn with_light(mut self, light: DirectionalLight) -> Self {
        self.directional_light = Some(light);
        self
    }

    fn is_finite(&self) -> bool {
        self.camera_position.is_finite()
            && self.camera_target.is_finite()
            && self.ambient_intensity.map_or(true, f32::is_finite)
            && self.directional_light.as_ref().map_or(true, DirectionalLight::is_finite)
    }
}

/// Reject empty journeys and keyframes carrying NaN/∞.
pub fn validate_chapters(chapters: &[Chapter]) -> Result<()> {
    if chapters.is_empty() {
        return Err(invalid("at least one chapter is required"));
    }
    if let Some(i) = chapters.iter().position(|c| !c.is_finite()) {
        return Err(invalid(format!("chapter {i} has non-finite keyframe values")));
    }
    Ok(())
}

/// Position within a chapter list, derived fresh every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChapterState {
    pub chapter_index: usize,
    pub chapter_progress: f32,
}

/// Discretize progress into `(chapter_index, chapter_progress)`.
///
/// `progress` is clamped to `[0, 1]` first (NaN counts as 0). The index is
/// capped at the last chapter, where `progress == 1` lands with a chapter
/// progress of 0 so the last keyframe is held exactly.
pub fn index(progress: f32, chapter_count: usize) -> Result<ChapterState> {
    if chapter_count == 0 {
        return Err(invalid("chapter count must be at least 1"));
    }
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let scaled = p * chapter_count as f32;
    let raw = scaled.floor() as usize;
    let last = chapter_count - 1;
    if raw > last {
        return Ok(ChapterState {
            chapter_index: last,
            chapter_progress: 0.0,
        });
    }
    // Guard the rare case where rounding pushes the fraction to exactly 1.
    let frac = (scaled - raw as f32).clamp(0.0, 1.0);
    let chapter_progress = if frac >= 1.0 { 0.0 } else { frac };
    Ok(ChapterState {
        chapter_index: raw,
        chapter_progress,
    })
}
