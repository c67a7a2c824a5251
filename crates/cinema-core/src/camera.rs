//! Chapter keyframes → smoothed camera state.
//!
//! The interpolator blends the current chapter toward the next one with the
//! intra-chapter progress, then runs an exponential low-pass on top so fast
//! scrolling does not snap the camera. The low-pass is the only mutable state;
//! it must be stepped once per animation frame.

use glam::{Mat4, Vec3};

use crate::chapter::{Chapter, ChapterState, DirectionalLight};
use crate::constants::{
    CAMERA_FOVY_RADIANS, CAMERA_ZFAR, CAMERA_ZNEAR, DEFAULT_AMBIENT_INTENSITY,
    MAX_FRAME_DT_SEC, REFERENCE_FRAME_RATE,
};

/// Camera parameters pushed to the external 3D renderer every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub ambient_intensity: f32,
    pub directional_light: Option<DirectionalLight>,
}

impl CameraState {
    fn smooth_toward(&mut self, goal: &CameraState, s: f32) {
        self.position = self.position.lerp(goal.position, s);
        self.target = self.target.lerp(goal.target, s);
        self.ambient_intensity += (goal.ambient_intensity - self.ambient_intensity) * s;
        self.directional_light = match (self.directional_light, goal.directional_light) {
            (Some(cur), Some(g)) => Some(cur.lerp(&g, s)),
            (None, g) => g,
            (cur, None) => cur,
        };
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.target.is_finite() && self.ambient_intensity.is_finite()
    }

    /// Perspective camera looking from `position` at `target`.
    pub fn to_camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.position,
            target: self.target,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

/// Rescale a per-frame smoothing factor authored at 60 Hz to a real frame delta.
///
/// `1 − (1 − s)^(dt·60)`; a factor of 1 stays 1 and a zero delta leaves `s` as is.
pub fn smoothing_for_dt(smoothing: f32, dt_sec: f32) -> f32 {
    if smoothing.is_nan() || smoothing <= 0.0 {
        return 0.0;
    }
    if smoothing >= 1.0 {
        return 1.0;
    }
    if dt_sec.is_nan() || dt_sec <= 0.0 {
        return smoothing;
    }
    let frames = dt_sec.min(MAX_FRAME_DT_SEC) * REFERENCE_FRAME_RATE;
    1.0 - (1.0 - smoothing).powf(frames)
}

#[derive(Debug, Default)]
pub struct CameraInterpolator {
    current: Option<CameraState>,
}

impl CameraInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed state from the last frame, if any frame has run.
    pub fn current(&self) -> Option<&CameraState> {
        self.current.as_ref()
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Unsmoothed blend of `chapters[i]` toward `chapters[min(i + 1, last)]`.
    ///
    /// Unset lighting falls back to the current smoothed value, then to the
    /// neighbouring keyframe.
    pub fn blended_target(
        &self,
        chapters: &[Chapter],
        chapter_index: usize,
        chapter_progress: f32,
    ) -> Option<CameraState> {
        let last = chapters.len().checked_sub(1)?;
        let i = chapter_index.min(last);
        let from = &chapters[i];
        let to = &chapters[(i + 1).min(last)];
        let t = if chapter_progress.is_finite() {
            chapter_progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let prev_ambient = self
            .current
            .map(|c| c.ambient_intensity)
            .unwrap_or(DEFAULT_AMBIENT_INTENSITY);
        let a0 = from.ambient_intensity.unwrap_or(prev_ambient);
        let a1 = to.ambient_intensity.unwrap_or(a0);

        let prev_light = self.current.and_then(|c| c.directional_light);
        let l0 = from.directional_light.or(prev_light);
        let l1 = to.directional_light.or(l0);
        let directional_light = match (l0, l1) {
            (Some(a), Some(b)) => Some(a.lerp(&b, t)),
            (None, Some(b)) => Some(DirectionalLight {
                intensity: b.intensity * t,
                ..b
            }),
            (l, None) => l,
        };

        Some(CameraState {
            position: from.camera_position.lerp(to.camera_position, t),
            target: from.camera_target.lerp(to.camera_target, t),
            ambient_intensity: a0 + (a1 - a0) * t,
            directional_light,
        })
    }

    /// Blend keyframes and step the low-pass by `smoothing ∈ (0, 1]`.
    ///
    /// The first call after construction or [`reset`](Self::reset) lands on the
    /// target directly. Invalid smoothing or non-finite results hold the last
    /// good state.
    pub fn interpolate(
        &mut self,
        chapters: &[Chapter],
        chapter_index: usize,
        chapter_progress: f32,
        smoothing: f32,
    ) -> Option<CameraState> {
        let goal = match self.blended_target(chapters, chapter_index, chapter_progress) {
            Some(g) if g.is_finite() => g,
            _ => return self.current,
        };
        let next = match self.current {
            None => goal,
            Some(cur) if smoothing.is_finite() && smoothing > 0.0 => {
                let mut next = cur;
                next.smooth_toward(&goal, smoothing.min(1.0));
                next
            }
            Some(cur) => cur,
        };
        self.current = Some(next);
        self.current
    }

    pub fn interpolate_state(
        &mut self,
        chapters: &[Chapter],
        state: ChapterState,
        smoothing: f32,
    ) -> Option<CameraState> {
        self.interpolate(chapters, state.chapter_index, state.chapter_progress, smoothing)
    }

    /// Jump straight to the blended target (used when a page mounts mid-scroll).
    pub fn snap(&mut self, chapters: &[Chapter], state: ChapterState) -> Option<CameraState> {
        self.reset();
        self.interpolate_state(chapters, state, 1.0)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
        }
    }
}

/// GPU-ready camera block for renderers that upload a uniform buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}
