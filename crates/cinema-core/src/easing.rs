/// Easing curves for a scrubbed timeline playhead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    SmoothStep,
}

impl Easing {
    /// Map `t ∈ [0, 1]` through the curve; input is clamped first.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}
