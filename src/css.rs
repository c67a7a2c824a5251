use crate::constants::{ACCORDION_PERSPECTIVE_PX, CSS_LENGTH_DECIMALS, CSS_SCALE_DECIMALS};
use cinema_core::TimelineTransform;

// Non-finite values render as 0 and -0 prints as 0.
#[inline]
fn clean(v: f32) -> f32 {
    if v.is_finite() {
        v + 0.0
    } else {
        0.0
    }
}

/// CSS `transform` value for one scrubbed item.
pub fn transform_css(t: &TimelineTransform) -> String {
    format!(
        "translateZ({:.l$}px) rotateX({:.l$}deg) rotateY({:.l$}deg) scale({:.s$})",
        clean(t.z_offset),
        clean(t.rotate_x),
        clean(t.rotate_y),
        clean(t.scale),
        l = CSS_LENGTH_DECIMALS,
        s = CSS_SCALE_DECIMALS,
    )
}

/// CSS `opacity` value, when the timeline fades items.
pub fn opacity_css(t: &TimelineTransform) -> Option<String> {
    t.opacity
        .map(|o| format!("{:.3}", clean(o).clamp(0.0, 1.0)))
}

/// Style properties for the element that hosts the 3D items.
pub fn container_properties() -> [(&'static str, String); 2] {
    [
        ("perspective", format!("{:.0}px", ACCORDION_PERSPECTIVE_PX)),
        ("transform-style", "preserve-3d".to_string()),
    ]
}
