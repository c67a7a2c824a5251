// Host-side tests for CSS formatting of scrubbed transforms.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod css {
    include!("../src/css.rs");
}

use cinema_core::{scrub, TimelineConfig, TimelineTransform};
use css::*;

fn rest() -> TimelineTransform {
    TimelineTransform {
        z_offset: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
        opacity: None,
    }
}

#[test]
fn formats_transform_in_css_units() {
    let t = TimelineTransform {
        z_offset: -450.0,
        rotate_x: 4.5,
        rotate_y: -6.0,
        scale: 0.91,
        opacity: None,
    };
    assert_eq!(
        transform_css(&t),
        "translateZ(-450.00px) rotateX(4.50deg) rotateY(-6.00deg) scale(0.9100)"
    );
}

#[test]
fn resting_item_has_no_negative_zeroes() {
    let t = TimelineTransform {
        z_offset: -0.0,
        rotate_y: -0.0,
        ..rest()
    };
    assert_eq!(
        transform_css(&t),
        "translateZ(0.00px) rotateX(0.00deg) rotateY(0.00deg) scale(1.0000)"
    );
}

#[test]
fn non_finite_values_render_as_zero() {
    let t = TimelineTransform {
        rotate_x: f32::NAN,
        scale: f32::INFINITY,
        ..rest()
    };
    let css = transform_css(&t);
    assert!(css.contains("rotateX(0.00deg)"));
    assert!(css.contains("scale(0.0000)"));
    assert!(!css.contains("NaN") && !css.contains("inf"));
}

#[test]
fn opacity_only_when_fading() {
    assert_eq!(opacity_css(&rest()), None);
    let faded = TimelineTransform {
        opacity: Some(0.25),
        ..rest()
    };
    assert_eq!(opacity_css(&faded).as_deref(), Some("0.250"));
    let over = TimelineTransform {
        opacity: Some(1.5),
        ..rest()
    };
    assert_eq!(opacity_css(&over).as_deref(), Some("1.000"));
}

#[test]
fn scrubbed_accordion_page_formats() {
    let cfg = TimelineConfig {
        depth_per_item: 150.0,
        rotation_intensity: 2.0,
        ..TimelineConfig::default()
    };
    let css = transform_css(&scrub(1.0, 3, &cfg));
    assert!(css.starts_with("translateZ(-450.00px)"), "{css}");
    assert!(css.contains("rotateY(-6.00deg)"), "{css}");
}

#[test]
fn container_gets_perspective() {
    let props = container_properties();
    assert_eq!(props[0].0, "perspective");
    assert_eq!(props[0].1, "1200px");
    assert_eq!(props[1], ("transform-style", "preserve-3d".to_string()));
}
