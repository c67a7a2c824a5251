// Scroll position → progress normalization.

use cinema_core::*;

#[test]
fn document_progress_is_offset_over_extent() {
    let mut src = ScrollProgressSource::document();
    assert!((src.on_update(250.0, 1000.0) - 0.25).abs() < 1e-6);
    assert!((src.progress() - 0.25).abs() < 1e-6);
}

#[test]
fn document_progress_clamps_to_unit_range() {
    let mut src = ScrollProgressSource::document();
    assert_eq!(src.on_update(1500.0, 1000.0), 1.0);
    assert_eq!(src.on_update(-40.0, 1000.0), 0.0);
}

#[test]
fn zero_or_negative_extent_yields_zero_not_nan() {
    let mut src = ScrollProgressSource::document();
    let p = src.on_update(300.0, 0.0);
    assert_eq!(p, 0.0);
    assert!(p.is_finite());
    assert_eq!(src.on_update(300.0, -10.0), 0.0);
    // Recovers once the page has height again
    assert!((src.on_update(300.0, 600.0) - 0.5).abs() < 1e-6);
}

#[test]
fn strict_form_reports_degenerate_extent() {
    assert_eq!(
        try_progress(10.0, 0.0),
        Err(CinemaError::DegenerateScrollExtent { extent: 0.0 })
    );
    assert!(try_progress(10.0, 20.0).is_ok());
}

#[test]
fn non_finite_samples_keep_last_good_progress() {
    let mut src = ScrollProgressSource::document();
    src.on_update(400.0, 1000.0);
    assert!((src.on_update(f32::NAN, 1000.0) - 0.4).abs() < 1e-6);
    assert!((src.on_update(100.0, f32::INFINITY) - 0.4).abs() < 1e-6);
}

#[test]
fn element_progress_runs_from_entry_at_bottom_to_exit_at_top() {
    let mut src = ScrollProgressSource::element(ScrollAnchors::ENTER_EXIT);
    let at = |top: f32| ElementGeometry {
        top,
        height: 400.0,
        viewport_height: 800.0,
    };
    // Element top just reaching the viewport bottom
    assert_eq!(src.on_element(at(800.0)), 0.0);
    // Half way through the 1200px travel
    assert!((src.on_element(at(200.0)) - 0.5).abs() < 1e-6);
    // Element bottom leaving at the viewport top
    assert_eq!(src.on_element(at(-400.0)), 1.0);
    // Below the viewport: not started yet
    assert_eq!(src.on_element(at(1200.0)), 0.0);
}

#[test]
fn default_element_progress_runs_bottom_at_bottom_to_top_at_top() {
    assert_eq!(ScrollAnchors::default(), ScrollAnchors::BOTTOM_TO_TOP);
    let mut src = ScrollProgressSource::element(ScrollAnchors::default());
    let at = |top: f32| ElementGeometry {
        top,
        height: 400.0,
        viewport_height: 800.0,
    };
    // Bottom edge at the viewport bottom
    assert_eq!(src.on_element(at(400.0)), 0.0);
    assert!((src.on_element(at(200.0)) - 0.5).abs() < 1e-6);
    // Top edge at the viewport top
    assert_eq!(src.on_element(at(0.0)), 1.0);
    assert_eq!(src.on_element(at(-100.0)), 1.0);
    assert_eq!(src.on_element(at(600.0)), 0.0);
}

#[test]
fn default_anchors_hold_zero_for_elements_taller_than_viewport() {
    let mut src = ScrollProgressSource::element(ScrollAnchors::default());
    let p = src.on_element(ElementGeometry {
        top: -300.0,
        height: 1600.0,
        viewport_height: 800.0,
    });
    assert_eq!(p, 0.0);
}

#[test]
fn contain_anchors_cover_pinned_travel() {
    let mut src = ScrollProgressSource::element(ScrollAnchors::CONTAIN);
    let at = |top: f32| ElementGeometry {
        top,
        height: 2000.0,
        viewport_height: 800.0,
    };
    assert_eq!(src.on_element(at(0.0)), 0.0);
    assert!((src.on_element(at(-600.0)) - 0.5).abs() < 1e-6);
    assert_eq!(src.on_element(at(-1200.0)), 1.0);
}

#[test]
fn element_exactly_viewport_sized_with_contain_is_degenerate() {
    let mut src = ScrollProgressSource::element(ScrollAnchors::CONTAIN);
    let p = src.on_element(ElementGeometry {
        top: -50.0,
        height: 800.0,
        viewport_height: 800.0,
    });
    assert_eq!(p, 0.0);
}

#[test]
fn samples_dispatch_by_kind() {
    let mut src = ScrollProgressSource::document();
    let p = src.on_sample(ScrollSample::Document {
        offset: 75.0,
        extent: 100.0,
    });
    assert!((p - 0.75).abs() < 1e-6);
}
