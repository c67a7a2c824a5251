// Scrubbed per-item transforms and the item arena.

use cinema_core::*;

fn accordion() -> TimelineConfig {
    TimelineConfig {
        depth_per_item: 150.0,
        rotation_intensity: 2.0,
        ..TimelineConfig::default()
    }
}

#[test]
fn six_page_accordion_item_three() {
    let cfg = accordion();
    let t = scrub(1.0, 3, &cfg);
    assert_eq!(t.z_offset, -450.0);
    assert_eq!(t.rotate_y, -6.0); // odd index swings the other way
    let t2 = scrub(1.0, 2, &cfg);
    assert_eq!(t2.rotate_y, 4.0);
}

#[test]
fn lower_index_is_always_in_front() {
    let cfg = TimelineConfig {
        spread_per_item: 40.0,
        region: ScrubRegion::new(0.2, 0.8),
        ..accordion()
    };
    for step in 0..=20 {
        let p = step as f32 / 20.0;
        for i in 0..6 {
            for j in (i + 1)..6 {
                let a = scrub(p, i, &cfg);
                let b = scrub(p, j, &cfg);
                assert!(a.z_offset > b.z_offset, "p={p} i={i} j={j}");
            }
        }
    }
}

#[test]
fn deeper_items_are_more_rotated_and_smaller_at_full_scrub() {
    let cfg = accordion();
    for i in 0..5 {
        let a = scrub(1.0, i, &cfg);
        let b = scrub(1.0, i + 1, &cfg);
        assert!(b.rotate_x > a.rotate_x);
        assert!(b.rotate_y.abs() > a.rotate_y.abs());
        assert!(b.scale < a.scale);
    }
}

#[test]
fn region_gates_the_playhead() {
    let cfg = TimelineConfig {
        region: ScrubRegion::new(0.2, 0.6),
        ..accordion()
    };
    let before = scrub(0.1, 4, &cfg);
    assert_eq!(before.rotate_y, 0.0);
    assert_eq!(before.scale, 1.0);
    assert_eq!(before.z_offset, -600.0);

    let mid = scrub(0.4, 4, &cfg);
    assert!((mid.rotate_y - 4.0).abs() < 1e-4, "{mid:?}");

    let after = scrub(0.9, 4, &cfg);
    assert!((after.rotate_y - 8.0).abs() < 1e-4);
    assert_eq!(after, scrub(0.6, 4, &cfg));
}

#[test]
fn rotation_direction_flips_the_fan() {
    let flipped = TimelineConfig {
        rotation_direction: -1.0,
        ..accordion()
    };
    assert_eq!(scrub(1.0, 3, &flipped).rotate_y, 6.0);
    assert_eq!(scrub(1.0, 2, &flipped).rotate_y, -4.0);
    // Depth and tilt do not depend on the direction
    assert_eq!(scrub(1.0, 3, &flipped).z_offset, scrub(1.0, 3, &accordion()).z_offset);
    assert_eq!(scrub(1.0, 3, &flipped).rotate_x, scrub(1.0, 3, &accordion()).rotate_x);

    let mut arena = TimelineArena::new();
    let half = TimelineConfig {
        rotation_direction: 0.5,
        ..accordion()
    };
    assert!(arena.add_timeline(half).is_err());
}

#[test]
fn scale_never_reaches_zero() {
    let cfg = TimelineConfig {
        scale_decay_per_item: 0.5,
        ..accordion()
    };
    let t = scrub(1.0, 10, &cfg);
    assert!(t.scale > 0.0);
    assert_eq!(t.scale, MIN_ITEM_SCALE);
}

#[test]
fn fade_is_optional_and_clamped() {
    assert_eq!(scrub(1.0, 3, &accordion()).opacity, None);
    let cfg = TimelineConfig {
        fade_per_item: Some(0.3),
        ..accordion()
    };
    assert!((scrub(1.0, 1, &cfg).opacity.unwrap() - 0.7).abs() < 1e-6);
    assert_eq!(scrub(1.0, 5, &cfg).opacity, Some(0.0));
    assert_eq!(scrub(0.0, 5, &cfg).opacity, Some(1.0));
}

#[test]
fn easing_set() {
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::QuadIn.apply(0.5), 0.25);
    assert_eq!(Easing::QuadOut.apply(0.5), 0.75);
    assert_eq!(Easing::SmoothStep.apply(0.5), 0.5);
    for e in [Easing::Linear, Easing::QuadIn, Easing::QuadOut, Easing::SmoothStep] {
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert_eq!(e.apply(-3.0), 0.0);
        assert_eq!(e.apply(f32::NAN), 0.0);
    }
}

#[test]
fn invalid_timeline_configs_are_rejected() {
    let mut arena = TimelineArena::new();
    let zero_depth = TimelineConfig {
        depth_per_item: 0.0,
        ..accordion()
    };
    assert!(arena.add_timeline(zero_depth).is_err());
    let inverted = TimelineConfig {
        region: ScrubRegion::new(0.8, 0.2),
        ..accordion()
    };
    assert!(arena.add_timeline(inverted).is_err());
    let nan = TimelineConfig {
        rotation_intensity: f32::NAN,
        ..accordion()
    };
    assert!(arena.add_timeline(nan).is_err());
    assert_eq!(arena.timeline_count(), 0);
}

#[test]
fn arena_scrubs_registered_items_by_id() {
    let mut arena = TimelineArena::new();
    let tl = arena.add_timeline(accordion()).unwrap();
    let ids = arena.add_items(tl, 6).unwrap();
    assert_eq!(arena.len(), 6);

    let out = arena.scrub(1.0);
    assert_eq!(out.len(), 6);
    assert_eq!(out[3].id, ids[3]);
    assert_eq!(out[3].transform.z_offset, -450.0);

    let removed = arena.remove_item(ids[2]).unwrap();
    assert_eq!(removed.index, 2);
    assert!(arena.get(ids[2]).is_none());
    assert!(arena.remove_item(ids[2]).is_none());
    assert_eq!(arena.scrub(1.0).len(), 5);
}

#[test]
fn arena_rejects_unknown_timeline() {
    let mut arena = TimelineArena::new();
    assert!(arena.add_item(TimelineId(3), 0).is_err());
}

#[test]
fn cleared_arena_never_reuses_ids() {
    let mut arena = TimelineArena::new();
    let tl = arena.add_timeline(accordion()).unwrap();
    let old = arena.add_items(tl, 3).unwrap();
    arena.clear();
    assert!(arena.is_empty());
    assert!(arena.get(old[0]).is_none());

    let tl = arena.add_timeline(accordion()).unwrap();
    let new = arena.add_items(tl, 3).unwrap();
    assert!(new.iter().all(|id| !old.contains(id)));
    assert!(arena.get(old[1]).is_none());
    assert_eq!(arena.get(new[1]).unwrap().index, 1);
}
