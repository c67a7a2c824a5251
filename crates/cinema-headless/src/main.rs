use std::time::Duration;

use cinema_core::{
    presets, EffectParams, ElementGeometry, FrameOutput, FrameRenderer, Orchestrator,
    ProgressMode, ScrollSample,
};
use instant::Instant;

// Page geometry used to turn a synthetic progress sweep into scroll samples.
const DOC_EXTENT_PX: f32 = 4000.0;
const VIEWPORT_PX: f32 = 800.0;
const SECTION_PX: f32 = 2400.0;
const FRAME_DT: Duration = Duration::from_micros(16_667);

/// Logs what a real renderer would receive, without drawing anything.
#[derive(Default)]
struct LogRenderer {
    last_chapter: Option<usize>,
    effects: usize,
    last: Option<FrameOutput>,
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, frame: &FrameOutput) {
        if let Some(ch) = frame.chapter {
            if self.last_chapter != Some(ch.chapter_index) {
                log::info!(
                    "[frame {}] progress={:.3} -> chapter {}",
                    frame.frame,
                    frame.progress,
                    ch.chapter_index
                );
                self.last_chapter = Some(ch.chapter_index);
            }
        }
        for ev in &frame.effects {
            match &ev.params {
                EffectParams::Particles(b) => log::info!(
                    "[frame {}] stop {} particles x{} at ({:.2},{:.2},{:.2}); first particle {:?}",
                    frame.frame,
                    ev.stop_index,
                    b.count,
                    b.origin.x,
                    b.origin.y,
                    b.origin.z,
                    b.sample().first().map(|p| p.velocity)
                ),
                EffectParams::Flash(f) => log::info!(
                    "[frame {}] stop {} flash intensity {:.2}",
                    frame.frame,
                    ev.stop_index,
                    f.intensity
                ),
            }
        }
        self.effects += frame.effects.len();
        self.last = Some(frame.clone());
    }
}

fn sample_for(mode: ProgressMode, progress: f32) -> ScrollSample {
    match mode {
        ProgressMode::Document => ScrollSample::Document {
            offset: progress * DOC_EXTENT_PX,
            extent: DOC_EXTENT_PX,
        },
        ProgressMode::Element(anchors) => {
            let g = ElementGeometry {
                top: 0.0,
                height: SECTION_PX,
                viewport_height: VIEWPORT_PX,
            };
            let (_, extent) = cinema_core::element_offset_extent(g, anchors);
            let start_top = anchors.start.viewport * VIEWPORT_PX - anchors.start.element * SECTION_PX;
            ScrollSample::Element(ElementGeometry {
                top: start_top - progress * extent,
                ..g
            })
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "journey".to_string());
    let frames: u32 = match args.next() {
        Some(s) => s.parse()?,
        None => 600,
    };
    let config = presets::by_name(&preset)
        .ok_or_else(|| anyhow::anyhow!("unknown preset '{}' (journey, museum, book)", preset))?;
    let mode = config.progress_mode;

    let mut orchestrator = Orchestrator::new(config, LogRenderer::default())?;
    orchestrator.mount();

    let started = Instant::now();
    let half = (frames / 2).max(1);
    for i in 0..=frames {
        // 0 → 1 over the first half, back to 0 over the second
        let p = if i <= half {
            i as f32 / half as f32
        } else {
            1.0 - (i - half) as f32 / (frames - half).max(1) as f32
        };
        orchestrator.sample(sample_for(mode, p));
        orchestrator.tick(FRAME_DT);
    }
    orchestrator.unmount();

    let r = orchestrator.renderer();
    log::info!(
        "swept '{}' over {} frames in {:?}; {} effect events",
        preset,
        frames + 1,
        started.elapsed(),
        r.effects
    );
    if let Some(cam) = r.last.as_ref().and_then(|f| f.camera) {
        log::info!(
            "final camera pos=({:.2},{:.2},{:.2}) target=({:.2},{:.2},{:.2}) ambient={:.2}",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
            cam.ambient_intensity
        );
    }
    if let Some(items) = r.last.as_ref().map(|f| &f.items).filter(|i| !i.is_empty()) {
        for it in items {
            let t = it.transform;
            log::info!(
                "item {:?}: z={:.1} rx={:.1} ry={:.1} s={:.3}",
                it.id,
                t.z_offset,
                t.rotate_x,
                t.rotate_y,
                t.scale
            );
        }
    }
    Ok(())
}
