//! Per-page façade composing progress, chapters, camera, stops and timelines.
//!
//! One [`Orchestrator`] lives for one page view. Scroll samples may arrive any
//! number of times between frames and are coalesced; [`Orchestrator::tick`]
//! runs once per animation frame and evaluates every stage against a single
//! progress snapshot before handing the result to the renderer.

use std::time::Duration;

use smallvec::SmallVec;

use crate::camera::{smoothing_for_dt, CameraInterpolator, CameraState};
use crate::chapter::{self, validate_chapters, Chapter, ChapterState};
use crate::constants::{DEFAULT_EFFECT_WINDOW_MS, DEFAULT_SMOOTHING};
use crate::effects::{EffectEvent, FlashState};
use crate::error::{invalid, Result};
use crate::progress::{ProgressMode, ScrollProgressSource, ScrollSample};
use crate::stops::{RetriggerPolicy, StopDefinition, StopTriggerEngine};
use crate::timeline::{ItemId, ItemTransform, TimelineArena, TimelineConfig, TimelineId};

/// Side-effecting seam to the external 3D / DOM renderer.
pub trait FrameRenderer {
    fn render(&mut self, frame: &FrameOutput);
}

impl<F: FnMut(&FrameOutput)> FrameRenderer for F {
    fn render(&mut self, frame: &FrameOutput) {
        self(frame)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraTrack {
    pub chapters: Vec<Chapter>,
    pub smoothing: f32,
}

impl CameraTrack {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self {
            chapters,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StopTrack {
    pub stops: Vec<StopDefinition>,
    pub retrigger: RetriggerPolicy,
    pub effect_window: Duration,
}

impl StopTrack {
    pub fn new(stops: Vec<StopDefinition>) -> Self {
        Self {
            stops,
            retrigger: RetriggerPolicy::default(),
            effect_window: Duration::from_millis(DEFAULT_EFFECT_WINDOW_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineSpec {
    pub config: TimelineConfig,
    pub item_count: usize,
}

/// Authored configuration of one scroll-driven page.
#[derive(Clone, Debug, PartialEq)]
pub struct OrchestratorConfig {
    pub progress_mode: ProgressMode,
    pub camera: Option<CameraTrack>,
    pub stops: Option<StopTrack>,
    pub timelines: Vec<TimelineSpec>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            progress_mode: ProgressMode::Document,
            camera: None,
            stops: None,
            timelines: Vec::new(),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutput {
    pub frame: u64,
    pub progress: f32,
    pub chapter: Option<ChapterState>,
    pub camera: Option<CameraState>,
    /// Effects fired on this frame only.
    pub effects: SmallVec<[EffectEvent; 4]>,
    /// Flash still live from an earlier firing, already faded.
    pub flash: Option<FlashState>,
    pub items: Vec<ItemTransform>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

struct CameraRig {
    chapters: Vec<Chapter>,
    smoothing: f32,
    interpolator: CameraInterpolator,
}

pub struct Orchestrator<R: FrameRenderer> {
    source: ScrollProgressSource,
    pending: Option<ScrollSample>,
    camera: Option<CameraRig>,
    stops: Option<StopTriggerEngine>,
    arena: TimelineArena,
    timeline_items: Vec<(TimelineId, Vec<ItemId>)>,
    renderer: R,
    lifecycle: Lifecycle,
    out: FrameOutput,
    last_chapter: Option<usize>,
}

impl<R: FrameRenderer> Orchestrator<R> {
    pub fn new(config: OrchestratorConfig, renderer: R) -> Result<Self> {
        let camera = match config.camera {
            Some(track) => {
                validate_chapters(&track.chapters)?;
                if !track.smoothing.is_finite() || track.smoothing <= 0.0 || track.smoothing > 1.0
                {
                    return Err(invalid(format!(
                        "smoothing {} must be in (0, 1]",
                        track.smoothing
                    )));
                }
                Some(CameraRig {
                    chapters: track.chapters,
                    smoothing: track.smoothing,
                    interpolator: CameraInterpolator::new(),
                })
            }
            None => None,
        };
        let stops = match config.stops {
            Some(track) => Some(StopTriggerEngine::with_policy(
                track.stops,
                track.retrigger,
                track.effect_window,
            )?),
            None => None,
        };

        let mut orchestrator = Self {
            source: ScrollProgressSource::new(config.progress_mode),
            pending: None,
            camera,
            stops,
            arena: TimelineArena::new(),
            timeline_items: Vec::new(),
            renderer,
            lifecycle: Lifecycle::Created,
            out: FrameOutput::default(),
            last_chapter: None,
        };
        for spec in config.timelines {
            orchestrator.add_timeline(spec.config, spec.item_count)?;
        }
        Ok(orchestrator)
    }

    /// Register a timeline with items `0..item_count`; returns their ids in index order.
    pub fn add_timeline(
        &mut self,
        config: TimelineConfig,
        item_count: usize,
    ) -> Result<(TimelineId, Vec<ItemId>)> {
        if self.lifecycle == Lifecycle::Unmounted {
            return Err(invalid("cannot register a timeline after unmount"));
        }
        let id = self.arena.add_timeline(config)?;
        let items = self.arena.add_items(id, item_count)?;
        self.timeline_items.push((id, items.clone()));
        Ok((id, items))
    }

    pub fn timeline_items(&self, timeline: TimelineId) -> &[ItemId] {
        self.timeline_items
            .iter()
            .find(|(id, _)| *id == timeline)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Liveness flag checked before every tick.
    pub fn is_live(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn progress(&self) -> f32 {
        self.source.progress()
    }

    pub fn stops(&self) -> Option<&StopTriggerEngine> {
        self.stops.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn mount(&mut self) {
        match self.lifecycle {
            Lifecycle::Created => {
                self.lifecycle = Lifecycle::Mounted;
                log::info!(
                    "[orchestrator] mounted: camera={} stops={} items={}",
                    self.camera.is_some(),
                    self.stops.as_ref().map_or(0, |s| s.stops().len()),
                    self.arena.len()
                );
            }
            Lifecycle::Mounted => {}
            Lifecycle::Unmounted => log::warn!("[orchestrator] mount after unmount ignored"),
        }
    }

    /// Stop ticking and drop every per-item registration. Terminal; a remount
    /// builds a fresh orchestrator.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        self.pending = None;
        self.arena.clear();
        self.timeline_items.clear();
        self.out.items.clear();
        if let Some(stops) = &mut self.stops {
            stops.reset();
        }
        if let Some(rig) = &mut self.camera {
            rig.interpolator.reset();
        }
        log::info!("[orchestrator] unmounted");
    }

    /// Record a scroll sample; only the latest one before a tick is used.
    pub fn sample(&mut self, sample: ScrollSample) {
        if self.lifecycle != Lifecycle::Unmounted {
            self.pending = Some(sample);
        }
    }

    /// Run one frame and hand the result to the renderer.
    ///
    /// Returns false (and renders nothing) when the page is not mounted.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_live() {
            return false;
        }
        if let Some(sample) = self.pending.take() {
            self.source.on_sample(sample);
        }
        let progress = self.source.progress();

        let out = &mut self.out;
        out.frame += 1;
        out.progress = progress;
        out.effects.clear();
        out.flash = None;

        out.chapter = None;
        if let Some(rig) = &mut self.camera {
            if let Ok(state) = chapter::index(progress, rig.chapters.len()) {
                if self.last_chapter != Some(state.chapter_index) {
                    log::debug!("[orchestrator] chapter {}", state.chapter_index);
                    self.last_chapter = Some(state.chapter_index);
                }
                let s = smoothing_for_dt(rig.smoothing, dt.as_secs_f32());
                out.camera = rig.interpolator.interpolate_state(&rig.chapters, state, s);
                out.chapter = Some(state);
            }
        }

        if let Some(stops) = &mut self.stops {
            for fired in stops.update(progress, dt) {
                out.effects.extend(fired.events());
            }
            out.flash = stops.active_effect().and_then(|active| {
                let flash = stops.stops().get(active.stop_index)?.effect.flash?;
                Some(FlashState {
                    position: flash.position,
                    color: flash.color,
                    intensity: flash.intensity * active.strength(),
                })
            });
        }

        self.arena.scrub_into(progress, &mut out.items);
        self.renderer.render(out);
        true
    }
}
