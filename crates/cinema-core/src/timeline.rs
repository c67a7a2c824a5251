//! Scroll-scrubbed per-item transforms (page explosion / book accordion).
//!
//! Each item's pose is a pure function of its index and the timeline config.
//! Scroll only moves the playhead: as progress sweeps the timeline's region the
//! pose is applied from rest (t = 0) to full (t = 1). Items are addressed by
//! integer ids in an arena; the renderer resolves ids to its own nodes.

use crate::constants::{
    DEFAULT_DEPTH_PER_ITEM, DEFAULT_ROTATION_INTENSITY, DEFAULT_SCALE_DECAY_PER_ITEM,
    DEFAULT_TILT_DEGREES, MIN_ITEM_SCALE,
};
use crate::easing::Easing;
use crate::error::{invalid, Result};

/// Slice of overall progress that drives a timeline from start to end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubRegion {
    pub start: f32,
    pub end: f32,
}

impl ScrubRegion {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Playhead position in `[0, 1]` for the given overall progress.
    pub fn position(&self, progress: f32) -> f32 {
        if !progress.is_finite() {
            return 0.0;
        }
        let span = self.end - self.start;
        if span <= 0.0 {
            return if progress >= self.end { 1.0 } else { 0.0 };
        }
        ((progress - self.start) / span).clamp(0.0, 1.0)
    }
}

impl Default for ScrubRegion {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineConfig {
    pub depth_per_item: f32,
    pub rotation_intensity: f32,
    /// +1 or −1; flips which way the alternating fan opens.
    pub rotation_direction: f32,
    pub tilt_degrees: f32,
    pub scale_decay_per_item: f32,
    /// Extra depth per item reached at the end of the region.
    pub spread_per_item: f32,
    /// Opacity lost per item at the end of the region; `None` leaves opacity alone.
    pub fade_per_item: Option<f32>,
    pub region: ScrubRegion,
    pub easing: Easing,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            depth_per_item: DEFAULT_DEPTH_PER_ITEM,
            rotation_intensity: DEFAULT_ROTATION_INTENSITY,
            rotation_direction: 1.0,
            tilt_degrees: DEFAULT_TILT_DEGREES,
            scale_decay_per_item: DEFAULT_SCALE_DECAY_PER_ITEM,
            spread_per_item: 0.0,
            fade_per_item: None,
            region: ScrubRegion::FULL,
            easing: Easing::Linear,
        }
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.depth_per_item,
            self.rotation_intensity,
            self.tilt_degrees,
            self.scale_decay_per_item,
            self.spread_per_item,
            self.fade_per_item.unwrap_or(0.0),
            self.region.start,
            self.region.end,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(invalid("timeline config has non-finite values"));
        }
        if self.rotation_direction != 1.0 && self.rotation_direction != -1.0 {
            return Err(invalid("rotation_direction must be 1 or -1"));
        }
        if self.depth_per_item <= 0.0 {
            return Err(invalid("depth_per_item must be positive"));
        }
        if self.spread_per_item < 0.0 || self.scale_decay_per_item < 0.0 {
            return Err(invalid("spread and scale decay must not be negative"));
        }
        let r = self.region;
        if !(0.0..=1.0).contains(&r.start) || !(0.0..=1.0).contains(&r.end) || r.start >= r.end {
            return Err(invalid(format!(
                "scrub region [{}, {}] must be a non-empty range inside [0, 1]",
                r.start, r.end
            )));
        }
        Ok(())
    }
}

/// Per-item transform handed to the DOM / CSS-3D renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineTransform {
    pub z_offset: f32,
    /// Degrees.
    pub rotate_x: f32,
    /// Degrees.
    pub rotate_y: f32,
    pub scale: f32,
    pub opacity: Option<f32>,
}

impl Default for TimelineTransform {
    fn default() -> Self {
        Self {
            z_offset: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            scale: 1.0,
            opacity: None,
        }
    }
}

/// +1 for even indices, −1 for odd ones; items alternate left/right.
#[inline]
pub fn rotation_sign(item_index: usize) -> f32 {
    if item_index % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Transform of item `item_index` at `progress`.
///
/// The stacking depth `−i · depth_per_item` is always applied so a lower index
/// is always in front; tilt, alternating Y rotation, scale decay, spread and
/// fade are applied in proportion to the eased playhead.
pub fn scrub(progress: f32, item_index: usize, config: &TimelineConfig) -> TimelineTransform {
    let t = config.easing.apply(config.region.position(progress));
    let i = item_index as f32;
    TimelineTransform {
        z_offset: -i * config.depth_per_item - i * config.spread_per_item * t,
        rotate_x: i * config.tilt_degrees * t,
        rotate_y: config.rotation_direction
            * rotation_sign(item_index)
            * i
            * config.rotation_intensity
            * t,
        scale: (1.0 - i * config.scale_decay_per_item * t).max(MIN_ITEM_SCALE),
        opacity: config
            .fade_per_item
            .map(|f| (1.0 - i * f * t).clamp(0.0, 1.0)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineItem {
    pub id: ItemId,
    pub timeline: TimelineId,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTransform {
    pub id: ItemId,
    pub transform: TimelineTransform,
}

/// Arena of timelines and their items. Ids are never reused, so an id held
/// after removal cannot alias a newer item.
#[derive(Debug, Default)]
pub struct TimelineArena {
    timelines: Vec<TimelineConfig>,
    items: Vec<Option<TimelineItem>>,
    // id of `items[0]`; advances on clear so ids stay unique per arena
    first_id: u32,
    live: usize,
}

impl TimelineArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_timeline(&mut self, config: TimelineConfig) -> Result<TimelineId> {
        config.validate()?;
        self.timelines.push(config);
        Ok(TimelineId(self.timelines.len() as u32 - 1))
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&TimelineConfig> {
        self.timelines.get(id.0 as usize)
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn add_item(&mut self, timeline: TimelineId, index: usize) -> Result<ItemId> {
        if self.timeline(timeline).is_none() {
            return Err(invalid(format!("unknown timeline {}", timeline.0)));
        }
        let id = ItemId(self.first_id + self.items.len() as u32);
        self.items.push(Some(TimelineItem {
            id,
            timeline,
            index,
        }));
        self.live += 1;
        Ok(id)
    }

    /// Register items `0..count` of a timeline, in index order.
    pub fn add_items(&mut self, timeline: TimelineId, count: usize) -> Result<Vec<ItemId>> {
        (0..count).map(|i| self.add_item(timeline, i)).collect()
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<TimelineItem> {
        let slot = self.slot(id)?;
        let removed = self.items.get_mut(slot)?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    pub fn get(&self, id: ItemId) -> Option<&TimelineItem> {
        self.items.get(self.slot(id)?)?.as_ref()
    }

    fn slot(&self, id: ItemId) -> Option<usize> {
        id.0.checked_sub(self.first_id).map(|s| s as usize)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drop every timeline and item registration.
    pub fn clear(&mut self) {
        self.timelines.clear();
        self.first_id += self.items.len() as u32;
        self.items.clear();
        self.live = 0;
    }

    pub fn scrub_into(&self, progress: f32, out: &mut Vec<ItemTransform>) {
        out.clear();
        for item in self.items.iter().flatten() {
            if let Some(config) = self.timeline(item.timeline) {
                out.push(ItemTransform {
                    id: item.id,
                    transform: scrub(progress, item.index, config),
                });
            }
        }
    }

    pub fn scrub(&self, progress: f32) -> Vec<ItemTransform> {
        let mut out = Vec::with_capacity(self.live);
        self.scrub_into(progress, &mut out);
        out
    }
}
