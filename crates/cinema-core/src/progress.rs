use crate::constants::MIN_SCROLL_EXTENT;
use crate::error::{CinemaError, Result};

/// Point where an element edge meets a viewport edge.
///
/// Both fields are fractions: `element` 0 = element top, 1 = element bottom;
/// `viewport` 0 = viewport top, 1 = viewport bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    pub element: f32,
    pub viewport: f32,
}

impl ScrollAnchor {
    pub const fn new(element: f32, viewport: f32) -> Self {
        Self { element, viewport }
    }
}

/// Start/end anchors of an element-relative scroll region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchors {
    pub start: ScrollAnchor,
    pub end: ScrollAnchor,
}

impl ScrollAnchors {
    /// Element bottom at the viewport bottom → element top at the viewport top.
    ///
    /// Elements taller than the viewport have no such travel and stay at 0.
    pub const BOTTOM_TO_TOP: Self = Self {
        start: ScrollAnchor::new(1.0, 1.0),
        end: ScrollAnchor::new(0.0, 0.0),
    };

    /// Element top enters at the viewport bottom → element bottom leaves at the viewport top.
    pub const ENTER_EXIT: Self = Self {
        start: ScrollAnchor::new(0.0, 1.0),
        end: ScrollAnchor::new(1.0, 0.0),
    };

    /// Element top at viewport top → element bottom at viewport bottom (pinned sections).
    pub const CONTAIN: Self = Self {
        start: ScrollAnchor::new(0.0, 0.0),
        end: ScrollAnchor::new(1.0, 1.0),
    };
}

impl Default for ScrollAnchors {
    fn default() -> Self {
        Self::BOTTOM_TO_TOP
    }
}

/// Element bounding box relative to the viewport, as reported by
/// `getBoundingClientRect()` plus the viewport height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementGeometry {
    pub top: f32,
    pub height: f32,
    pub viewport_height: f32,
}

/// What the source measures progress against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressMode {
    Document,
    Element(ScrollAnchors),
}

/// One sampled scroll position, already reduced to the numbers the mode needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollSample {
    Document { offset: f32, extent: f32 },
    Element(ElementGeometry),
}

#[derive(Debug)]
pub struct ScrollProgressSource {
    mode: ProgressMode,
    last: f32,
    degenerate_logged: bool,
}

impl ScrollProgressSource {
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            mode,
            last: 0.0,
            degenerate_logged: false,
        }
    }

    pub fn document() -> Self {
        Self::new(ProgressMode::Document)
    }

    pub fn element(anchors: ScrollAnchors) -> Self {
        Self::new(ProgressMode::Element(anchors))
    }

    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Last progress value this source produced.
    pub fn progress(&self) -> f32 {
        self.last
    }

    /// Document-mode update: `clamp(offset / max(extent, ε), 0, 1)`.
    ///
    /// A zero or negative extent yields 0 and is logged once per source.
    /// Non-finite input keeps the previous value.
    pub fn on_update(&mut self, scroll_offset: f32, scroll_extent: f32) -> f32 {
        if !scroll_offset.is_finite() || !scroll_extent.is_finite() {
            return self.last;
        }
        let p = match try_progress(scroll_offset, scroll_extent) {
            Ok(p) => p,
            Err(e) => {
                if !self.degenerate_logged {
                    log::warn!("[scroll] {e}; holding progress at 0");
                    self.degenerate_logged = true;
                }
                0.0
            }
        };
        self.last = p;
        p
    }

    /// Element-mode update from a bounding rectangle.
    pub fn on_element(&mut self, geometry: ElementGeometry) -> f32 {
        let anchors = match self.mode {
            ProgressMode::Element(a) => a,
            ProgressMode::Document => ScrollAnchors::default(),
        };
        let (offset, extent) = element_offset_extent(geometry, anchors);
        self.on_update(offset, extent)
    }

    pub fn on_sample(&mut self, sample: ScrollSample) -> f32 {
        match sample {
            ScrollSample::Document { offset, extent } => self.on_update(offset, extent),
            ScrollSample::Element(g) => self.on_element(g),
        }
    }
}

/// Strict form of the document mapping; reports a degenerate extent instead of recovering.
pub fn try_progress(scroll_offset: f32, scroll_extent: f32) -> Result<f32> {
    if scroll_extent <= 0.0 {
        return Err(CinemaError::DegenerateScrollExtent {
            extent: scroll_extent,
        });
    }
    Ok((scroll_offset / scroll_extent.max(MIN_SCROLL_EXTENT)).clamp(0.0, 1.0))
}

/// Reduce an element rectangle to `(offset, extent)` for the given anchors.
///
/// The element top position at which each anchor is satisfied is
/// `viewport·vh − element·h`; progress runs from the start position to the end one.
pub fn element_offset_extent(g: ElementGeometry, anchors: ScrollAnchors) -> (f32, f32) {
    let top_at = |a: ScrollAnchor| a.viewport * g.viewport_height - a.element * g.height;
    let top_start = top_at(anchors.start);
    let top_end = top_at(anchors.end);
    (top_start - g.top, top_start - top_end)
}
