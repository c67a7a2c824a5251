//! Scroll-synchronized animation core: progress normalization, chapter
//! camera interpolation, one-shot stop effects and scrubbed item timelines.
//!
//! Nothing here touches the DOM or a GPU; frontends feed scroll samples into an
//! [`Orchestrator`] and receive a [`FrameOutput`] per animation frame.

pub mod camera;
pub mod chapter;
pub mod constants;
pub mod easing;
pub mod effects;
pub mod error;
pub mod orchestrator;
pub mod presets;
pub mod progress;
pub mod stops;
pub mod timeline;

pub use camera::*;
pub use chapter::{validate_chapters, Chapter, ChapterState, DirectionalLight};
pub use constants::*;
pub use easing::Easing;
pub use effects::*;
pub use error::{CinemaError, Result};
pub use orchestrator::*;
pub use progress::*;
pub use stops::*;
pub use timeline::*;
