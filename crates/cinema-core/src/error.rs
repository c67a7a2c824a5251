use thiserror::Error;

/// Errors raised while setting up a scroll-driven page.
///
/// Frame-time code never returns these; numeric trouble there degrades to the
/// last good state instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CinemaError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("degenerate scroll extent {extent}")]
    DegenerateScrollExtent { extent: f32 },
}

pub type Result<T> = std::result::Result<T, CinemaError>;

pub(crate) fn invalid(msg: impl Into<String>) -> CinemaError {
    CinemaError::InvalidConfiguration(msg.into())
}
