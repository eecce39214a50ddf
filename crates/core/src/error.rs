//! Error types for glass-fx.

use thiserror::Error;

/// Errors produced by effect setup and displacement-field generation.
///
/// None of these are fatal to a page: callers degrade to "effect does not
/// run" and log the reason.
#[derive(Debug, Error)]
pub enum FxError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The warp produced no displacement anywhere over the sampled region.
    #[error("degenerate warp: zero displacement over a {width}x{height} region")]
    DegenerateWarp { width: usize, height: usize },

    /// A requested effect name is not registered.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// A requested warp name is not registered.
    #[error("unknown warp: {0}")]
    UnknownWarp(String),

    /// A slideshow was constructed without any images.
    #[error("slideshow needs at least one image")]
    EmptySlideshow,

    /// The element an effect attaches to is not present in the page.
    #[error("missing anchor element: {0}")]
    MissingAnchor(String),

    /// A host facility (window, document, 2d context, ...) is unavailable.
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// Writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}
