#![deny(unsafe_code)]
//! Supporting page components for glass-fx.
//!
//! Each component is a small piece of DOM-independent state so its behaviour
//! can be tested natively; the WASM bindings only translate its outputs into
//! class toggles, styles and canvas calls.

pub mod anchor;
pub mod cursor;
pub mod grid;
pub mod nav;
pub mod reveal;
pub mod slideshow;

pub use anchor::{anchor_target, ScrollRequest};
pub use cursor::{cursor_supported, CursorFollower, CursorParams};
pub use grid::{GridBackground, GridLine, GridParams};
pub use nav::{NavOverlay, NavTransition};
pub use reveal::{visible_ratio, Reveal, RevealParams};
pub use slideshow::{css_url, SlideChange, Slideshow};
