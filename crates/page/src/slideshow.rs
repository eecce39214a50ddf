//! Hero background slideshow.
//!
//! One background layer per image; exactly one layer is active at a time and
//! the active index advances on a fixed wall-clock interval, independent of
//! the animation frame rate.

use glass_fx_core::error::FxError;
use glass_fx_core::params::{param_strings, param_usize};
use serde_json::Value;

/// Default time between slides.
pub const DEFAULT_INTERVAL_MS: u32 = 5000;

/// Default hero images ("product design" set).
pub const DEFAULT_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=1920&q=80",
    "https://images.unsplash.com/photo-1572044162444-ad60f128bdea?w=1920&q=80",
    "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=1920&q=80",
    "https://images.unsplash.com/photo-1542744173-8e7e53415bb0?w=1920&q=80",
];

/// Layers whose `active` class must change after an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub previous: usize,
    pub current: usize,
}

#[derive(Debug, Clone)]
pub struct Slideshow {
    images: Vec<String>,
    current: usize,
    interval_ms: u32,
}

impl Slideshow {
    /// Returns `FxError::EmptySlideshow` when `images` is empty.
    pub fn new(images: Vec<String>, interval_ms: u32) -> Result<Self, FxError> {
        if images.is_empty() {
            return Err(FxError::EmptySlideshow);
        }
        Ok(Self {
            images,
            current: 0,
            interval_ms: interval_ms.max(1),
        })
    }

    /// Reads `images` (array of URLs) and `interval_ms`, defaulting to the
    /// built-in hero set and five seconds.
    pub fn from_json(params: &Value) -> Result<Self, FxError> {
        let images = param_strings(params, "images", DEFAULT_IMAGES);
        let interval = param_usize(params, "interval_ms", DEFAULT_INTERVAL_MS as usize);
        Self::new(images, u32::try_from(interval).unwrap_or(u32::MAX))
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.current
    }

    /// Moves to the next image, wrapping after the last one.
    pub fn advance(&mut self) -> SlideChange {
        let previous = self.current;
        self.current = (self.current + 1) % self.images.len();
        SlideChange {
            previous,
            current: self.current,
        }
    }
}

/// Quoted CSS `url("...")` for an image, escaping characters that would end
/// the string early.
pub fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len() + 7);
    out.push_str("url(\"");
    for c in url.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\a "),
            '\r' => out.push_str("\\d "),
            c => out.push(c),
        }
    }
    out.push_str("\")");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img-{i}.jpg")).collect()
    }

    #[test]
    fn empty_slideshow_is_rejected() {
        assert!(matches!(
            Slideshow::new(Vec::new(), 5000),
            Err(FxError::EmptySlideshow)
        ));
        assert!(Slideshow::from_json(&json!({"images": []})).is_err());
    }

    #[test]
    fn starts_on_first_image() {
        let show = Slideshow::new(urls(3), 5000).unwrap();
        assert_eq!(show.current(), 0);
        assert!(show.is_active(0));
        assert!(!show.is_active(1));
    }

    #[test]
    fn advance_wraps_around() {
        let mut show = Slideshow::new(urls(3), 5000).unwrap();
        let seen: Vec<SlideChange> = (0..4).map(|_| show.advance()).collect();
        assert_eq!(
            seen,
            vec![
                SlideChange { previous: 0, current: 1 },
                SlideChange { previous: 1, current: 2 },
                SlideChange { previous: 2, current: 0 },
                SlideChange { previous: 0, current: 1 },
            ]
        );
    }

    #[test]
    fn single_image_stays_put() {
        let mut show = Slideshow::new(urls(1), 5000).unwrap();
        assert_eq!(show.advance(), SlideChange { previous: 0, current: 0 });
    }

    #[test]
    fn from_json_defaults_to_hero_set() {
        let show = Slideshow::from_json(&json!({})).unwrap();
        assert_eq!(show.images().len(), DEFAULT_IMAGES.len());
        assert_eq!(show.interval_ms(), DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn from_json_reads_custom_images_and_interval() {
        let show = Slideshow::from_json(&json!({"images": ["a", "b"], "interval_ms": 1200})).unwrap();
        assert_eq!(show.images(), ["a".to_string(), "b".to_string()]);
        assert_eq!(show.interval_ms(), 1200);
    }

    #[test]
    fn zero_interval_is_raised_to_one_ms() {
        let show = Slideshow::new(urls(2), 0).unwrap();
        assert_eq!(show.interval_ms(), 1);
    }

    #[test]
    fn css_url_quotes_plain_paths() {
        assert_eq!(css_url("img/hero 1.jpg"), r#"url("img/hero 1.jpg")"#);
    }

    #[test]
    fn css_url_escapes_string_terminators() {
        assert_eq!(css_url(r#"a"b\c"#), r#"url("a\"b\\c")"#);
        assert_eq!(css_url("a\nb"), r#"url("a\a b")"#);
        assert_eq!(css_url(r#"x"); background: red; ("#), r#"url("x\"); background: red; (")"#);
    }
}
