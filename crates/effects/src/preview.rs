//! Human-readable rendering of a [`DisplacementField`].
//!
//! The encoded map is hard to read by eye (mid-grey means "no offset"), so
//! previews shade each pixel by offset magnitude instead: black where the
//! backdrop is untouched, white where it moves the most. Always available so
//! the CLI and a debug overlay in the browser can share it.

use glass_fx_core::DisplacementField;

/// RGBA8 buffer of `width * height` pixels shading offset magnitude.
pub fn magnitude_rgba(field: &DisplacementField) -> Vec<u8> {
    let peak = field
        .offsets()
        .iter()
        .map(|o| o.length())
        .fold(0.0_f64, f64::max);

    field
        .offsets()
        .iter()
        .flat_map(|o| {
            let t = if peak > 0.0 { o.length() / peak } else { 0.0 };
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            [v, v, v, 255u8]
        })
        .collect()
}
