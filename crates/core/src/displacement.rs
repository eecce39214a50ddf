//! Per-pixel displacement fields for backdrop refraction.
//!
//! A [`DisplacementField`] samples a [`Warp`] at every pixel of a region and
//! stores the raw pixel offset `(dx, dy)` between each pixel and the point the
//! warp sends it to. [`DisplacementField::encode`] packs those offsets into an
//! RGBA8 raster for a two-channel displacement compositor (R = horizontal,
//! G = vertical), normalized by [`DisplacementField::max_scale`].

use glam::DVec2;

use crate::error::FxError;
use crate::warp::Warp;

/// Offsets at or below this many pixels count as no movement.
const MIN_OFFSET_PX: f64 = 1e-9;

/// Raw per-pixel offsets produced by a warp over a `width * height` region.
#[derive(Debug, Clone)]
pub struct DisplacementField {
    width: usize,
    height: usize,
    warp: Warp,
    offsets: Vec<DVec2>,
    max_scale: f64,
}

/// RGBA8 raster plus the absolute scale the compositor multiplies it by.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedMap {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
    pub scale: f64,
}

impl DisplacementField {
    /// Samples `warp` over every pixel of a `width * height` region.
    ///
    /// Returns `FxError::InvalidDimensions` for zero or overflowing sizes and
    /// `FxError::DegenerateWarp` when no pixel moves by more than
    /// rounding noise.
    pub fn generate(width: usize, height: usize, warp: Warp) -> Result<Self, FxError> {
        if width == 0 || height == 0 {
            return Err(FxError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(FxError::InvalidDimensions)?;

        let size = DVec2::new(width as f64, height as f64);
        let mut offsets = Vec::with_capacity(len);
        let mut max_offset = 0.0_f64;

        for y in 0..height {
            for x in 0..width {
                let uv = DVec2::new(x as f64, y as f64) / size;
                let offset = (warp(uv) - uv) * size;
                max_offset = max_offset.max(offset.abs().max_element());
                offsets.push(offset);
            }
        }

        if !max_offset.is_finite() || max_offset <= MIN_OFFSET_PX {
            return Err(FxError::DegenerateWarp { width, height });
        }
        let max_scale = max_offset * 0.5;

        Ok(Self {
            width,
            height,
            warp,
            offsets,
            max_scale,
        })
    }

    /// Re-samples the stored warp over a new region, e.g. after the target
    /// element was resized. On error the field is left unchanged.
    pub fn regenerate(&mut self, width: usize, height: usize) -> Result<(), FxError> {
        *self = Self::generate(width, height, self.warp)?;
        Ok(())
    }

    /// Region width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Region height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Half the largest absolute offset component over the region.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Raw offsets in row-major order.
    pub fn offsets(&self) -> &[DVec2] {
        &self.offsets
    }

    /// Raw offset at pixel `(x, y)`, or `None` outside the region.
    pub fn offset(&self, x: usize, y: usize) -> Option<DVec2> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.offsets[y * self.width + x])
    }

    /// Packs offsets into RGBA8: `R`/`G` hold `offset / max_scale + 0.5`
    /// clamped to [0, 1], `B` is unused and `A` is opaque.
    pub fn encode(&self) -> EncodedMap {
        let rgba = self
            .offsets
            .iter()
            .flat_map(|offset| {
                let r = encode_channel(offset.x, self.max_scale);
                let g = encode_channel(offset.y, self.max_scale);
                [r, g, 0u8, 255u8]
            })
            .collect();
        EncodedMap {
            width: self.width,
            height: self.height,
            rgba,
            scale: self.max_scale,
        }
    }
}

fn encode_channel(offset: f64, max_scale: f64) -> u8 {
    ((offset / max_scale + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warp::{identity, liquid_glass, rounded_rect};

    fn shift_right(uv: DVec2) -> DVec2 {
        uv + DVec2::new(0.25, 0.0)
    }

    fn nudge(uv: DVec2) -> DVec2 {
        uv + DVec2::splat(1e-14)
    }

    #[test]
    fn generate_rejects_zero_dimensions() {
        assert!(matches!(
            DisplacementField::generate(0, 10, liquid_glass),
            Err(FxError::InvalidDimensions)
        ));
        assert!(matches!(
            DisplacementField::generate(10, 0, liquid_glass),
            Err(FxError::InvalidDimensions)
        ));
    }

    #[test]
    fn generate_rejects_overflowing_dimensions() {
        assert!(matches!(
            DisplacementField::generate(usize::MAX, 2, liquid_glass),
            Err(FxError::InvalidDimensions)
        ));
    }

    #[test]
    fn identity_warp_is_degenerate() {
        let result = DisplacementField::generate(32, 16, identity);
        assert!(matches!(
            result,
            Err(FxError::DegenerateWarp {
                width: 32,
                height: 16
            })
        ));
    }

    #[test]
    fn identity_warp_is_degenerate_at_non_power_of_two_sizes() {
        for (w, h) in [(22, 22), (100, 100), (120, 120), (7, 13)] {
            assert!(
                matches!(
                    DisplacementField::generate(w, h, identity),
                    Err(FxError::DegenerateWarp { .. })
                ),
                "{w}x{h}"
            );
        }
    }

    #[test]
    fn sub_pixel_noise_is_degenerate() {
        assert!(matches!(
            DisplacementField::generate(120, 120, nudge),
            Err(FxError::DegenerateWarp {
                width: 120,
                height: 120
            })
        ));
    }

    #[test]
    fn uniform_shift_has_expected_scale_and_offsets() {
        let field = DisplacementField::generate(8, 4, shift_right).unwrap();
        // 0.25 * 8 = 2 pixels everywhere, halved.
        assert!((field.max_scale() - 1.0).abs() < 1e-12);
        for offset in field.offsets() {
            assert!((offset.x - 2.0).abs() < 1e-12);
            assert!(offset.y.abs() < 1e-12);
        }
    }

    #[test]
    fn encode_layout_and_channels() {
        let field = DisplacementField::generate(8, 4, shift_right).unwrap();
        let map = field.encode();
        assert_eq!(map.rgba.len(), 8 * 4 * 4);
        assert_eq!(map.width, 8);
        assert_eq!(map.height, 4);
        assert!((map.scale - field.max_scale()).abs() < f64::EPSILON);
        for px in map.rgba.chunks_exact(4) {
            // 2 / 1 + 0.5 clamps to 1.0, dy = 0 encodes to mid-grey.
            assert_eq!(px, [255, 128, 0, 255]);
        }
    }

    #[test]
    fn liquid_glass_centre_pixel_has_no_offset() {
        let field = DisplacementField::generate(64, 64, liquid_glass).unwrap();
        let centre = field.offset(32, 32).unwrap();
        assert!(centre.length() < 1e-9, "centre moved by {centre}");
    }

    #[test]
    fn liquid_glass_corner_offset_is_the_maximum() {
        let field = DisplacementField::generate(64, 64, liquid_glass).unwrap();
        // Pixel (0, 0) maps to the centre: offset 32 on both axes.
        let corner = field.offset(0, 0).unwrap();
        assert!((corner - DVec2::splat(32.0)).length() < 1e-9);
        assert!((field.max_scale() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn liquid_glass_offsets_mirror_across_axes() {
        let field = DisplacementField::generate(64, 64, liquid_glass).unwrap();
        for k in 1..20 {
            let right = field.offset(32 + k, 32).unwrap();
            let left = field.offset(32 - k, 32).unwrap();
            let down = field.offset(32, 32 + k).unwrap();
            assert!((right.x + left.x).abs() < 1e-9, "k={k}: {right} vs {left}");
            assert!((right.x - down.y).abs() < 1e-9, "k={k}: {right} vs {down}");
        }
    }

    #[test]
    fn offset_outside_region_is_none() {
        let field = DisplacementField::generate(4, 4, liquid_glass).unwrap();
        assert!(field.offset(4, 0).is_none());
        assert!(field.offset(0, 4).is_none());
    }

    #[test]
    fn generate_is_idempotent() {
        let a = DisplacementField::generate(40, 24, rounded_rect).unwrap();
        let b = DisplacementField::generate(40, 24, rounded_rect).unwrap();
        assert_eq!(a.max_scale().to_bits(), b.max_scale().to_bits());
        assert_eq!(a.encode(), b.encode());
    }

    #[test]
    fn regenerate_resizes_with_same_warp() {
        let mut field = DisplacementField::generate(16, 16, liquid_glass).unwrap();
        field.regenerate(48, 32).unwrap();
        let fresh = DisplacementField::generate(48, 32, liquid_glass).unwrap();
        assert_eq!(field.width(), 48);
        assert_eq!(field.height(), 32);
        assert_eq!(field.encode(), fresh.encode());
    }

    #[test]
    fn failed_regenerate_keeps_previous_field() {
        let mut field = DisplacementField::generate(16, 16, liquid_glass).unwrap();
        let before = field.encode();
        assert!(field.regenerate(0, 16).is_err());
        assert_eq!(field.encode(), before);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn max_scale_is_positive_for_lens_warps(w in 2_usize..48, h in 2_usize..48) {
                let glass = DisplacementField::generate(w, h, liquid_glass).unwrap();
                let pill = DisplacementField::generate(w, h, rounded_rect).unwrap();
                prop_assert!(glass.max_scale() > 0.0);
                prop_assert!(pill.max_scale() > 0.0);
            }

            #[test]
            fn identity_is_degenerate_at_any_size(w in 1_usize..256, h in 1_usize..256) {
                let is_degenerate = matches!(
                    DisplacementField::generate(w, h, identity),
                    Err(FxError::DegenerateWarp { .. })
                );
                prop_assert!(is_degenerate);
            }

            #[test]
            fn encoded_alpha_opaque_and_blue_unused(w in 1_usize..32, h in 1_usize..32) {
                let map = DisplacementField::generate(w, h, shift_right).unwrap().encode();
                prop_assert_eq!(map.rgba.len(), w * h * 4);
                for px in map.rgba.chunks_exact(4) {
                    prop_assert_eq!(px[2], 0);
                    prop_assert_eq!(px[3], 255);
                }
            }
        }
    }
}
