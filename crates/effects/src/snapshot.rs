//! PNG output of displacement maps.
//!
//! This module is feature-gated behind `png` (default on) so that WASM builds
//! can depend on the registry without pulling in the `image` crate. The
//! browser encodes maps itself through a canvas.

use glass_fx_core::error::FxError;
use glass_fx_core::{DisplacementField, EncodedMap};
use std::path::Path;

use crate::preview::magnitude_rgba;

/// Writes the compositor-ready map exactly as the browser would consume it.
///
/// Returns `FxError::InvalidDimensions` if the map dimensions overflow `u32`,
/// or `FxError::Io` on write failure.
pub fn write_map_png(map: &EncodedMap, path: &Path) -> Result<(), FxError> {
    write_rgba(map.width, map.height, map.rgba.clone(), path)
}

/// Writes a magnitude preview of `field` (see [`crate::preview`]).
pub fn write_preview_png(field: &DisplacementField, path: &Path) -> Result<(), FxError> {
    write_rgba(field.width(), field.height(), magnitude_rgba(field), path)
}

fn write_rgba(width: usize, height: usize, rgba: Vec<u8>, path: &Path) -> Result<(), FxError> {
    let w = u32::try_from(width).map_err(|_| FxError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| FxError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| FxError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FxError::Io(e.to_string()))?;
    log::debug!("wrote {width}x{height} png to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_fx_core::warp::liquid_glass;

    #[test]
    fn map_png_round_trip_keeps_bytes() {
        let map = DisplacementField::generate(16, 16, liquid_glass)
            .unwrap()
            .encode();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");

        write_map_png(&map, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
        assert_eq!(img.into_raw(), map.rgba);
    }

    #[test]
    fn preview_png_is_written() {
        let field = DisplacementField::generate(12, 8, liquid_glass).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");

        write_preview_png(&field, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (12, 8));
    }

    #[test]
    fn mismatched_buffer_is_an_io_error() {
        let map = EncodedMap {
            width: 4,
            height: 4,
            rgba: vec![0; 3],
            scale: 1.0,
        };
        let dir = tempfile::tempdir().unwrap();
        let result = write_map_png(&map, &dir.path().join("bad.png"));
        assert!(matches!(result, Err(FxError::Io(_))));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let map = DisplacementField::generate(4, 4, liquid_glass)
            .unwrap()
            .encode();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("map.png");
        assert!(matches!(write_map_png(&map, &path), Err(FxError::Io(_))));
    }
}
