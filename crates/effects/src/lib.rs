#![deny(unsafe_code)]
//! Effect and warp registry shared by the CLI and the WASM bindings.
//!
//! This crate sits between `glass-fx-core` (which defines the `Effect` trait
//! and the displacement generator) and the effect crates (`glass-fx-bubble`,
//! `glass-fx-page`). It also builds the SVG filter markup the compositor
//! consumes and, behind the `png` feature, writes displacement maps to disk.

pub mod filter;
pub mod preview;

#[cfg(feature = "png")]
pub mod snapshot;

use glass_fx_bubble::{BouncingBubble, FloatingBubble};
use glass_fx_core::error::FxError;
use glass_fx_core::geometry::{Frame, Viewport};
use glass_fx_core::scene::Scene;
use glass_fx_core::warp::{self, Warp};
use glass_fx_core::Effect;
use glass_fx_page::CursorFollower;
use glam::DVec2;
use serde_json::Value;

/// All available effect names.
const EFFECT_NAMES: &[&str] = &["bubble", "floating-bubble", "cursor-follower"];

/// All available warp names.
const WARP_NAMES: &[&str] = &["liquid-glass", "rounded-rect"];

/// Every motion effect that can be driven by name.
///
/// Wraps each implementation and delegates `Effect` trait methods.
/// Use [`EffectKind::from_name`] for string-based construction (CLI, WASM).
pub enum EffectKind {
    /// Elastic bounce off the viewport edges.
    Bubble(BouncingBubble),
    /// Ambient float that eases toward a target and shies away from the pointer.
    FloatingBubble(FloatingBubble),
    /// Lagging cursor follower.
    CursorFollower(CursorFollower),
}

impl EffectKind {
    /// Constructs an effect by name.
    ///
    /// Returns `FxError::UnknownEffect` if the name is not recognized.
    pub fn from_name(
        name: &str,
        viewport: Viewport,
        seed: u64,
        params: &Value,
    ) -> Result<Self, FxError> {
        let effect = match name {
            "bubble" => EffectKind::Bubble(BouncingBubble::from_json(viewport, seed, params)),
            "floating-bubble" => {
                EffectKind::FloatingBubble(FloatingBubble::from_json(viewport, params))
            }
            "cursor-follower" => EffectKind::CursorFollower(CursorFollower::from_json(params)),
            _ => return Err(FxError::UnknownEffect(name.to_string())),
        };
        log::debug!("constructed effect {name} in {}x{}", viewport.width, viewport.height);
        Ok(effect)
    }

    /// Constructs the effect a scene describes.
    pub fn from_scene(scene: &Scene) -> Result<Self, FxError> {
        scene.validate()?;
        Self::from_name(&scene.effect, scene.viewport()?, scene.seed, &scene.params)
    }

    /// Returns a slice of all recognized effect names.
    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }
}

impl Effect for EffectKind {
    fn tick(&mut self, frame: &Frame) -> Result<(), FxError> {
        match self {
            EffectKind::Bubble(e) => e.tick(frame),
            EffectKind::FloatingBubble(e) => e.tick(frame),
            EffectKind::CursorFollower(e) => e.tick(frame),
        }
    }

    fn position(&self) -> DVec2 {
        match self {
            EffectKind::Bubble(e) => e.position(),
            EffectKind::FloatingBubble(e) => e.position(),
            EffectKind::CursorFollower(e) => e.position(),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        match self {
            EffectKind::Bubble(e) => e.resize(viewport),
            EffectKind::FloatingBubble(e) => e.resize(viewport),
            EffectKind::CursorFollower(e) => e.resize(viewport),
        }
    }

    fn params(&self) -> Value {
        match self {
            EffectKind::Bubble(e) => e.params(),
            EffectKind::FloatingBubble(e) => e.params(),
            EffectKind::CursorFollower(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EffectKind::Bubble(e) => e.param_schema(),
            EffectKind::FloatingBubble(e) => e.param_schema(),
            EffectKind::CursorFollower(e) => e.param_schema(),
        }
    }

    fn glass_footprint(&self) -> Option<usize> {
        match self {
            EffectKind::Bubble(e) => e.glass_footprint(),
            EffectKind::FloatingBubble(e) => e.glass_footprint(),
            EffectKind::CursorFollower(e) => e.glass_footprint(),
        }
    }
}

/// Looks up a warp function by name.
///
/// Returns `FxError::UnknownWarp` if the name is not recognized.
pub fn warp_by_name(name: &str) -> Result<Warp, FxError> {
    match name {
        "liquid-glass" => Ok(warp::liquid_glass),
        "rounded-rect" => Ok(warp::rounded_rect),
        _ => Err(FxError::UnknownWarp(name.to_string())),
    }
}

/// Returns a slice of all recognized warp names.
pub fn list_warps() -> &'static [&'static str] {
    WARP_NAMES
}

/// Runs a scene to completion and returns the effect in its final state.
///
/// The scene pointer, when set, is held still for every tick.
pub fn run_scene(scene: &Scene) -> Result<EffectKind, FxError> {
    let mut effect = EffectKind::from_scene(scene)?;
    let mut frame = Frame::new(scene.viewport()?);
    if let Some([x, y]) = scene.pointer {
        frame = frame.with_pointer(DVec2::new(x, y));
    }
    (0..scene.ticks).try_for_each(|_| effect.tick(&frame))?;
    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_fx_core::DisplacementField;
    use serde_json::json;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn from_name_builds_every_listed_effect() {
        for name in EffectKind::list_effects() {
            let effect = EffectKind::from_name(name, viewport(), 42, &json!({}));
            assert!(effect.is_ok(), "{name} failed to build");
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EffectKind::from_name("nonexistent", viewport(), 42, &json!({}));
        assert!(matches!(result, Err(FxError::UnknownEffect(_))));
    }

    #[test]
    fn warp_lookup() {
        for name in list_warps() {
            assert!(warp_by_name(name).is_ok(), "{name} missing");
        }
        assert!(matches!(
            warp_by_name("fisheye"),
            Err(FxError::UnknownWarp(_))
        ));
    }

    #[test]
    fn every_listed_warp_generates_a_field() {
        for name in list_warps() {
            let warp = warp_by_name(name).unwrap();
            let field = DisplacementField::generate(32, 32, warp).unwrap();
            assert!(field.max_scale() > 0.0, "{name} is degenerate");
        }
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let effect = EffectKind::from_name("bubble", viewport(), 42, &json!({"size": 80})).unwrap();
        assert_eq!(effect.params()["size"], json!(80.0));
        assert!(effect.param_schema().get("restitution").is_some());
        assert_eq!(effect.glass_footprint(), Some(80));

        let cursor = EffectKind::from_name("cursor-follower", viewport(), 42, &json!({})).unwrap();
        assert!(cursor.glass_footprint().is_none());
    }

    #[test]
    fn determinism_same_seed() {
        let mut scene = Scene::new("bubble", 640, 480, 99);
        scene.ticks = 200;
        let a = run_scene(&scene).unwrap();
        let b = run_scene(&scene).unwrap();
        assert_eq!(a.position().to_array(), b.position().to_array());
    }

    #[test]
    fn run_scene_applies_pointer() {
        let mut scene = Scene::new("cursor-follower", 800, 600, 1);
        scene.ticks = 500;
        scene.pointer = Some([300.0, 200.0]);
        let effect = run_scene(&scene).unwrap();
        assert!(effect.position().distance(DVec2::new(300.0, 200.0)) < 1e-6);
    }

    #[test]
    fn run_scene_rejects_unknown_effect() {
        let scene = Scene::new("nope", 100, 100, 1);
        assert!(matches!(run_scene(&scene), Err(FxError::UnknownEffect(_))));
    }

    #[test]
    fn object_safety() {
        let effect = EffectKind::from_name("floating-bubble", viewport(), 42, &json!({})).unwrap();
        let boxed: Box<dyn Effect> = Box::new(effect);
        assert!(boxed.position().is_finite());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bubble_scene_stays_in_bounds(
                seed in any::<u64>(),
                ticks in 0_usize..300,
                width in 1_usize..1600,
                height in 1_usize..1200,
                size in 1.0_f64..400.0,
            ) {
                let mut scene = Scene::new("bubble", width, height, seed);
                scene.ticks = ticks;
                scene.params = json!({ "size": size });
                let effect = run_scene(&scene).unwrap();
                let max = scene.viewport().unwrap().max_position(size);
                let p = effect.position();
                prop_assert!(p.x >= 0.0 && p.x <= max.x + 1e-9, "x={} max={}", p.x, max.x);
                prop_assert!(p.y >= 0.0 && p.y <= max.y + 1e-9, "y={} max={}", p.y, max.y);
            }

            #[test]
            fn floating_scene_with_pointer_stays_finite(
                seed in any::<u64>(),
                ticks in 0_usize..300,
                px in -500.0_f64..2000.0,
                py in -500.0_f64..2000.0,
            ) {
                let mut scene = Scene::new("floating-bubble", 1024, 768, seed);
                scene.ticks = ticks;
                scene.pointer = Some([px, py]);
                let effect = run_scene(&scene).unwrap();
                prop_assert!(effect.position().is_finite());
            }
        }
    }
}
