//! SVG filter markup for the glass compositor.
//!
//! The browser refracts whatever sits behind an element when that element's
//! `backdrop-filter` references an SVG filter of the form
//! `feImage(map) -> feDisplacementMap(SourceGraphic, map)`. The map is an
//! [`EncodedMap`] served as a data URL; its scale goes straight into the
//! displacement primitive.

use glass_fx_core::EncodedMap;

/// Default blur radius in CSS pixels applied after refraction.
pub const DEFAULT_BLUR_PX: f64 = 0.25;
/// Default saturation multiplier applied after refraction.
pub const DEFAULT_SATURATION: f64 = 1.1;

/// Everything needed to emit one glass filter definition.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassFilter {
    /// Element id of the `<filter>`; referenced as `url(#id)`.
    pub id: String,
    pub width: usize,
    pub height: usize,
    /// Displacement scale handed to `feDisplacementMap`.
    pub scale: f64,
    pub blur_px: f64,
    pub saturation: f64,
}

impl GlassFilter {
    /// Filter sized and scaled for `map`, with the default backdrop treatment.
    pub fn for_map(id: &str, map: &EncodedMap) -> Self {
        Self {
            id: id.to_string(),
            width: map.width,
            height: map.height,
            scale: map.scale,
            blur_px: DEFAULT_BLUR_PX,
            saturation: DEFAULT_SATURATION,
        }
    }

    /// Standalone, zero-size `<svg>` holding the filter definition.
    ///
    /// `map_href` is the URL of the encoded displacement map (usually a
    /// `data:image/png` URL).
    pub fn svg_markup(&self, map_href: &str) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0" "#,
                r#"style="position:fixed;top:0;left:0;pointer-events:none;">"#,
                r#"<defs><filter id="{id}" filterUnits="userSpaceOnUse" "#,
                r#"color-interpolation-filters="sRGB" x="0" y="0" width="{w}" height="{h}">"#,
                r#"<feImage result="{id}-map" width="{w}" height="{h}" href="{href}"/>"#,
                r#"<feDisplacementMap in="SourceGraphic" in2="{id}-map" "#,
                r#"xChannelSelector="R" yChannelSelector="G" scale="{scale}"/>"#,
                r#"</filter></defs></svg>"#,
            ),
            id = escape_attr(&self.id),
            w = self.width,
            h = self.height,
            href = escape_attr(map_href),
            scale = format_number(self.scale),
        )
    }

    /// CSS value for `backdrop-filter` on the refracting element.
    pub fn backdrop_css(&self) -> String {
        format!(
            "url(#{}) blur({}px) saturate({})",
            self.id,
            format_number(self.blur_px),
            format_number(self.saturation)
        )
    }
}

/// At most three decimals, trailing zeros dropped.
fn format_number(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_fx_core::warp::liquid_glass;
    use glass_fx_core::DisplacementField;

    fn filter() -> GlassFilter {
        let map = DisplacementField::generate(64, 64, liquid_glass)
            .unwrap()
            .encode();
        GlassFilter::for_map("bubble-glass", &map)
    }

    #[test]
    fn markup_wires_map_into_displacement() {
        let svg = filter().svg_markup("data:image/png;base64,AAAA");
        assert!(svg.contains(r#"<filter id="bubble-glass""#));
        assert!(svg.contains(r#"href="data:image/png;base64,AAAA""#));
        assert!(svg.contains(r#"in2="bubble-glass-map""#));
        assert!(svg.contains(r#"xChannelSelector="R" yChannelSelector="G""#));
        assert!(svg.contains(r#"scale="16""#));
        assert!(svg.contains(r#"width="64" height="64""#));
    }

    #[test]
    fn backdrop_references_filter() {
        assert_eq!(
            filter().backdrop_css(),
            "url(#bubble-glass) blur(0.25px) saturate(1.1)"
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        let svg = filter().svg_markup(r#"x"onload="y"#);
        assert!(!svg.contains(r#"x"onload"#));
        assert!(svg.contains("x&quot;onload=&quot;y"));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1.23456), "1.235");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0001), "0");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn formatted_numbers_parse_back_without_negative_zero(value in -1.0e6_f64..1.0e6) {
                let text = format_number(value);
                prop_assert_ne!(text.as_str(), "-0");
                prop_assert!(!text.ends_with('.'));
                let parsed: f64 = text.parse().unwrap();
                prop_assert!((parsed - value).abs() <= 0.0005 + value.abs() * 1e-12);
            }

            #[test]
            fn escaped_attributes_carry_no_raw_quotes_or_brackets(raw in ".*") {
                let escaped = escape_attr(&raw);
                prop_assert!(!escaped.contains('"'));
                prop_assert!(!escaped.contains('<'));
                prop_assert!(!escaped.contains('>'));
            }
        }
    }
}
