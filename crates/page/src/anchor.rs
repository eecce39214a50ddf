//! In-page anchor links that scroll smoothly instead of jumping.

/// What the bindings hand to `scrollIntoView` for an intercepted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Id of the element to bring into view.
    pub target_id: String,
    pub smooth: bool,
    /// Align the target's top edge with the top of the viewport.
    pub align_start: bool,
}

/// Element id referenced by an in-page `href`, if any.
///
/// Only `#id` with a non-empty id qualifies: a bare `#` names no element.
pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return None;
    }
    Some(id)
}

impl ScrollRequest {
    /// Smooth, top-aligned scroll request for `href`, if it names an element.
    pub fn for_href(href: &str) -> Option<Self> {
        anchor_target(href).map(|id| Self {
            target_id: id.to_owned(),
            smooth: true,
            align_start: true,
        })
    }
}
