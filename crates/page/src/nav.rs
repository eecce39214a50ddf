//! Slide-out navigation overlay state.

/// Result of an overlay input: the state after it and whether it changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTransition {
    pub open: bool,
    pub changed: bool,
}

/// Open/closed state of the overlay. While open, page scroll is locked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavOverlay {
    open: bool,
}

impl NavOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether body scrolling should be disabled.
    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> NavTransition {
        self.set(true)
    }

    pub fn close(&mut self) -> NavTransition {
        self.set(false)
    }

    /// Menu button.
    pub fn toggle(&mut self) -> NavTransition {
        self.set(!self.open)
    }

    /// A link inside the overlay was followed.
    pub fn link_clicked(&mut self) -> NavTransition {
        self.close()
    }

    /// A key was pressed anywhere on the page; only Escape closes.
    pub fn key_pressed(&mut self, key: &str) -> NavTransition {
        if key == "Escape" {
            self.close()
        } else {
            NavTransition {
                open: self.open,
                changed: false,
            }
        }
    }

    fn set(&mut self, open: bool) -> NavTransition {
        let changed = self.open != open;
        self.open = open;
        NavTransition { open, changed }
    }
}
