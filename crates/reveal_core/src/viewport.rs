//! Viewport state
//!
//! Scroll offset and viewport size are read-only inputs shared by every
//! active scroll gate.

use serde::{Deserialize, Serialize};

/// The visible window onto the document
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Document-space y of the viewport's top edge
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Document-space y of the line at `fraction` of the viewport height
    pub fn line_at(&self, fraction: f32) -> f32 {
        self.scroll_y + fraction * self.height
    }

    /// Whether a document-space y is above (or on) the line at `fraction`
    pub fn is_past(&self, y: f32, fraction: f32) -> bool {
        y <= self.line_at(fraction)
    }

    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// An environment event consumed by scroll gates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScrollEvent {
    /// The document scrolled to a new offset
    Scroll { scroll_y: f32 },
    /// The viewport changed size
    Resize { width: f32, height: f32 },
}

impl Viewport {
    /// Apply an event, returning the scroll delta it caused
    pub fn apply(&mut self, event: ScrollEvent) -> f32 {
        match event {
            ScrollEvent::Scroll { scroll_y } => {
                let delta = scroll_y - self.scroll_y;
                self.scroll_y = scroll_y;
                delta
            }
            ScrollEvent::Resize { width, height } => {
                self.width = width;
                self.height = height;
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_line() {
        let mut viewport = Viewport::new(1280.0, 800.0);
        assert_eq!(viewport.line_at(0.9), 720.0);

        viewport.apply(ScrollEvent::Scroll { scroll_y: 300.0 });
        assert_eq!(viewport.line_at(0.9), 1020.0);
        assert!(viewport.is_past(1000.0, 0.9));
        assert!(!viewport.is_past(1100.0, 0.9));
    }

    #[test]
    fn test_scroll_delta() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.apply(ScrollEvent::Scroll { scroll_y: 120.0 }), 120.0);
        assert_eq!(viewport.apply(ScrollEvent::Scroll { scroll_y: 20.0 }), -100.0);
        assert_eq!(
            viewport.apply(ScrollEvent::Resize {
                width: 400.0,
                height: 600.0
            }),
            0.0
        );
        assert_eq!(viewport.height, 600.0);
    }
}
