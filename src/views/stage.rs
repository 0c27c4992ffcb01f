// src/views/stage.rs
//
// The host model: everything a marquee instance observes about its
// surroundings. The nannou app (or a test) keeps it current.

use nannou::prelude::*;
use std::collections::HashSet;

#[derive(Debug)]
pub struct Stage {
    pub viewport: Rect,
    pub pointer: Point2,
    /// Window focus stands in for tab visibility.
    pub focused: bool,
    style_rules: HashSet<String>,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::from_x_y_w_h(0.0, 0.0, width, height),
            pointer: pt2(f32::MIN, f32::MIN),
            focused: true,
            style_rules: HashSet::new(),
        }
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport.w()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Rect::from_x_y_w_h(self.viewport.x(), self.viewport.y(), width, height);
    }

    /// Idempotent shared style injection: returns true only for the
    /// call that actually inserted the rule. Safe to call from every
    /// instance.
    pub fn ensure_style_rule(&mut self, id: &str) -> bool {
        self.style_rules.insert(id.to_string())
    }

    pub fn has_style_rule(&self, id: &str) -> bool {
        self.style_rules.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_rule_injected_once() {
        let mut stage = Stage::new(800.0, 600.0);
        assert!(!stage.has_style_rule("strip-keyframes"));
        assert!(stage.ensure_style_rule("strip-keyframes"));
        assert!(!stage.ensure_style_rule("strip-keyframes"));
        assert!(stage.has_style_rule("strip-keyframes"));
    }
}
