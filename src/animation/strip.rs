// src/animation/strip.rs
//
// Timing for the simple looping strip. No per-frame stepping of its
// own: the strip owns a linear, infinitely-repeating translation and
// the host samples offset_at(time), exactly like handing a keyframe
// animation to the browser. Pausing freezes the cycle phase.

use crate::config::AttrMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripDirection {
    Normal,
    Reverse,
}

impl StripDirection {
    pub fn from_attr(value: &str) -> Self {
        if value == "reverse" {
            StripDirection::Reverse
        } else {
            StripDirection::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StripOptions {
    /// Total rendered copies of the content set, original included.
    pub instances: usize,
    pub pixels_per_second: f64,
    pub direction: StripDirection,
    pub pausable: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            instances: 2,
            pixels_per_second: 75.0,
            direction: StripDirection::Normal,
            pausable: false,
        }
    }
}

impl StripOptions {
    pub fn from_attrs(attrs: &AttrMap) -> Self {
        Self {
            instances: attrs.int_or("data-instances", 2).max(1) as usize,
            pixels_per_second: attrs.float_or("data-speed", 75.0),
            direction: StripDirection::from_attr(attrs.str_or("data-direction", "normal")),
            pausable: attrs.flag("data-pausable"),
        }
    }
}

#[derive(Debug)]
pub struct StripTimeline {
    duration_s: f64,
    direction: StripDirection,
    running: bool,
    /// Seconds into the cycle when the play state last changed.
    phase: f64,
    /// Wall-clock seconds at the last resume.
    anchor: f64,
}

impl StripTimeline {
    /// Duration in seconds = measured width / pixels-per-second, with
    /// the speed floored at 1 so a zero or negative speed can't yield
    /// an infinite or negative duration.
    pub fn new(set_width: f64, pixels_per_second: f64, direction: StripDirection) -> Self {
        Self {
            duration_s: set_width / pixels_per_second.max(1.0),
            direction,
            running: true,
            phase: 0.0,
            anchor: 0.0,
        }
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool, now_s: f64) {
        if running == self.running {
            return;
        }
        if running {
            self.anchor = now_s;
        } else {
            self.phase = self.phase_at(now_s);
        }
        self.running = running;
    }

    fn phase_at(&self, now_s: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 0.0;
        }
        let raw = if self.running {
            self.phase + (now_s - self.anchor)
        } else {
            self.phase
        };
        raw.rem_euclid(self.duration_s)
    }

    /// Translation along the scroll axis for one cycle over set_width
    /// pixels: 0 -> -width repeating, or backwards when reversed.
    pub fn offset_at(&self, now_s: f64, set_width: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 0.0;
        }
        let progress = self.phase_at(now_s) / self.duration_s;
        match self.direction {
            StripDirection::Normal => -set_width * progress,
            StripDirection::Reverse => -set_width * (1.0 - progress),
        }
    }
}
