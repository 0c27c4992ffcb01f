// src/animation/engine.rs
//
// The per-frame marquee stepping state machine.
//
// The engine is a pure function of elapsed time and its own state: the
// host (nannou's update loop, or a test) calls tick(now_ms) once per
// frame while is_scheduled() is true. It owns the scroll offset and all
// ease/pause bookkeeping; applying the offset to anything visible is
// the instance's job.

use crate::config::AttrMap;
use crate::utilities::{cubic_in, cubic_out, ease_progress};
use std::collections::BTreeMap;

/// Nominal frame time the step size is normalized against.
pub const NOMINAL_FRAME_MS: f64 = 16.67;

/// Base step in pixels per nominal frame at factor 1.0.
const PX_PER_FRAME: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
    Ttb,
    Btt,
}

impl Direction {
    pub fn from_attr(value: &str) -> Self {
        match value {
            "rtl" => Direction::Rtl,
            "ttb" => Direction::Ttb,
            "btt" => Direction::Btt,
            _ => Direction::Ltr,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Ttb | Direction::Btt)
    }

    /// Directions whose content reads in from the far edge start one
    /// set size behind zero.
    pub fn starts_offset_back(self) -> bool {
        matches!(self, Direction::Rtl | Direction::Ttb)
    }
}

/// Viewport-width thresholds mapped to duration percentages.
/// Lower percent is faster; 100 is the 1.0 baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints(BTreeMap<u32, f64>);

impl Default for Breakpoints {
    fn default() -> Self {
        Breakpoints(BTreeMap::from([
            (1440, 80.0),
            (991, 100.0),
            (480, 120.0),
        ]))
    }
}

impl Breakpoints {
    pub fn new(table: BTreeMap<u32, f64>) -> Self {
        Breakpoints(table)
    }

    /// Parse a JSON object of width -> percent. Anything malformed
    /// falls back to the default table.
    pub fn from_json(raw: &str) -> Self {
        if raw.is_empty() {
            return Breakpoints::default();
        }
        let parsed: Option<BTreeMap<u32, f64>> =
            serde_json::from_str::<BTreeMap<String, f64>>(raw)
                .ok()
                .and_then(|map| {
                    map.into_iter()
                        .map(|(k, v)| k.trim().parse::<u32>().ok().map(|w| (w, v)))
                        .collect()
                });
        match parsed {
            Some(table) if !table.is_empty() => Breakpoints(table),
            _ => Breakpoints::default(),
        }
    }

    /// Widest threshold not exceeding the viewport width wins; when
    /// none matches, the narrowest rule is the fallback. The result is
    /// clamped to [0.1, 10].
    pub fn factor(&self, viewport_width: f64) -> f64 {
        let percent = self
            .0
            .iter()
            .rev()
            .find(|(w, _)| viewport_width >= **w as f64)
            .or_else(|| self.0.iter().next())
            .map(|(_, d)| *d)
            .unwrap_or(100.0);
        (percent / 100.0).clamp(0.1, 10.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub direction: Direction,
    pub pause_on_hover: bool,
    pub fade_ms: f64,
    pub ease_ms: f64,
    pub breakpoints: Breakpoints,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            pause_on_hover: false,
            fade_ms: 0.0,
            ease_ms: 0.0,
            breakpoints: Breakpoints::default(),
        }
    }
}

impl EngineOptions {
    /// Read options from the instance's attribute map. Malformed values
    /// fall back to the documented defaults.
    pub fn from_attrs(attrs: &AttrMap) -> Self {
        Self {
            direction: Direction::from_attr(attrs.str_or("marq-direction", "ltr")),
            pause_on_hover: attrs.flag("marq-pause"),
            fade_ms: attrs.int_or("marq-fade", 0).max(0) as f64,
            ease_ms: attrs.int_or("marq-easeout", 0).max(0) as f64,
            breakpoints: Breakpoints::from_json(attrs.str_or("marq-breakpoints", "")),
        }
    }
}

/// Measured geometry the stepping math depends on. Refreshed by the
/// instance whenever it re-measures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Metrics {
    /// Extent of one full content set along the scroll axis.
    pub set_size: f64,
    /// Wrapper extent along the scroll axis.
    pub viewport_extent: f64,
    /// Stage width used for breakpoint selection.
    pub viewport_width: f64,
}

#[derive(Debug)]
pub struct MarqueeEngine {
    options: EngineOptions,
    metrics: Metrics,

    offset: f64,
    last_ts: Option<f64>,
    scheduled: bool,

    paused: bool,
    starting: bool,
    stopping: bool,
    start_ts: f64,
    stop_ts: f64,

    in_view: bool,
    destroyed: bool,
}

impl MarqueeEngine {
    pub fn new(options: EngineOptions, metrics: Metrics) -> Self {
        let mut engine = Self {
            options,
            metrics,
            offset: 0.0,
            last_ts: None,
            scheduled: false,
            paused: false,
            starting: false,
            stopping: false,
            start_ts: 0.0,
            stop_ts: 0.0,
            in_view: true,
            destroyed: false,
        };
        engine.reset_position();
        engine
    }

    /// Seamless-loop starting point: rtl/ttb begin one set back.
    pub fn reset_position(&mut self) {
        self.offset = if self.options.direction.starts_offset_back() {
            -self.metrics.set_size
        } else {
            0.0
        };
    }

    pub fn set_metrics(&mut self, metrics: Metrics) {
        self.metrics = metrics;
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_starting(&self) -> bool {
        self.starting
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    pub fn set_in_view(&mut self, in_view: bool) {
        self.in_view = in_view;
    }

    /// Resume stepping. Opening a start-ease window here covers both
    /// the first play and a resume that lands before a stop-ease window
    /// finished: the schedule stays alive and the speed curve ramps
    /// back up instead of completing the ramp down.
    pub fn play(&mut self, now: f64) {
        if self.destroyed || !self.in_view {
            return;
        }
        if self.scheduled && !self.paused && !self.stopping {
            return; // redundant play
        }
        self.paused = false;
        self.stopping = false;
        self.starting = true;
        self.start_ts = now;
        if !self.scheduled {
            self.scheduled = true;
            self.last_ts = Some(now);
        }
    }

    /// Open a stop-ease window; advancement halts once it completes
    /// (immediately on the next tick when the ease duration is zero).
    pub fn pause(&mut self, now: f64) {
        if self.destroyed || self.paused {
            return;
        }
        self.paused = true;
        self.stopping = true;
        self.stop_ts = now;
    }

    /// Hard stop: deschedule synchronously, clear all transient ease
    /// state, and reset the offset to zero.
    pub fn stop(&mut self) {
        if self.destroyed {
            return;
        }
        self.deschedule();
        self.paused = false;
        self.starting = false;
        self.stopping = false;
        self.offset = 0.0;
    }

    /// Cancel the frame schedule without touching offset or flags.
    /// Used by the resize path before re-measuring.
    pub fn deschedule(&mut self) {
        self.scheduled = false;
        self.last_ts = None;
    }

    pub fn destroy(&mut self) {
        self.deschedule();
        self.destroyed = true;
    }

    /// One frame of stepping. Returns true while the schedule should
    /// stay alive.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.scheduled {
            return false;
        }

        let dt = match self.last_ts {
            Some(prev) => now - prev,
            None => NOMINAL_FRAME_MS,
        };
        self.last_ts = Some(now);

        let mut factor = self.options.breakpoints.factor(self.metrics.viewport_width);

        // A start window in flight takes precedence over a pending stop.
        if self.starting {
            let t = ease_progress(now - self.start_ts, self.options.ease_ms);
            factor *= cubic_in(t);
            if t >= 1.0 {
                self.starting = false;
            }
        } else if self.stopping {
            let t = ease_progress(now - self.stop_ts, self.options.ease_ms);
            factor *= cubic_out(t);
            if t >= 1.0 {
                self.stopping = false;
                self.deschedule();
                return false;
            }
        }

        let step = factor * PX_PER_FRAME * (dt / NOMINAL_FRAME_MS);
        self.advance(step);
        true
    }

    /// Advance the offset along the configured direction, wrapping by
    /// exactly one set size once its magnitude reaches the set size.
    /// Modular wrap, not a reset to zero: carrying the overshoot over
    /// keeps the loop visually continuous.
    fn advance(&mut self, step: f64) {
        let set_size = self.metrics.set_size;
        if set_size <= 0.0 {
            return;
        }
        match self.options.direction {
            Direction::Ltr | Direction::Ttb => {
                self.offset -= step;
                if self.offset.abs() >= set_size {
                    self.offset += set_size;
                }
            }
            Direction::Rtl | Direction::Btt => {
                self.offset += step;
                if self.offset >= set_size {
                    self.offset -= set_size;
                }
            }
        }
    }
}
