// src/services/observer.rs
//
// Edge-triggered watchers over polled stage state. Each instance owns
// its watchers and drops them on destroy, the way a DOM widget owns and
// disconnects its observers.

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    Entered,
    Left,
}

/// Viewport-intersection tracking at threshold 0: any overlap counts.
/// `root_margin` grows the viewport so the enter event pre-triggers
/// before the instance is actually visible.
#[derive(Debug)]
pub struct IntersectionWatcher {
    root_margin: f32,
    intersecting: bool,
}

impl IntersectionWatcher {
    pub fn new(root_margin: f32) -> Self {
        Self {
            root_margin,
            intersecting: true,
        }
    }

    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    pub fn update(&mut self, target: Rect, viewport: Rect) -> Option<WatchEvent> {
        let expanded = Rect::from_x_y_w_h(
            viewport.x(),
            viewport.y(),
            viewport.w() + 2.0 * self.root_margin,
            viewport.h() + 2.0 * self.root_margin,
        );
        let now = expanded.overlap(target).is_some();
        let was = self.intersecting;
        self.intersecting = now;
        match (was, now) {
            (false, true) => Some(WatchEvent::Entered),
            (true, false) => Some(WatchEvent::Left),
            _ => None,
        }
    }
}

/// Pointer containment, producing mouseenter/mouseleave-style events.
#[derive(Debug, Default)]
pub struct HoverWatcher {
    inside: bool,
}

impl HoverWatcher {
    pub fn new() -> Self {
        Self { inside: false }
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn update(&mut self, target: Rect, pointer: Point2) -> Option<WatchEvent> {
        let now = target.contains(pointer);
        let was = self.inside;
        self.inside = now;
        match (was, now) {
            (false, true) => Some(WatchEvent::Entered),
            (true, false) => Some(WatchEvent::Left),
            _ => None,
        }
    }
}

/// Box-change detection. The first observation seeds the baseline and
/// does not fire, so binding a watcher doesn't trigger a rebuild.
#[derive(Debug, Default)]
pub struct ResizeWatcher {
    last: Option<(f32, f32)>,
}

impl ResizeWatcher {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn update(&mut self, rect: Rect) -> bool {
        let size = (rect.w(), rect.h());
        let changed = match self.last {
            Some(prev) => prev != size,
            None => false,
        };
        self.last = Some(size);
        changed
    }
}
