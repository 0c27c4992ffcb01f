// src/views/instance.rs
//
// MarqueeInstance: the engine-variant marquee. Owns its content items,
// generated clone sets, watchers, and the stepping engine, and is the
// interface between the stage and the animation core.

use nannou::prelude::*;
use tracing::{debug, warn};

use crate::{
    animation::{EngineOptions, MarqueeEngine, Metrics},
    config::{AttrMap, MarqueeDef},
    effects::FadeEffect,
    services::{HoverWatcher, IntersectionWatcher, ResizeWatcher, WatchEvent},
    utilities::parse_length_px,
    views::content::{self, ContentItem},
    views::Stage,
};

/// Pre-trigger margin for the viewport intersection watcher.
const INTERSECTION_MARGIN: f32 = 50.0;

const REGION_LABEL: &str = "Scrolling marquee content";

pub struct MarqueeInstance {
    pub id: String,
    rect: Rect,
    gap: f32,
    base_items: Vec<ContentItem>,
    /// Appended full copies of the base set.
    clone_sets: usize,

    engine: MarqueeEngine,
    fade: FadeEffect,

    hover: Option<HoverWatcher>,
    intersection: Option<IntersectionWatcher>,
    resize: Option<ResizeWatcher>,

    /// Set only by an explicit pause from the control surface, so a
    /// viewport re-entry never overrides the caller's intent.
    user_paused: bool,
    /// Build is deferred until every item's asset has settled.
    built: bool,
    region_label: Option<String>,
    destroyed: bool,
}

impl MarqueeInstance {
    /// Initialize one instance. Missing required substructure is a
    /// non-fatal diagnostic: the instance is skipped, nothing else is
    /// affected.
    pub fn init(stage: &Stage, def: &MarqueeDef, items: Vec<ContentItem>) -> Option<Self> {
        if items.is_empty() {
            warn!(id = %def.id, "marquee instance has no items, skipping");
            return None;
        }

        let attrs: AttrMap = def.attrs.iter().collect();
        let options = EngineOptions::from_attrs(&attrs);
        let rect = Rect::from_x_y_w_h(def.rect[0], def.rect[1], def.rect[2], def.rect[3]);
        // The inter-item gap may arrive as a css-style length string.
        let gap = attrs.get("marq-gap").map(parse_length_px).unwrap_or(def.gap);

        let metrics = Metrics {
            set_size: content::set_size(&items, gap) as f64,
            viewport_extent: main_extent(rect, options.direction.is_vertical()) as f64,
            viewport_width: stage.viewport_width() as f64,
        };

        Some(Self {
            id: def.id.clone(),
            rect,
            gap,
            base_items: items,
            clone_sets: 0,
            engine: MarqueeEngine::new(options, metrics),
            fade: FadeEffect::new(),
            hover: Some(HoverWatcher::new()),
            intersection: Some(IntersectionWatcher::new(INTERSECTION_MARGIN)),
            resize: Some(ResizeWatcher::new()),
            user_paused: false,
            built: false,
            region_label: Some(REGION_LABEL.to_string()),
            destroyed: false,
        })
    }

    /************************ Measurement & cloning ************************/

    /// Re-measure the base set and regenerate clone sets so content
    /// always covers the viewport: total extent >= viewport extent +
    /// one set size, with at least two appended sets.
    pub fn measure_and_clone(&mut self, stage: &Stage) {
        let set_size = content::set_size(&self.base_items, self.gap) as f64;
        let viewport_extent = main_extent(self.rect, self.is_vertical()) as f64;

        self.clone_sets = if set_size > 0.0 {
            (((viewport_extent + set_size) / set_size).ceil() as usize).max(2)
        } else {
            0
        };

        self.engine.set_metrics(Metrics {
            set_size,
            viewport_extent,
            viewport_width: stage.viewport_width() as f64,
        });
    }

    pub fn set_size(&self) -> f64 {
        content::set_size(&self.base_items, self.gap) as f64
    }

    /// Rendered sets, base included.
    pub fn total_sets(&self) -> usize {
        1 + self.clone_sets
    }

    pub fn total_extent(&self) -> f64 {
        self.set_size() * self.total_sets() as f64
    }

    pub fn viewport_extent(&self) -> f64 {
        main_extent(self.rect, self.is_vertical()) as f64
    }

    fn is_vertical(&self) -> bool {
        self.engine.options().direction.is_vertical()
    }

    /**************************** Per-frame update ****************************/

    pub fn update(&mut self, stage: &Stage, now_ms: f64) {
        if self.destroyed {
            return;
        }

        // Defer layout until images have finished loading or errored.
        if !self.built {
            if !content::assets_settled(&self.base_items) {
                return;
            }
            self.build(stage, now_ms);
        }

        self.refresh_viewport_width(stage);

        if let Some(resize) = self.resize.as_mut() {
            if resize.update(self.rect) {
                self.rebuild(stage, now_ms);
            }
        }

        if self.engine.options().pause_on_hover {
            if let Some(hover) = self.hover.as_mut() {
                match hover.update(self.rect, stage.pointer) {
                    Some(WatchEvent::Entered) => self.engine.pause(now_ms),
                    Some(WatchEvent::Left) => {
                        // Leaving resumes unconditionally, so any caller
                        // pause is lifted with it.
                        self.user_paused = false;
                        self.engine.play(now_ms);
                    }
                    None => {}
                }
            }
        }

        if let Some(intersection) = self.intersection.as_mut() {
            match intersection.update(self.rect, stage.viewport) {
                Some(WatchEvent::Entered) => {
                    self.engine.set_in_view(true);
                    // Re-entry resumes only when the caller didn't pause
                    // and the tab is visible.
                    if self.engine.is_paused() && !self.user_paused && stage.focused {
                        self.engine.play(now_ms);
                    }
                }
                Some(WatchEvent::Left) => {
                    self.engine.set_in_view(false);
                    self.engine.pause(now_ms);
                }
                None => {}
            }
        }

        self.engine.tick(now_ms);
    }

    fn build(&mut self, stage: &Stage, now_ms: f64) {
        self.measure_and_clone(stage);
        self.engine.reset_position();
        self.fade.start(self.engine.options().fade_ms, now_ms);
        self.engine.play(now_ms);
        self.built = true;
        debug!(id = %self.id, sets = self.total_sets(), "marquee instance built");
    }

    /// Full box-change cycle: halt the schedule, re-measure, re-clone,
    /// reposition, replay.
    fn rebuild(&mut self, stage: &Stage, now_ms: f64) {
        self.engine.deschedule();
        self.measure_and_clone(stage);
        self.engine.reset_position();
        self.engine.play(now_ms);
    }

    fn refresh_viewport_width(&mut self, stage: &Stage) {
        let set_size = self.set_size();
        self.engine.set_metrics(Metrics {
            set_size,
            viewport_extent: self.viewport_extent(),
            viewport_width: stage.viewport_width() as f64,
        });
    }

    /**************************** Control surface ****************************/

    pub fn play(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        self.user_paused = false;
        self.engine.play(now_ms);
    }

    pub fn pause(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        self.user_paused = true;
        self.engine.pause(now_ms);
    }

    pub fn stop(&mut self) {
        if self.destroyed {
            return;
        }
        self.user_paused = false;
        self.engine.stop();
    }

    pub fn start(&mut self, stage: &Stage, now_ms: f64) {
        if self.destroyed {
            return;
        }
        self.user_paused = false;
        self.measure_and_clone(stage);
        self.engine.reset_position();
        self.engine.play(now_ms);
    }

    /// Tab-visibility hooks: these call straight through to the engine.
    pub fn visibility_pause(&mut self, now_ms: f64) {
        self.engine.pause(now_ms);
    }

    pub fn visibility_play(&mut self, now_ms: f64) {
        self.engine.play(now_ms);
    }

    /// Idempotent teardown: deschedule, drop watchers, drop clones,
    /// strip the applied labeling. The base content stays, untouched.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.engine.destroy();
        self.hover = None;
        self.intersection = None;
        self.resize = None;
        self.clone_sets = 0;
        self.region_label = None;
        self.user_paused = false;
        self.destroyed = true;
    }

    /**************************** Introspection ****************************/

    pub fn offset(&self) -> f64 {
        self.engine.offset()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_scheduled(&self) -> bool {
        self.engine.is_scheduled()
    }

    pub fn is_paused(&self) -> bool {
        self.engine.is_paused()
    }

    pub fn region_label(&self) -> Option<&str> {
        self.region_label.as_deref()
    }

    pub fn has_watchers(&self) -> bool {
        self.hover.is_some() || self.intersection.is_some() || self.resize.is_some()
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn items_mut(&mut self) -> &mut [ContentItem] {
        &mut self.base_items
    }

    /**************************** Drawing ****************************/

    pub fn draw(&self, draw: &Draw, now_ms: f64) {
        // A destroyed instance keeps its base content at rest.
        let (sets, offset, alpha) = if self.destroyed {
            (1, 0.0, 1.0)
        } else {
            if !self.built {
                return;
            }
            (self.total_sets(), self.engine.offset(), self.fade.alpha(now_ms))
        };

        let set_size = self.set_size() as f32;
        let vertical = self.is_vertical();

        for set in 0..sets {
            let mut cursor = set as f32 * set_size;
            for item in &self.base_items {
                let main = cursor + item.margin_start + offset as f32;
                let mut color = item.color;
                color.alpha *= alpha;
                if vertical {
                    let y = self.rect.top() - main - item.extent / 2.0;
                    if y + item.extent / 2.0 >= self.rect.bottom()
                        && y - item.extent / 2.0 <= self.rect.top()
                    {
                        draw.rect()
                            .x_y(self.rect.x(), y)
                            .w_h(item.cross, item.extent)
                            .color(color);
                    }
                } else {
                    let x = self.rect.left() + main + item.extent / 2.0;
                    if x + item.extent / 2.0 >= self.rect.left()
                        && x - item.extent / 2.0 <= self.rect.right()
                    {
                        draw.rect()
                            .x_y(x, self.rect.y())
                            .w_h(item.extent, item.cross)
                            .color(color);
                    }
                }
                cursor += item.footprint(self.gap);
            }
        }
    }
}

fn main_extent(rect: Rect, vertical: bool) -> f32 {
    if vertical {
        rect.h()
    } else {
        rect.w()
    }
}
