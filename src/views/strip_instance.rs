// src/views/strip_instance.rs
//
// The simple looping strip: clones the content set N-1 times, hands the
// motion to a shared linear keyframe rule, and only ever toggles the
// animation's play state. Standalone from the engine variant by design.

use nannou::prelude::*;
use tracing::debug;

use crate::{
    animation::{StripOptions, StripTimeline},
    config::{AttrMap, StripDef},
    services::{HoverWatcher, IntersectionWatcher, WatchEvent},
    utilities::parse_length_px,
    views::content::{self, ContentItem},
    views::Stage,
};

/// Id of the lazily-injected shared style rule (keyframes + the
/// attribute-guarded hover-pause rule).
pub const STRIP_STYLE_RULE: &str = "marqvis-strip-keyframes";

pub struct StripInstance {
    pub id: String,
    rect: Rect,
    gap: f32,
    items: Vec<ContentItem>,
    options: StripOptions,
    timeline: StripTimeline,
    hover: HoverWatcher,
    visibility: IntersectionWatcher,
    hovered: bool,
}

impl StripInstance {
    /// Initialize one strip container. A container without content is a
    /// no-op.
    pub fn init(stage: &mut Stage, def: &StripDef, items: Vec<ContentItem>) -> Option<Self> {
        if items.is_empty() {
            debug!(id = %def.id, "strip container has no content, skipping");
            return None;
        }

        // One shared rule for every strip on the stage, injected by
        // whichever instance gets there first.
        stage.ensure_style_rule(STRIP_STYLE_RULE);

        let attrs: AttrMap = def.attrs.iter().collect();
        let options = StripOptions::from_attrs(&attrs);
        let gap = attrs.get("data-gap").map(parse_length_px).unwrap_or(def.gap);
        let set_width = content::set_size(&items, gap) as f64;
        let timeline = StripTimeline::new(set_width, options.pixels_per_second, options.direction);

        Some(Self {
            id: def.id.clone(),
            rect: Rect::from_x_y_w_h(def.rect[0], def.rect[1], def.rect[2], def.rect[3]),
            gap,
            items,
            options,
            timeline,
            hover: HoverWatcher::new(),
            // Threshold 0, no pre-trigger margin for the strip.
            visibility: IntersectionWatcher::new(0.0),
            hovered: false,
        })
    }

    /// Total rendered copies of the content set, original included.
    pub fn copies(&self) -> usize {
        self.options.instances
    }

    pub fn set_width(&self) -> f64 {
        content::set_size(&self.items, self.gap) as f64
    }

    pub fn duration_s(&self) -> f64 {
        self.timeline.duration_s()
    }

    pub fn is_running(&self) -> bool {
        self.timeline.is_running()
    }

    /// Visibility observer + hover rule, evaluated once per frame.
    pub fn update(&mut self, stage: &Stage, now_s: f64) {
        match self.visibility.update(self.rect, stage.viewport) {
            Some(WatchEvent::Entered) => {
                // Entering the viewport while hovered keeps a pausable
                // strip paused, the way the hover rule wins in css.
                if !(self.options.pausable && self.hovered) {
                    self.timeline.set_running(true, now_s);
                }
            }
            Some(WatchEvent::Left) => self.timeline.set_running(false, now_s),
            None => {}
        }

        // The hover-pause rule only matches containers that opted in.
        if self.options.pausable {
            match self.hover.update(self.rect, stage.pointer) {
                Some(WatchEvent::Entered) => {
                    self.hovered = true;
                    self.timeline.set_running(false, now_s);
                }
                Some(WatchEvent::Left) => {
                    self.hovered = false;
                    if self.visibility.is_intersecting() {
                        self.timeline.set_running(true, now_s);
                    }
                }
                None => {}
            }
        }
    }

    pub fn offset_at(&self, now_s: f64) -> f64 {
        self.timeline.offset_at(now_s, self.set_width())
    }

    pub fn draw(&self, draw: &Draw, now_s: f64) {
        let set_width = self.set_width() as f32;
        let offset = self.offset_at(now_s) as f32;

        for copy in 0..self.copies() {
            let mut cursor = copy as f32 * set_width;
            for item in &self.items {
                let x = self.rect.left() + cursor + item.margin_start + offset + item.extent / 2.0;
                if x + item.extent / 2.0 >= self.rect.left()
                    && x - item.extent / 2.0 <= self.rect.right()
                {
                    draw.rect()
                        .x_y(x, self.rect.y())
                        .w_h(item.extent, item.cross)
                        .color(item.color);
                }
                cursor += item.footprint(self.gap);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ItemDef;

    fn strip_def(id: &str, rect: [f32; 4], extents: &[f32], attrs: &[(&str, &str)]) -> StripDef {
        StripDef {
            id: id.to_string(),
            rect,
            gap: 0.0,
            items: extents
                .iter()
                .map(|e| ItemDef {
                    extent: *e,
                    cross: None,
                    margin_start: 0.0,
                    margin_end: 0.0,
                    color: None,
                    pending: false,
                })
                .collect(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn items_of(def: &StripDef) -> Vec<ContentItem> {
        def.items
            .iter()
            .map(|d| ContentItem::from_def(d, 40.0, rgba(1.0, 1.0, 1.0, 1.0)))
            .collect()
    }

    #[test]
    fn test_copies_match_instance_count() {
        let mut stage = Stage::new(1000.0, 600.0);
        for n in 1..=4 {
            let def = strip_def(
                "s",
                [0.0, 0.0, 400.0, 80.0],
                &[120.0],
                &[("data-instances", &n.to_string())],
            );
            let items = items_of(&def);
            let strip = StripInstance::init(&mut stage, &def, items).expect("init");
            assert_eq!(strip.copies(), n);
        }
    }

    #[test]
    fn test_empty_container_is_noop() {
        let mut stage = Stage::new(1000.0, 600.0);
        let def = strip_def("empty", [0.0, 0.0, 400.0, 80.0], &[], &[]);
        assert!(StripInstance::init(&mut stage, &def, vec![]).is_none());
    }

    #[test]
    fn test_shared_rule_injected_once() {
        let mut stage = Stage::new(1000.0, 600.0);
        for id in ["a", "b"] {
            let def = strip_def(id, [0.0, 0.0, 400.0, 80.0], &[120.0], &[]);
            let items = items_of(&def);
            StripInstance::init(&mut stage, &def, items).expect("init");
        }
        assert!(stage.has_style_rule(STRIP_STYLE_RULE));
    }

    #[test]
    fn test_duration_from_width_and_speed() {
        let mut stage = Stage::new(1000.0, 600.0);
        let def = strip_def(
            "s",
            [0.0, 0.0, 400.0, 80.0],
            &[100.0, 200.0],
            &[("data-speed", "150")],
        );
        let items = items_of(&def);
        let strip = StripInstance::init(&mut stage, &def, items).expect("init");
        assert!((strip.duration_s() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_speed_still_positive_duration() {
        let mut stage = Stage::new(1000.0, 600.0);
        let def = strip_def(
            "s",
            [0.0, 0.0, 400.0, 80.0],
            &[100.0],
            &[("data-speed", "-20")],
        );
        let items = items_of(&def);
        let strip = StripInstance::init(&mut stage, &def, items).expect("init");
        assert!(strip.duration_s() > 0.0);
        assert!((strip.duration_s() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_visibility_toggles_play_state() {
        let mut stage = Stage::new(1000.0, 600.0);
        let def = strip_def("s", [0.0, 0.0, 400.0, 80.0], &[120.0], &[]);
        let items = items_of(&def);
        let mut strip = StripInstance::init(&mut stage, &def, items).expect("init");
        assert!(strip.is_running());

        stage.set_viewport(1000.0, 600.0);
        strip.update(&stage, 1.0);
        assert!(strip.is_running());

        // Move the strip far off the stage.
        strip.rect = Rect::from_x_y_w_h(5000.0, 0.0, 400.0, 80.0);
        strip.update(&stage, 2.0);
        assert!(!strip.is_running());

        strip.rect = Rect::from_x_y_w_h(0.0, 0.0, 400.0, 80.0);
        strip.update(&stage, 3.0);
        assert!(strip.is_running());
    }

    #[test]
    fn test_hover_pause_requires_opt_in() {
        let mut stage = Stage::new(1000.0, 600.0);
        let def = strip_def("plain", [0.0, 0.0, 400.0, 80.0], &[120.0], &[]);
        let items = items_of(&def);
        let mut plain = StripInstance::init(&mut stage, &def, items).expect("init");

        let def = strip_def(
            "pausable",
            [0.0, 0.0, 400.0, 80.0],
            &[120.0],
            &[("data-pausable", "true")],
        );
        let items = items_of(&def);
        let mut pausable = StripInstance::init(&mut stage, &def, items).expect("init");

        stage.pointer = pt2(0.0, 0.0);
        plain.update(&stage, 1.0);
        pausable.update(&stage, 1.0);
        assert!(plain.is_running());
        assert!(!pausable.is_running());

        stage.pointer = pt2(900.0, 900.0);
        pausable.update(&stage, 2.0);
        assert!(pausable.is_running());
    }
}
