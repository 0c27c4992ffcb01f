// src/registry.rs
//
// Caller-owned registry over every marquee on a stage. Where the
// original surface hung a mutable namespace off a global, this is an
// explicit value the host application creates, queries, and drops.

use nannou::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::{
    config::{Config, ItemDef, MarqueeDef, StripDef},
    views::{ContentItem, MarqueeInstance, Stage, StripInstance},
};

#[derive(Default)]
pub struct MarqueeRegistry {
    engines: HashMap<String, MarqueeInstance>,
    strips: HashMap<String, StripInstance>,
    /// Insertion order, for deterministic drawing.
    order: Vec<String>,
    default_item_cross: f32,
}

impl MarqueeRegistry {
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            strips: HashMap::new(),
            order: Vec::new(),
            default_item_cross: 48.0,
        }
    }

    pub fn with_default_cross(default_item_cross: f32) -> Self {
        Self {
            default_item_cross,
            ..Self::new()
        }
    }

    /// Discover and initialize every instance a config declares.
    /// Returns the ids of the instances that actually initialized;
    /// honors the auto-init suppression flag.
    pub fn init_all(&mut self, stage: &mut Stage, config: &Config) -> Vec<String> {
        if config.app.no_auto {
            return Vec::new();
        }
        let mut out = Vec::new();
        for def in &config.marquee {
            if let Some(id) = self.init(stage, def) {
                out.push(id);
            }
        }
        for def in &config.strip {
            if let Some(id) = self.init_strip(stage, def) {
                out.push(id);
            }
        }
        out
    }

    /// Initialize one engine-variant instance. Returns None (after a
    /// diagnostic) when the definition lacks required substructure.
    pub fn init(&mut self, stage: &Stage, def: &MarqueeDef) -> Option<String> {
        let items = self.build_items(&def.items);
        let instance = MarqueeInstance::init(stage, def, items)?;
        let id = instance.id.clone();
        self.engines.insert(id.clone(), instance);
        self.order.push(id.clone());
        Some(id)
    }

    pub fn init_strip(&mut self, stage: &mut Stage, def: &StripDef) -> Option<String> {
        let items = self.build_items(&def.items);
        let strip = StripInstance::init(stage, def, items)?;
        let id = strip.id.clone();
        self.strips.insert(id.clone(), strip);
        self.order.push(id.clone());
        Some(id)
    }

    fn build_items(&self, defs: &[ItemDef]) -> Vec<ContentItem> {
        let mut rng = rand::thread_rng();
        defs.iter()
            .map(|def| {
                let color = rgba(
                    rng.gen_range(0.3..=0.9),
                    rng.gen_range(0.3..=0.9),
                    rng.gen_range(0.3..=0.9),
                    1.0,
                );
                ContentItem::from_def(def, self.default_item_cross, color)
            })
            .collect()
    }

    /************************** Frame fan-out ***************************/

    /// Advance every live instance. `now_ms` feeds the engines,
    /// `now_s` the strip timelines.
    pub fn update(&mut self, stage: &Stage, now_ms: f64) {
        for engine in self.engines.values_mut() {
            engine.update(stage, now_ms);
        }
        let now_s = now_ms / 1000.0;
        for strip in self.strips.values_mut() {
            strip.update(stage, now_s);
        }
    }

    /// Tab visibility: hidden pauses everything, visible resumes,
    /// calling straight through to the engines.
    pub fn set_hidden(&mut self, hidden: bool, now_ms: f64) {
        for engine in self.engines.values_mut() {
            if hidden {
                engine.visibility_pause(now_ms);
            } else {
                engine.visibility_play(now_ms);
            }
        }
    }

    pub fn draw(&self, draw: &Draw, now_ms: f64) {
        let now_s = now_ms / 1000.0;
        for id in &self.order {
            if let Some(engine) = self.engines.get(id) {
                engine.draw(draw, now_ms);
            } else if let Some(strip) = self.strips.get(id) {
                strip.draw(draw, now_s);
            }
        }
    }

    /************************** Control dispatch ***************************/

    pub fn play(&mut self, id: &str, now_ms: f64) {
        if let Some(engine) = self.engines.get_mut(id) {
            engine.play(now_ms);
        }
    }

    pub fn pause(&mut self, id: &str, now_ms: f64) {
        if let Some(engine) = self.engines.get_mut(id) {
            engine.pause(now_ms);
        }
    }

    pub fn stop(&mut self, id: &str) {
        if let Some(engine) = self.engines.get_mut(id) {
            engine.stop();
        }
    }

    pub fn start(&mut self, id: &str, stage: &Stage, now_ms: f64) {
        if let Some(engine) = self.engines.get_mut(id) {
            engine.start(stage, now_ms);
        }
    }

    /// Tear one instance down. The handle stays registered as an inert
    /// no-op so late calls against the id are safe.
    pub fn destroy(&mut self, id: &str) {
        if let Some(engine) = self.engines.get_mut(id) {
            engine.destroy();
        }
    }

    pub fn play_all(&mut self, now_ms: f64) {
        for engine in self.engines.values_mut() {
            engine.play(now_ms);
        }
    }

    pub fn pause_all(&mut self, now_ms: f64) {
        for engine in self.engines.values_mut() {
            engine.pause(now_ms);
        }
    }

    /************************** Queries ***************************/

    pub fn engine(&self, id: &str) -> Option<&MarqueeInstance> {
        self.engines.get(id)
    }

    pub fn engine_mut(&mut self, id: &str) -> Option<&mut MarqueeInstance> {
        self.engines.get_mut(id)
    }

    pub fn strip(&self, id: &str) -> Option<&StripInstance> {
        self.strips.get(id)
    }

    pub fn len(&self) -> usize {
        self.engines.len() + self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty() && self.strips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> Config {
        Config::from_str(toml).expect("test config should parse")
    }

    const BASE: &str = r#"
        [window]
        width = 1000
        height = 600

        [style]
        background = [0.0, 0.0, 0.0]
        default_item_cross = 48.0
    "#;

    fn with_instances(extra: &str) -> Config {
        config(&format!("{BASE}\n{extra}"))
    }

    #[test]
    fn test_init_all_skips_invalid_instances() {
        let mut stage = Stage::new(1000.0, 600.0);
        let mut registry = MarqueeRegistry::new();
        let config = with_instances(
            r#"
            [[marquee]]
            id = "good"
            rect = [0.0, 0.0, 400.0, 80.0]
            items = [{ extent = 120.0 }]

            [[marquee]]
            id = "missing-items"
            rect = [0.0, 200.0, 400.0, 80.0]
            items = []

            [[strip]]
            id = "ticker"
            rect = [0.0, -200.0, 400.0, 60.0]
            items = [{ extent = 90.0 }]
            "#,
        );

        let ids = registry.init_all(&mut stage, &config);
        assert_eq!(ids, vec!["good".to_string(), "ticker".to_string()]);
        assert_eq!(registry.len(), 2);
        assert!(registry.engine("missing-items").is_none());
        assert!(registry.strip("ticker").is_some());
        assert!(registry.strip("good").is_none());
    }

    #[test]
    fn test_no_auto_suppresses_init() {
        let mut stage = Stage::new(1000.0, 600.0);
        let mut registry = MarqueeRegistry::new();
        let config = with_instances(
            r#"
            [app]
            no_auto = true

            [[marquee]]
            id = "ignored"
            rect = [0.0, 0.0, 400.0, 80.0]
            items = [{ extent = 120.0 }]
            "#,
        );

        assert!(registry.init_all(&mut stage, &config).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_control_dispatch_and_late_calls() {
        let mut stage = Stage::new(1000.0, 600.0);
        let mut registry = MarqueeRegistry::new();
        let config = with_instances(
            r#"
            [[marquee]]
            id = "m"
            rect = [0.0, 0.0, 400.0, 80.0]
            items = [{ extent = 120.0 }]
            "#,
        );
        registry.init_all(&mut stage, &config);
        registry.update(&stage, 0.0);
        assert!(registry.engine("m").unwrap().is_scheduled());

        registry.engine_mut("m").unwrap().pause(1.0);
        assert!(registry.engine("m").unwrap().is_paused());

        registry.destroy("m");
        assert!(registry.engine("m").unwrap().is_destroyed());

        // Late and unknown-id calls are all safe no-ops.
        registry.play("m", 1.0);
        registry.pause("m", 1.0);
        registry.stop("m");
        registry.start("m", &stage, 1.0);
        registry.destroy("m");
        registry.play("ghost", 1.0);
        assert!(!registry.engine("m").unwrap().is_scheduled());
    }

    #[test]
    fn test_hidden_pauses_visible_resumes() {
        let mut stage = Stage::new(1000.0, 600.0);
        let mut registry = MarqueeRegistry::new();
        let config = with_instances(
            r#"
            [[marquee]]
            id = "m"
            rect = [0.0, 0.0, 400.0, 80.0]
            items = [{ extent = 120.0 }]
            "#,
        );
        registry.init_all(&mut stage, &config);
        registry.update(&stage, 0.0);

        registry.set_hidden(true, 10.0);
        assert!(registry.engine("m").unwrap().is_paused());

        registry.set_hidden(false, 20.0);
        assert!(!registry.engine("m").unwrap().is_paused());
    }
}
