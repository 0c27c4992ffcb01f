// src/views/content.rs
//
// Content items and set measurement. An item's footprint along the
// scroll axis is its box extent plus both margins plus the list gap;
// one "set" is the sum over all base items.

use crate::config::ItemDef;
use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    Ready,
    Pending,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ContentItem {
    /// Box extent along the scroll axis.
    pub extent: f32,
    /// Extent across the scroll axis.
    pub cross: f32,
    pub margin_start: f32,
    pub margin_end: f32,
    pub color: Rgba,
    pub asset: AssetState,
}

impl ContentItem {
    pub fn from_def(def: &ItemDef, default_cross: f32, color: Rgba) -> Self {
        Self {
            extent: def.extent,
            cross: def.cross.unwrap_or(default_cross),
            margin_start: def.margin_start,
            margin_end: def.margin_end,
            color: def
                .color
                .map(|[r, g, b]| rgba(r, g, b, 1.0))
                .unwrap_or(color),
            asset: if def.pending {
                AssetState::Pending
            } else {
                AssetState::Ready
            },
        }
    }

    pub fn footprint(&self, gap: f32) -> f32 {
        self.extent + self.margin_start + self.margin_end + gap
    }

    pub fn settle(&mut self, loaded: bool) {
        self.asset = if loaded {
            AssetState::Ready
        } else {
            AssetState::Failed
        };
    }
}

pub fn set_size(items: &[ContentItem], gap: f32) -> f32 {
    items.iter().map(|item| item.footprint(gap)).sum()
}

/// Measurement may only run once every asset has finished loading or
/// errored; a still-pending image would measure as a zero-sized box.
pub fn assets_settled(items: &[ContentItem]) -> bool {
    items.iter().all(|item| item.asset != AssetState::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(extent: f32, margin_start: f32, margin_end: f32) -> ContentItem {
        ContentItem {
            extent,
            cross: 40.0,
            margin_start,
            margin_end,
            color: rgba(1.0, 1.0, 1.0, 1.0),
            asset: AssetState::Ready,
        }
    }

    #[test]
    fn test_set_size_includes_margins_and_gap() {
        let items = vec![item(100.0, 4.0, 6.0), item(50.0, 0.0, 0.0)];
        assert_eq!(set_size(&items, 10.0), 100.0 + 4.0 + 6.0 + 50.0 + 2.0 * 10.0);
    }

    #[test]
    fn test_assets_settled() {
        let mut items = vec![item(100.0, 0.0, 0.0), item(50.0, 0.0, 0.0)];
        assert!(assets_settled(&items));

        items[1].asset = AssetState::Pending;
        assert!(!assets_settled(&items));

        // An errored asset still counts as settled.
        items[1].settle(false);
        assert!(assets_settled(&items));
        assert_eq!(items[1].asset, AssetState::Failed);
    }
}
