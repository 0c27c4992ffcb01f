// src/config/config_types.rs
//
// Demo application config, loaded from config.toml.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    pub background: [f32; 3],
    pub default_item_cross: f32,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Suppresses registry auto-init, mirroring the document-root
    /// opt-out flag of the declarative surface.
    #[serde(default)]
    pub no_auto: bool,
}

/// One content item inside a marquee. Extents are pixels along the
/// scroll axis; `pending` marks an asset that has not finished loading
/// yet (measurement is deferred until every item settles).
#[derive(Debug, Deserialize, Clone)]
pub struct ItemDef {
    pub extent: f32,
    #[serde(default)]
    pub cross: Option<f32>,
    #[serde(default)]
    pub margin_start: f32,
    #[serde(default)]
    pub margin_end: f32,
    #[serde(default)]
    pub color: Option<[f32; 3]>,
    #[serde(default)]
    pub pending: bool,
}

/// Declarative definition of one engine-variant marquee instance.
#[derive(Debug, Deserialize)]
pub struct MarqueeDef {
    pub id: String,
    /// Wrapper box as [x, y, w, h] in window coordinates.
    pub rect: [f32; 4],
    #[serde(default)]
    pub gap: f32,
    pub items: Vec<ItemDef>,
    /// Raw attribute strings, exactly as the declarative surface
    /// carries them (marq-direction, marq-pause, marq-fade,
    /// marq-easeout, marq-breakpoints).
    #[serde(default)]
    pub attrs: HashMap<String, String>,
}

/// Declarative definition of one looping-strip instance.
#[derive(Debug, Deserialize)]
pub struct StripDef {
    pub id: String,
    pub rect: [f32; 4],
    #[serde(default)]
    pub gap: f32,
    pub items: Vec<ItemDef>,
    /// data-instances, data-speed, data-direction, data-pausable.
    #[serde(default)]
    pub attrs: HashMap<String, String>,
}
