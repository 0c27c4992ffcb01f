// src/lib.rs
//
// marqvis: looping marquee widgets for nannou stages. Two standalone
// components: a simple css-style looping strip, and a per-frame
// stepping engine with easing, breakpoints, and a full control surface.

pub mod animation;
pub mod config;
pub mod effects;
pub mod registry;
pub mod services;
pub mod utilities;
pub mod views;

pub use registry::MarqueeRegistry;
