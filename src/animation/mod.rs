pub mod engine;
pub mod strip;

pub use engine::{Breakpoints, Direction, EngineOptions, MarqueeEngine, Metrics, NOMINAL_FRAME_MS};
pub use strip::{StripDirection, StripOptions, StripTimeline};
