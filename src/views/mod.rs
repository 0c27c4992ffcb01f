// src/views/mod.rs

pub mod content;
pub mod instance;
pub mod stage;
pub mod strip_instance;

pub use content::{AssetState, ContentItem};
pub use instance::MarqueeInstance;
pub use stage::Stage;
pub use strip_instance::{StripInstance, STRIP_STYLE_RULE};
