pub mod easing;
pub mod length;

pub use easing::{cubic_in, cubic_out, ease_progress};
pub use length::parse_length_px;
