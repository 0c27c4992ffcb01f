pub mod observer;

pub use observer::{HoverWatcher, IntersectionWatcher, ResizeWatcher, WatchEvent};
