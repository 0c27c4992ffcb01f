// src/utilities/easing.rs

// cubic easing curves for the start/stop speed windows

/// Cubic ease-in: slow launch, full speed at t = 1.
pub fn cubic_in(t: f64) -> f64 {
    t * t * t
}

/// Cubic ease-out. Note this is 1 - t^3, not the mirrored-cubic form;
/// the marquee has always shipped with this curve and changing it
/// changes the visible deceleration.
pub fn cubic_out(t: f64) -> f64 {
    1.0 - t * t * t
}

/// Normalized progress through an ease window. A zero-length window is
/// already complete.
pub fn ease_progress(elapsed_ms: f64, ease_ms: f64) -> f64 {
    if ease_ms > 0.0 {
        (elapsed_ms / ease_ms).clamp(0.0, 1.0)
    } else {
        1.0
    }
}
