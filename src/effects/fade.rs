// src/effects/fade.rs
//
// Fade-in applied to a marquee instance when it first builds. Sampling
// is read-only so the draw path can stay immutable.

#[derive(Debug, Default, Clone)]
pub struct FadeEffect {
    start_time: f64,
    duration_ms: f64,
    is_active: bool,
}

impl FadeEffect {
    pub fn new() -> Self {
        Self {
            start_time: 0.0,
            duration_ms: 0.0,
            is_active: false,
        }
    }

    pub fn start(&mut self, duration_ms: f64, current_time: f64) {
        // A zero duration means no fade: stay fully opaque.
        if duration_ms <= 0.0 {
            self.is_active = false;
            return;
        }
        self.duration_ms = duration_ms;
        self.start_time = current_time;
        self.is_active = true;
    }

    /// Current opacity in [0, 1].
    pub fn alpha(&self, current_time: f64) -> f32 {
        if !self.is_active {
            return 1.0;
        }

        let elapsed = current_time - self.start_time;
        if elapsed >= self.duration_ms {
            return 1.0;
        }

        (elapsed / self.duration_ms).max(0.0) as f32
    }

    pub fn is_finished(&self, current_time: f64) -> bool {
        !self.is_active || current_time - self.start_time >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_is_opaque() {
        let mut fade = FadeEffect::new();
        fade.start(0.0, 1000.0);
        assert_eq!(fade.alpha(1000.0), 1.0);
        assert!(fade.is_finished(1000.0));
    }

    #[test]
    fn test_ramp_to_opaque() {
        let mut fade = FadeEffect::new();
        fade.start(400.0, 0.0);
        assert!((fade.alpha(100.0) - 0.25).abs() < 1e-6);
        assert!(!fade.is_finished(100.0));
        assert!((fade.alpha(300.0) - 0.75).abs() < 1e-6);
        assert_eq!(fade.alpha(400.0), 1.0);
        assert!(fade.is_finished(400.0));
    }
}
