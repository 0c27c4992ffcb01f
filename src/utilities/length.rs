// src/utilities/length.rs
//
// Parsing for css-style length strings ("12px", "8.5", "  16px ").
// Anything that doesn't resolve to a finite pixel count is treated as 0.

use regex::Regex;
use std::sync::OnceLock;

fn length_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*(px)?\s*$").unwrap())
}

pub fn parse_length_px(value: &str) -> f32 {
    let Some(caps) = length_re().captures(value) else {
        return 0.0;
    };
    caps.get(1)
        .and_then(|m| m.as_str().parse::<f32>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_suffix() {
        assert_eq!(parse_length_px("12px"), 12.0);
        assert_eq!(parse_length_px("  16.5px "), 16.5);
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(parse_length_px("8"), 8.0);
        assert_eq!(parse_length_px("-4"), -4.0);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_length_px(""), 0.0);
        assert_eq!(parse_length_px("1.5rem"), 0.0);
        assert_eq!(parse_length_px("px"), 0.0);
    }
}
