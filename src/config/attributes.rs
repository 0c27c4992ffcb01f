// src/config/attributes.rs
//
// The declarative configuration surface: string key/value pairs read
// once at instance construction, with documented defaults on any parse
// failure or non-finite value.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct AttrMap(HashMap<String, String>);

impl AttrMap {
    pub fn new() -> Self {
        AttrMap(HashMap::new())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Raw value, or the fallback when absent or empty.
    pub fn str_or<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        match self.get(name) {
            Some(v) if !v.is_empty() => v,
            _ => fallback,
        }
    }

    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.get(name)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(default)
    }

    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.get(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .unwrap_or(default)
    }

    /// Boolean-ish flag: only the literal "true" switches it on.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        AttrMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttrMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_missing_values_fall_back() {
        let a = AttrMap::new();
        assert_eq!(a.int_or("data-instances", 2), 2);
        assert_eq!(a.float_or("data-speed", 75.0), 75.0);
        assert_eq!(a.str_or("marq-direction", "ltr"), "ltr");
        assert!(!a.flag("marq-pause"));
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let a = attrs(&[
            ("data-instances", "lots"),
            ("data-speed", "fast"),
            ("marq-fade", "1.5.2"),
        ]);
        assert_eq!(a.int_or("data-instances", 2), 2);
        assert_eq!(a.float_or("data-speed", 75.0), 75.0);
        assert_eq!(a.int_or("marq-fade", 0), 0);
    }

    #[test]
    fn test_non_finite_floats_fall_back() {
        let a = attrs(&[("data-speed", "inf"), ("other", "NaN")]);
        assert_eq!(a.float_or("data-speed", 75.0), 75.0);
        assert_eq!(a.float_or("other", 75.0), 75.0);
    }

    #[test]
    fn test_valid_values_parse() {
        let a = attrs(&[
            ("data-instances", "4"),
            ("data-speed", "120.5"),
            ("marq-pause", "true"),
        ]);
        assert_eq!(a.int_or("data-instances", 2), 4);
        assert_eq!(a.float_or("data-speed", 75.0), 120.5);
        assert!(a.flag("marq-pause"));
    }

    #[test]
    fn test_flag_requires_literal_true() {
        let a = attrs(&[("marq-pause", "yes"), ("data-pausable", "TRUE")]);
        assert!(!a.flag("marq-pause"));
        assert!(!a.flag("data-pausable"));
    }

    #[test]
    fn test_empty_string_uses_fallback() {
        let a = attrs(&[("marq-direction", "")]);
        assert_eq!(a.str_or("marq-direction", "ltr"), "ltr");
    }
}
