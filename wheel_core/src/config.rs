use serde::Deserialize;

use crate::error::WheelError;

pub const DEFAULT_REELS: usize = 3;
pub const DEFAULT_DATA_URL: &str = "/data/wheel.csv";
pub const DEFAULT_RESULT_ID: &str = "wheel-result";

/// Upper bounds accepted from a config overlay.
pub const MAX_REELS: usize = 64;
pub const MAX_BLOCKS: usize = 1_000;
pub const MAX_JITTER_STEPS: u32 = 1_000;
pub const MAX_REVEAL_BUFFER_MS: u32 = 60_000;
pub const MAX_DURATION_SECS: f64 = 600.0;

/// Every tunable of a wheel instance.
///
/// Durations are in seconds except `reveal_buffer_ms`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WheelConfig {
    pub reels: usize,
    /// Full passes through the item sequence a reel travels per spin.
    pub cycles: usize,
    pub base_duration_secs: f64,
    /// Extra time added per subsequent reel.
    pub column_stagger_secs: f64,
    /// Jitter is drawn from `0..=jitter_steps` hundredths of a second.
    pub jitter_steps: u32,
    pub reveal_buffer_ms: u32,
    pub min_repeat: usize,
    /// Which repetition of the sequence a reel rests in.
    pub base_block: usize,
    pub fallback_cell_height: f64,
    pub easing: String,
    pub data_url: String,
    pub result_id: String,
    pub seed: Option<String>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            reels: DEFAULT_REELS,
            cycles: 8,
            base_duration_secs: 2.7,
            column_stagger_secs: 0.3,
            jitter_steps: 9,
            reveal_buffer_ms: 60,
            min_repeat: 16,
            base_block: 3,
            fallback_cell_height: 28.0,
            easing: "cubic-bezier(.17,.67,.15,1)".to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            result_id: DEFAULT_RESULT_ID.to_string(),
            seed: None,
        }
    }
}

impl WheelConfig {
    /// Number of times the item sequence is laid out in each reel track.
    ///
    /// Always leaves at least one full block past the furthest spin target.
    pub fn repeat_factor(&self) -> usize {
        let needed = self
            .base_block
            .saturating_add(self.cycles)
            .saturating_add(1);
        self.min_repeat.max(needed)
    }

    /// Rejects values that would overflow reel or timing arithmetic.
    pub fn validate(&self) -> Result<(), WheelError> {
        fn check_count(field: &'static str, value: usize, max: usize) -> Result<(), WheelError> {
            if value > max {
                return Err(WheelError::OutOfRange {
                    field,
                    value: value.to_string(),
                });
            }
            Ok(())
        }
        fn check_secs(field: &'static str, value: f64) -> Result<(), WheelError> {
            if !value.is_finite() || !(0.0..=MAX_DURATION_SECS).contains(&value) {
                return Err(WheelError::OutOfRange {
                    field,
                    value: value.to_string(),
                });
            }
            Ok(())
        }

        check_count("reels", self.reels, MAX_REELS)?;
        check_count("cycles", self.cycles, MAX_BLOCKS)?;
        check_count("min_repeat", self.min_repeat, MAX_BLOCKS)?;
        check_count("base_block", self.base_block, MAX_BLOCKS)?;
        check_count("jitter_steps", self.jitter_steps as usize, MAX_JITTER_STEPS as usize)?;
        check_count(
            "reveal_buffer_ms",
            self.reveal_buffer_ms as usize,
            MAX_REVEAL_BUFFER_MS as usize,
        )?;
        check_secs("base_duration_secs", self.base_duration_secs)?;
        check_secs("column_stagger_secs", self.column_stagger_secs)?;
        if !self.fallback_cell_height.is_finite() || self.fallback_cell_height <= 0.0 {
            return Err(WheelError::OutOfRange {
                field: "fallback_cell_height",
                value: self.fallback_cell_height.to_string(),
            });
        }
        Ok(())
    }

    /// Builds a config from a root element's `data-*` attributes.
    ///
    /// `attr` receives the attribute name without the `data-` prefix. Invalid
    /// values leave the default in place; an invalid `config` overlay is the
    /// only error.
    pub fn from_attributes<F>(attr: F) -> Result<Self, WheelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match attr("config") {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json)?,
            _ => Self::default(),
        };

        if let Some(reels) = attr("reels").as_deref().and_then(parse_leading_int) {
            config.reels = reels.clamp(1, MAX_REELS as i64) as usize;
        }
        if let Some(id) = attr("result-id").filter(|v| !v.is_empty()) {
            config.result_id = id;
        }
        if let Some(src) = attr("src").filter(|v| !v.is_empty()) {
            config.data_url = src;
        }
        if let Some(seed) = attr("seed") {
            config.seed = Some(seed);
        }
        config.reels = config.reels.max(1);
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        let config: Self = serde_json::from_str(json).map_err(WheelError::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }
}

/// Lenient integer parse: optional sign and leading digits, rest ignored.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn lenient_int_parse() {
        assert_eq!(parse_leading_int("4"), Some(4));
        assert_eq!(parse_leading_int(" 4px"), Some(4));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn reels_attribute_is_clamped_and_lenient() {
        let cfg = WheelConfig::from_attributes(attrs(&[("reels", "0")])).unwrap();
        assert_eq!(cfg.reels, 1);
        let cfg = WheelConfig::from_attributes(attrs(&[("reels", "abc")])).unwrap();
        assert_eq!(cfg.reels, DEFAULT_REELS);
        let cfg = WheelConfig::from_attributes(attrs(&[("reels", "4px")])).unwrap();
        assert_eq!(cfg.reels, 4);
    }

    #[test]
    fn result_id_and_source_override_defaults() {
        let cfg = WheelConfig::from_attributes(attrs(&[
            ("result-id", "prize"),
            ("src", "/other.csv"),
        ]))
        .unwrap();
        assert_eq!(cfg.result_id, "prize");
        assert_eq!(cfg.data_url, "/other.csv");
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn json_overlay_then_attributes() {
        let cfg = WheelConfig::from_attributes(attrs(&[
            ("config", r#"{"cycles": 4, "reels": 5}"#),
            ("reels", "2"),
        ]))
        .unwrap();
        assert_eq!(cfg.cycles, 4);
        assert_eq!(cfg.reels, 2);
        assert_eq!(cfg.repeat_factor(), 16);
    }

    #[test]
    fn unknown_overlay_field_is_rejected() {
        let err = WheelConfig::from_attributes(attrs(&[("config", r#"{"reel": 2}"#)]));
        assert!(matches!(err, Err(WheelError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_overlay_values_are_rejected() {
        for json in [
            r#"{"cycles": 18446744073709551615}"#,
            r#"{"reveal_buffer_ms": 4294967295}"#,
            r#"{"base_block": 5000}"#,
            r#"{"reels": 1000}"#,
            r#"{"base_duration_secs": -1.0}"#,
            r#"{"fallback_cell_height": 0.0}"#,
        ] {
            let err = WheelConfig::from_json(json);
            assert!(
                matches!(err, Err(WheelError::OutOfRange { .. })),
                "{json} -> {err:?}"
            );
        }
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let cfg = WheelConfig {
            cycles: usize::MAX,
            ..WheelConfig::default()
        };
        assert_eq!(cfg.repeat_factor(), usize::MAX);
    }

    #[test]
    fn reels_attribute_is_capped() {
        let cfg = WheelConfig::from_attributes(attrs(&[("reels", "99999")])).unwrap();
        assert_eq!(cfg.reels, MAX_REELS);
    }

    #[test]
    fn repeat_factor_grows_with_cycles() {
        let cfg = WheelConfig {
            cycles: 20,
            ..WheelConfig::default()
        };
        assert_eq!(cfg.repeat_factor(), 24);
    }
}
