//! Loading animation configs from JSON.
//!
//! Shape (all fields optional, times in seconds):
//!
//! ```json
//! {
//!   "keyframes": [0, 10, 30],
//!   "offset": [0, 0.25, 1],
//!   "easing": ["linear", { "steps": 2, "position": "start" }],
//!   "duration": 2,
//!   "delay": 0,
//!   "endDelay": 0,
//!   "repeat": 1,
//!   "direction": "alternate"
//! }
//! ```

use crate::config::AnimationConfig;
use crate::error::AnimationError;

/// Parse a JSON animation config and validate it.
pub fn parse_animation_config_json(s: &str) -> Result<AnimationConfig, AnimationError> {
    let config: AnimationConfig = serde_json::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Serialize a config back to JSON. Generator easings cannot be serialized.
pub fn animation_config_to_json(config: &AnimationConfig) -> Result<String, AnimationError> {
    Ok(serde_json::to_string(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Direction;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = parse_animation_config_json("{}").unwrap();
        assert_eq!(cfg.keyframes, vec![0.0, 1.0]);
        assert_eq!(cfg.direction, Direction::Normal);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = parse_animation_config_json("{ \"duration\": ").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = parse_animation_config_json(r#"{ "duration": -1 }"#).unwrap_err();
        assert_eq!(err, AnimationError::InvalidDuration { duration: -1.0 });
    }

    #[test]
    fn written_json_parses_back() {
        let cfg = parse_animation_config_json(
            r#"{ "keyframes": [3, 4], "repeat": 2, "direction": "reverse", "easing": "ease-in" }"#,
        )
        .unwrap();
        let json = animation_config_to_json(&cfg).unwrap();
        assert!(json.contains("\"endDelay\""));
        assert!(json.contains("\"ease-in\""));
        let again = parse_animation_config_json(&json).unwrap();
        assert_eq!(again.repeat, 2);
        assert_eq!(again.direction, Direction::Reverse);
    }
}
