use serde::{Deserialize, Serialize};

/// Repeat state of the player, persisted as a lower-case string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatState {
    Disabled,
    /// Repeat the whole queue
    All,
    /// Repeat the current track
    One,
}

#[allow(clippy::derivable_impls)]
impl Default for RepeatState {
    fn default() -> Self {
        RepeatState::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(
            serde_json::to_value(RepeatState::Disabled).unwrap(),
            serde_json::json!("disabled")
        );
        let one: RepeatState = serde_json::from_str("\"one\"").unwrap();
        assert_eq!(one, RepeatState::One);
    }

    #[test]
    fn default_is_disabled() {
        assert_eq!(RepeatState::default(), RepeatState::Disabled);
    }
}
