//! Interview stage marker

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage value that ends the interview
pub const CLOSING_STAGE: &str = "closing";

/// Stages in the order the service walks through them
pub const KNOWN_STAGES: [&str; 5] = [
    "introduction",
    "technical",
    "experience",
    "behavioral",
    CLOSING_STAGE,
];

/// Backend-reported phase of the interview
///
/// Opaque to the client apart from the terminal value. Unknown stage names
/// are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stage(String);

impl Stage {
    /// Create a stage from the raw backend value
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// The raw stage name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this stage ends the interview
    pub fn is_terminal(&self) -> bool {
        self.0 == CLOSING_STAGE
    }

    /// Position in the known stage order, if the stage is a known one
    pub fn position(&self) -> Option<usize> {
        KNOWN_STAGES.iter().position(|known| *known == self.0)
    }

    /// Stage name with its first letter upper-cased, for display
    pub fn display_name(&self) -> String {
        capitalize(&self.0)
    }
}

/// Upper-case the first character of a label
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Stage {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Stage {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_closing_is_terminal() {
        assert!(Stage::from("closing").is_terminal());
        assert!(!Stage::from("introduction").is_terminal());
        assert!(!Stage::from("Closing").is_terminal());
        assert!(!Stage::from("").is_terminal());
    }

    #[test]
    fn test_position_follows_known_order() {
        assert_eq!(Stage::from("introduction").position(), Some(0));
        assert_eq!(Stage::from("closing").position(), Some(4));
        assert_eq!(Stage::from("coffee_break").position(), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Stage::from("behavioral").display_name(), "Behavioral");
        assert_eq!(Stage::from("").display_name(), "");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let stage = Stage::from("technical");
        assert_eq!(serde_json::to_string(&stage).unwrap(), "\"technical\"");
        let parsed: Stage = serde_json::from_str("\"experience\"").unwrap();
        assert_eq!(parsed.as_str(), "experience");
    }
}
