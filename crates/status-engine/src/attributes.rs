// ABOUTME: Closed set of scored attributes with case-insensitive parsing
// ABOUTME: Selects which formula the score engine applies to each row

use serde::{Deserialize, Serialize};
use status_core::constants::attributes;
use std::fmt;

/// A scored attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Ratio to metric baselines, adjusted for body composition
    Strength,
    /// Weighted sum
    Intelligence,
    /// Ratio to row baselines, adjusted for age
    Resilience,
    /// Weighted sum
    Creativity,
    /// Raw sum
    Luck,
    /// Raw sum
    Curiosity,
}

impl Attribute {
    /// Every attribute, in dashboard order
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Intelligence,
        Self::Resilience,
        Self::Creativity,
        Self::Luck,
        Self::Curiosity,
    ];

    /// Parse a name case-insensitively, ignoring surrounding whitespace
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(name))
    }

    /// Lowercase storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => attributes::STRENGTH,
            Self::Intelligence => attributes::INTELLIGENCE,
            Self::Resilience => attributes::RESILIENCE,
            Self::Creativity => attributes::CREATIVITY,
            Self::Luck => attributes::LUCK,
            Self::Curiosity => attributes::CURIOSITY,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Attribute::parse("STRENGTH"), Some(Attribute::Strength));
        assert_eq!(Attribute::parse(" Luck "), Some(Attribute::Luck));
        assert_eq!(Attribute::parse("wisdom"), None);
        assert_eq!(Attribute::parse(""), None);
    }

    #[test]
    fn test_names_match_constants() {
        let names: Vec<&str> = Attribute::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(names, attributes::ALL);
    }
}
