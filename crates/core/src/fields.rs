//! Rewrite field kinds.
//!
//! A field kind tags which product field a rewrite request is for. It selects
//! the instruction template sent to the text providers and the mock set used
//! when every provider fails.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated tag for the rewritable product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Title,
    Description,
    Benefit,
    Ingredients,
    HowToUse,
}

impl FieldKind {
    /// All known field kinds.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Title,
        FieldKind::Description,
        FieldKind::Benefit,
        FieldKind::Ingredients,
        FieldKind::HowToUse,
    ];

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Description => "description",
            FieldKind::Benefit => "benefit",
            FieldKind::Ingredients => "ingredients",
            FieldKind::HowToUse => "how_to_use",
        }
    }

    /// Parse a wire name into a field kind.
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "title" => Ok(FieldKind::Title),
            "description" => Ok(FieldKind::Description),
            "benefit" => Ok(FieldKind::Benefit),
            "ingredients" => Ok(FieldKind::Ingredients),
            "how_to_use" => Ok(FieldKind::HowToUse),
            other => Err(Error::InvalidFieldKind(other.to_string())),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_all_kinds() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(FieldKind::parse("tagline").is_err());
    }
}
