//! The six survey question variants a record can belong to.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Pattern every category label must match on the wire.
pub const CATEGORY_PATTERN: &str = "^happiness[1-6]$";

/// A survey question variant.
///
/// Serialized as the lowercase label (`happiness1` through `happiness6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// First survey question.
    Happiness1,
    /// Second survey question.
    Happiness2,
    /// Third survey question.
    Happiness3,
    /// Fourth survey question.
    Happiness4,
    /// Fifth survey question.
    Happiness5,
    /// Sixth survey question.
    Happiness6,
}

impl Category {
    /// Every category in label order.
    pub const ALL: [Self; 6] = [
        Self::Happiness1,
        Self::Happiness2,
        Self::Happiness3,
        Self::Happiness4,
        Self::Happiness5,
        Self::Happiness6,
    ];

    /// The wire label for this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happiness1 => "happiness1",
            Self::Happiness2 => "happiness2",
            Self::Happiness3 => "happiness3",
            Self::Happiness4 => "happiness4",
            Self::Happiness5 => "happiness5",
            Self::Happiness6 => "happiness6",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label did not match [`CATEGORY_PATTERN`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {label:?}, expected a label matching {CATEGORY_PATTERN}")]
pub struct UnknownCategory {
    /// The rejected label.
    pub label: String,
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory {
                label: s.to_owned(),
            })
    }
}
