//! Breakpoint table.

use serde::{Deserialize, Serialize};

/// A named viewport-width threshold, ordered ascending.
///
/// `Mobile` is the floor: its rules apply unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// All breakpoints, smallest first.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];

    /// Minimum viewport width in pixels.
    #[inline]
    pub const fn min_width(self) -> u32 {
        match self {
            Breakpoint::Mobile => 0,
            Breakpoint::Tablet => 768,
            Breakpoint::Desktop => 1024,
        }
    }

    /// Key used in breakpoint-keyed mappings.
    #[inline]
    pub const fn key(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mobile" => Some(Breakpoint::Mobile),
            "tablet" => Some(Breakpoint::Tablet),
            "desktop" => Some(Breakpoint::Desktop),
            _ => None,
        }
    }

    /// Classify a viewport width.
    pub fn for_width(width: u32) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Mobile)
    }

    /// Media condition gating this breakpoint's overrides.
    ///
    /// `None` for `Mobile`, whose rules are unconditional.
    pub fn media_query(self) -> Option<String> {
        match self {
            Breakpoint::Mobile => None,
            bp => Some(format!("@media (min-width: {}px)", bp.min_width())),
        }
    }

    /// This breakpoint and every smaller one, nearest first.
    pub fn fallback_chain(self) -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().rev().filter(move |bp| *bp <= self)
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
