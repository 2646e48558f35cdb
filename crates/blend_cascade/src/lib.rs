//! # blend_cascade
//!
//! Cascade - Responsive style resolution for Blend components.
//!
//! ## Name Origin
//!
//! A **cascade** is how layered washes of colour settle into one finished
//! surface, and how CSS settles competing rules into one computed style. This
//! crate turns declarative responsive props (`{ mobile, tablet, desktop }`)
//! into ordered, mobile-first style rules that layer correctly under the
//! cascade.
//!
//! ## Usage
//!
//! ```rust
//! use blend_cascade::{resolve_property, Breakpoint, ResponsiveValue};
//!
//! let padding = ResponsiveValue::responsive([
//!     (Breakpoint::Mobile, "8px"),
//!     (Breakpoint::Desktop, "16px"),
//! ]);
//! let rules = resolve_property("padding", &padding);
//!
//! assert_eq!(rules.base().get("padding"), Some(&"8px"));
//! assert_eq!(padding.value_for_breakpoint(Breakpoint::Tablet), Some(&"8px"));
//! ```
//!
//! Resolution never fails: malformed responsive values contribute nothing.

pub mod breakpoint;
pub mod responsive;
pub mod rules;
pub mod tokens;

pub use breakpoint::Breakpoint;
pub use responsive::{is_breakpoint_map, BreakpointMap, ResponsiveValue};
pub use rules::{
    resolve_json, resolve_multiple, resolve_property, CssValue, RuleSelector, StyleRuleSet,
};
pub use tokens::{deep_merge, ComponentTokens, FoundationTokens};

/// Value in effect for `breakpoint`; bare values apply everywhere.
#[inline]
pub fn value_for_breakpoint<T>(value: &ResponsiveValue<T>, breakpoint: Breakpoint) -> Option<&T> {
    value.value_for_breakpoint(breakpoint)
}
