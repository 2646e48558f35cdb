//! Carton - The shared toolbox for Blend tooling.
//!
//! Like an artist's portfolio case, this crate holds the small things every
//! other Blend crate reaches for: ordered and fast maps, text helpers used by
//! the Markdown and JSX renderers, and the layered [`BlendConfig`].
//!
//! # Example
//!
//! ```
//! use blend_carton::text::indent;
//!
//! assert_eq!(indent("<Button />", 1), "  <Button />");
//! ```

pub mod config;
pub mod text;

pub use config::{BlendConfig, ConfigFile, BLEND_CONFIG_FILE, BLEND_CONFIG_SCHEMA};

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Ordered maps keep declaration order stable across renders
pub use indexmap::{IndexMap, IndexSet};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};
