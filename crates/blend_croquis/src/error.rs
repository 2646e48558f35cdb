//! Error types for metadata extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while locating, parsing or reading component sources.
#[derive(Debug, Error)]
pub enum CroquisError {
    #[error("component '{component}' not found (tried: {})", format_paths(.attempted))]
    NotFound {
        component: String,
        attempted: Vec<PathBuf>,
    },

    #[error("directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("no props declaration found for '{component}' (expected {component}Props or Props)")]
    PropsNotFound { component: String },
}

impl CroquisError {
    /// Paths that were tried before giving up, if this is a lookup failure.
    pub fn attempted_paths(&self) -> &[PathBuf] {
        match self {
            CroquisError::NotFound { attempted, .. } => attempted,
            CroquisError::RootNotFound(path) => std::slice::from_ref(path),
            _ => &[],
        }
    }

    /// Whether the failure is "something is missing on disk".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CroquisError::NotFound { .. } | CroquisError::RootNotFound(_)
        )
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, CroquisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_paths() {
        let err = CroquisError::NotFound {
            component: "Button".into(),
            attempted: vec![PathBuf::from("a/types.ts"), PathBuf::from("a/index.ts")],
        };
        assert_eq!(
            err.to_string(),
            "component 'Button' not found (tried: a/types.ts, a/index.ts)"
        );
        assert!(err.is_not_found());
        assert_eq!(err.attempted_paths().len(), 2);
    }
}
