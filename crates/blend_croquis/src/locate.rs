//! Component source discovery under a library root.

use std::path::{Path, PathBuf};

use crate::error::{CroquisError, Result};

/// File names tried inside a component directory, highest priority first.
/// `{}` stands for the component name.
const SOURCE_CANDIDATES: &[&str] = &["types.ts", "types.tsx", "{}.tsx", "index.ts"];

/// Candidate source paths for `component`, in search order.
pub fn candidate_paths(component: &str, library_root: &Path) -> Vec<PathBuf> {
    let dir = library_root.join(component);
    SOURCE_CANDIDATES
        .iter()
        .map(|pattern| dir.join(pattern.replace("{}", component)))
        .collect()
}

/// Return the first existing source file for `component`.
pub fn locate_component_source(component: &str, library_root: &Path) -> Result<PathBuf> {
    let attempted = candidate_paths(component, library_root);
    match attempted.iter().find(|p| p.is_file()) {
        Some(found) => {
            tracing::debug!("{} resolved to {}", component, found.display());
            Ok(found.clone())
        }
        None => Err(CroquisError::NotFound {
            component: component.to_string(),
            attempted,
        }),
    }
}

/// Component directory names under `library_root`, sorted.
///
/// Hidden directories (leading `.`) are skipped.
pub fn list_components(library_root: &Path) -> Result<Vec<String>> {
    if !library_root.is_dir() {
        return Err(CroquisError::RootNotFound(library_root.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(library_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}
