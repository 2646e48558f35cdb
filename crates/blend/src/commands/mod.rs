//! Subcommand implementations.

pub mod docs;
pub mod generate;
pub mod list;
pub mod mcp;
pub mod metadata;
pub mod props;
pub mod scaffold;
pub mod styles;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use blend_carton::BlendConfig;
use clap::Args;
use serde::Serialize;

/// Flags accepted by every subcommand. They override `blend.config.json`
/// and `BLEND_*` variables.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Directory holding one sub-directory per component
    #[arg(long, global = true)]
    pub library_root: Option<PathBuf>,

    /// Directory holding demo pages
    #[arg(long, global = true)]
    pub demo_dir: Option<PathBuf>,

    /// Package name used in generated imports
    #[arg(long, global = true)]
    pub package_name: Option<String>,

    /// Directory holding *.context.ts descriptor files
    #[arg(long, global = true)]
    pub metadata_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    /// Load the layered configuration and apply flag overrides on top.
    pub fn resolve(&self) -> BlendConfig {
        let mut config = BlendConfig::load(None);
        self.apply(&mut config);
        config
    }

    fn apply(&self, config: &mut BlendConfig) {
        if let Some(ref root) = self.library_root {
            config.library_root = root.clone();
        }
        if let Some(ref dir) = self.demo_dir {
            config.demo_dir = dir.clone();
        }
        if let Some(ref name) = self.package_name {
            config.package_name = name.clone();
        }
        if let Some(ref root) = self.metadata_root {
            config.metadata_root = root.clone();
        }
    }
}

/// Print `err` to stderr and exit with status 1.
pub fn fail(err: impl Display) -> ! {
    eprintln!("\x1b[31mError:\x1b[0m {}", err);
    std::process::exit(1);
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

/// Read and parse a JSON file, exiting on failure.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(format!("failed to read {}: {}", path.display(), e)),
    };
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(format!("failed to parse {}: {}", path.display(), e)),
    }
}

/// Write `content` to `output`, or stdout when absent.
pub fn emit(content: &str, output: Option<&Path>) {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    fail(format!("failed to create {}: {}", parent.display(), e));
                }
            }
            if let Err(e) = std::fs::write(path, content) {
                fail(format!("failed to write {}: {}", path.display(), e));
            }
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
}

pub fn print_config(config: &BlendConfig) {
    print_json(config);
}

pub fn init_schema() {
    match blend_carton::config::write_schema(None) {
        Ok(path) => eprintln!("Wrote {}", path.display()),
        Err(e) => fail(format!("failed to write schema: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = GlobalArgs {
            package_name: Some("@acme/ui".into()),
            demo_dir: Some("demos".into()),
            ..GlobalArgs::default()
        };
        let mut config = BlendConfig::default();
        args.apply(&mut config);

        assert_eq!(config.package_name, "@acme/ui");
        assert_eq!(config.demo_dir, PathBuf::from("demos"));
        assert_eq!(config.library_root, BlendConfig::default().library_root);
    }

    #[test]
    fn test_emit_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs/Button.md");
        emit("# Button", Some(&path));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Button");
    }
}
