//! Layered configuration for Blend tooling.
//!
//! Values are resolved lowest to highest precedence:
//! built-in defaults, `blend.config.json` in the working directory,
//! `BLEND_*` environment variables, then explicit overrides from the caller
//! (usually CLI flags).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const BLEND_CONFIG_FILE: &str = "blend.config.json";

pub const ENV_LIBRARY_ROOT: &str = "BLEND_LIBRARY_ROOT";
pub const ENV_DEMO_DIR: &str = "BLEND_DEMO_DIR";
pub const ENV_PACKAGE_NAME: &str = "BLEND_PACKAGE_NAME";
pub const ENV_METADATA_ROOT: &str = "BLEND_METADATA_ROOT";

const DEFAULT_LIBRARY_ROOT: &str = "packages/blend/lib/components";
const DEFAULT_DEMO_DIR: &str = "apps/blend-monorepo/src/demos";
pub const DEFAULT_PACKAGE_NAME: &str = "@juspay/blend-design-system";
const DEFAULT_METADATA_ROOT: &str = "apps/docs/meta";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendConfig {
    /// Directory holding one sub-directory per component.
    pub library_root: PathBuf,
    /// Directory holding demo pages.
    pub demo_dir: PathBuf,
    /// Package name used in generated import statements.
    pub package_name: String,
    /// Directory holding `*.context.ts` descriptor files.
    pub metadata_root: PathBuf,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            library_root: PathBuf::from(DEFAULT_LIBRARY_ROOT),
            demo_dir: PathBuf::from(DEFAULT_DEMO_DIR),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            metadata_root: PathBuf::from(DEFAULT_METADATA_ROOT),
        }
    }
}

/// Contents of `blend.config.json`. Every key is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_root: Option<PathBuf>,
}

impl BlendConfig {
    /// Resolve configuration from `dir` (or CWD if None) and the process environment.
    pub fn load(dir: Option<&Path>) -> Self {
        let mut config = Self::default();
        config.apply_file(&load_config_file(dir));
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlay values present in a parsed config file.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(ref root) = file.library_root {
            self.library_root = root.clone();
        }
        if let Some(ref dir) = file.demo_dir {
            self.demo_dir = dir.clone();
        }
        if let Some(ref name) = file.package_name {
            self.package_name = name.clone();
        }
        if let Some(ref root) = file.metadata_root {
            self.metadata_root = root.clone();
        }
    }

    /// Overlay `BLEND_*` variables. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(root) = get(ENV_LIBRARY_ROOT) {
            self.library_root = PathBuf::from(root);
        }
        if let Some(dir) = get(ENV_DEMO_DIR) {
            self.demo_dir = PathBuf::from(dir);
        }
        if let Some(name) = get(ENV_PACKAGE_NAME) {
            self.package_name = name;
        }
        if let Some(root) = get(ENV_METADATA_ROOT) {
            self.metadata_root = PathBuf::from(root);
        }
    }
}

/// Read `blend.config.json` from the given directory (or CWD if None).
///
/// A missing file yields the empty config; an unreadable or malformed file is
/// reported through `tracing` and ignored.
pub fn load_config_file(dir: Option<&Path>) -> ConfigFile {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join(BLEND_CONFIG_FILE);

    if !config_path.exists() {
        return ConfigFile::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to parse {}: {}", config_path.display(), e);
                ConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read {}: {}", config_path.display(), e);
            ConfigFile::default()
        }
    }
}

/// JSON Schema for `blend.config.json`.
pub const BLEND_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Blend Tooling Configuration",
  "description": "Configuration file for the blend component tooling and MCP server",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "libraryRoot": {
      "type": "string",
      "description": "Directory holding one sub-directory per component (overridden by BLEND_LIBRARY_ROOT)"
    },
    "demoDir": {
      "type": "string",
      "description": "Directory holding demo pages (overridden by BLEND_DEMO_DIR)"
    },
    "packageName": {
      "type": "string",
      "description": "Package name used by generated import statements (overridden by BLEND_PACKAGE_NAME)"
    },
    "metadataRoot": {
      "type": "string",
      "description": "Directory holding *.context.ts descriptor files (overridden by BLEND_METADATA_ROOT)"
    }
  },
  "additionalProperties": false
}"#;

/// Write the JSON Schema to `.blend/blend.config.schema.json` under `dir`.
pub fn write_schema(dir: Option<&Path>) -> std::io::Result<PathBuf> {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let schema_dir = base.join(".blend");
    std::fs::create_dir_all(&schema_dir)?;
    let schema_path = schema_dir.join("blend.config.schema.json");
    std::fs::write(&schema_path, BLEND_CONFIG_SCHEMA)?;
    Ok(schema_path)
}
