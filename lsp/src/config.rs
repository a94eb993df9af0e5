//! Inspection configuration: which servers exist and which files they cover.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_enabled() -> bool {
    true
}

/// Configuration for the LSP inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectionConfig {
    /// Whether the inspection runs at all. Default: true.
    #[serde(default = "default_enabled")]
    enabled: bool,
    /// Per-language server configurations, keyed by name (e.g. "rust").
    #[serde(default)]
    servers: HashMap<String, ServerConfig>,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            servers: HashMap::new(),
        }
    }
}

/// Configuration for a single language server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// LSP language identifier (e.g. "rust", "python").
    language_id: String,
    /// File extensions this server handles (e.g. `["rs"]`).
    #[serde(default)]
    file_extensions: Vec<String>,
}

impl InspectionConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load a config file; `.json` files are JSON, anything else is TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn servers(&self) -> &HashMap<String, ServerConfig> {
        &self.servers
    }
}

impl ServerConfig {
    #[must_use]
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    #[must_use]
    pub fn file_extensions(&self) -> &[String] {
        &self.file_extensions
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

/// File extension → server name.
#[derive(Debug, Clone, Default)]
pub struct ExtensionMap {
    enabled: bool,
    map: HashMap<String, String>,
}

impl ExtensionMap {
    /// Servers are visited in name order so overlapping claims resolve the
    /// same way every time: the first name wins.
    #[must_use]
    pub fn from_config(config: &InspectionConfig) -> Self {
        let mut map = HashMap::new();
        let mut server_names: Vec<&String> = config.servers().keys().collect();
        server_names.sort();
        for name in server_names {
            let server_config = &config.servers()[name];
            for ext in server_config.file_extensions() {
                let ext = normalize_extension(ext);
                if let Some(existing) = map.get(&ext) {
                    tracing::warn!(
                        "Multiple LSP servers configured for extension '{ext}': '{existing}' and '{name}'. Using '{existing}'."
                    );
                    continue;
                }
                map.insert(ext, name.clone());
            }
        }
        Self {
            enabled: config.enabled(),
            map,
        }
    }

    /// Case-insensitive; a leading dot is ignored. Always false when disabled.
    #[must_use]
    pub fn is_supported(&self, extension: Option<&str>) -> bool {
        self.server_for(extension).is_some()
    }

    #[must_use]
    pub fn server_for(&self, extension: Option<&str>) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        let ext = normalize_extension(extension?);
        self.map.get(&ext).map(String::as_str)
    }
}
