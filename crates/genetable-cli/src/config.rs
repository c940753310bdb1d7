//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use genetable_alliance::MissingPolicy;
use genetable_alliance::config as source;
use serde::Deserialize;

/// Global configuration for genetable
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub organism: OrganismConfig,
    pub output: OutputConfig,
    pub export: ExportConfig,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: source::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrganismConfig {
    /// Accepts `559292` or `"559292"`
    #[serde(deserialize_with = "deserialize_id")]
    pub taxon_id: String,
    pub file_prefix: String,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            taxon_id: source::DEFAULT_TAXON_ID.to_string(),
            file_prefix: source::DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub page_size: u32,
    pub on_missing: MissingPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: source::DEFAULT_PAGE_SIZE,
            on_missing: MissingPolicy::default(),
        }
    }
}

/// HTTP timeouts in seconds
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub connect_timeout: u64,
    /// Unset = no whole-request limit
    pub request_timeout: Option<u64>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: 30,
            request_timeout: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Num(u64),
    Text(String),
}

/// Deserialize an identifier written either as a TOML integer or string
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match IdValue::deserialize(deserializer)? {
        IdValue::Num(n) => n.to_string(),
        IdValue::Text(s) => s,
    })
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./genetable.toml (current directory)
    /// 2. ~/.config/genetable/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("genetable.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "genetable") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pipeline config seeded from this file config; CLI flags override afterwards
    pub fn source_config(&self) -> source::Config {
        source::Config {
            base_url: self.api.base_url.clone(),
            taxon_id: self.organism.taxon_id.clone(),
            page_size: self.export.page_size,
            max_genes: None,
            on_missing: self.export.on_missing,
            output_dir: self.output.default_dir.clone(),
            file_prefix: self.organism.file_prefix.clone(),
        }
    }

    pub fn http_config(&self) -> genetable_core::HttpConfig {
        genetable_core::HttpConfig {
            connect_timeout: std::time::Duration::from_secs(self.http.connect_timeout),
            request_timeout: self.http.request_timeout.map(std::time::Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://www.alliancegenome.org");
        assert_eq!(config.organism.taxon_id, "559292");
        assert_eq!(config.output.default_dir, PathBuf::from("."));
        assert_eq!(config.export.page_size, 10_000);
        assert_eq!(config.export.on_missing, MissingPolicy::Skip);
        assert!(config.http.request_timeout.is_none());
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[api]
base_url = "http://localhost:8080"

[organism]
taxon_id = 6239
file_prefix = "WB_gene_table"

[output]
default_dir = "/tmp/genes"

[export]
page_size = 500
on_missing = "keep"

[http]
request_timeout = 120
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.organism.taxon_id, "6239");
        assert_eq!(config.organism.file_prefix, "WB_gene_table");
        assert_eq!(config.output.default_dir, PathBuf::from("/tmp/genes"));
        assert_eq!(config.export.page_size, 500);
        assert_eq!(config.export.on_missing, MissingPolicy::Keep);
        assert_eq!(config.http.request_timeout, Some(120));
        assert_eq!(config.http.connect_timeout, 30);
    }

    #[test]
    fn taxon_id_as_string() {
        let config: Config = toml::from_str("[organism]\ntaxon_id = \"559292\"\n").unwrap();
        assert_eq!(config.organism.taxon_id, "559292");
        assert_eq!(config.organism.file_prefix, "SGD_S288C_gene_table");
    }

    #[test]
    fn unknown_policy_rejected() {
        let res: Result<Config, _> = toml::from_str("[export]\non_missing = \"retry\"\n");
        assert!(res.is_err());
    }

    #[test]
    fn source_config_carries_settings() {
        let config: Config =
            toml::from_str("[organism]\ntaxon_id = 7227\n[export]\npage_size = 50\n").unwrap();
        let src = config.source_config();
        assert_eq!(src.taxon_id, "7227");
        assert_eq!(src.page_size, 50);
        assert!(src.max_genes.is_none());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("genetable.toml");
        std::fs::write(&path, "[http]\nconnect_timeout = 5\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config.http_config().connect_timeout,
            std::time::Duration::from_secs(5)
        );
    }
}
