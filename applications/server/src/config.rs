/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_assets")]
    pub assets: AssetSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetSettings {
    /// Directory holding the built page bundle
    #[serde(default = "default_asset_root")]
    pub root: PathBuf,
}

/// Catalog backend credentials injected into the page via `/env.js`.
///
/// Both empty is a supported deployment: the page falls back to its
/// bundled demo catalog.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with STORYDROP_)
        settings = settings.add_source(
            config::Environment::with_prefix("STORYDROP")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.assets.root.is_dir() {
            return Err(ServerError::Config(format!(
                "Asset root not found at {:?} (set STORYDROP_ASSETS_ROOT)",
                self.assets.root
            )));
        }

        if self.catalog.url.is_empty() != self.catalog.anon_key.is_empty() {
            return Err(ServerError::Config(
                "Catalog URL and anon key must be set together".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_assets() -> AssetSettings {
    AssetSettings {
        root: default_asset_root(),
    }
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("./dist")
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings::default()
}
