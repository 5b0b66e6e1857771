//! Configuration module
//!
//! Connection settings shared by every command, plus the settings of a
//! search run.

use anyhow::{Context, Result};
use autochef_client::ChefClient;
use autochef_core::catalog::{Catalog, KeyMaterial, SlotPolicy};
use autochef_core::classify::ClassifierKind;
use autochef_core::dto::magic::MagicArgs;
use std::path::PathBuf;
use std::time::Duration;

use crate::service::SearchOptions;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the transformation service
    pub server_url: String,
    /// Sent as `x-api-key` to hosted services
    pub api_key: Option<String>,
    /// Request timeout; the transport default when unset
    pub timeout: Option<Duration>,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            anyhow::bail!("server_url cannot be empty");
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            anyhow::bail!("server_url must start with http:// or https://");
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds a service client from this configuration
    pub fn client(&self, magic_args: MagicArgs) -> Result<ChefClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to build HTTP client")?;

        let client =
            ChefClient::with_client(&self.server_url, http_client).with_magic_args(magic_args);

        Ok(match &self.api_key {
            Some(key) => client.with_api_key(key),
            None => client,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

/// Search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub magic: MagicArgs,
    /// Catalog file; the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    pub keys: KeyMaterial,
    /// Skip entries whose key/IV slots are not filled instead of sending blanks
    pub strict_slots: bool,
    pub classifier: ClassifierKind,
    pub concurrency: usize,
    /// Search with an empty prefix when detection fails
    pub allow_blind: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            magic: MagicArgs::default(),
            catalog_path: None,
            keys: KeyMaterial::default(),
            strict_slots: false,
            classifier: ClassifierKind::default(),
            concurrency: 1,
            allow_blind: false,
        }
    }
}

impl SearchConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.magic.depth == 0 {
            anyhow::bail!("depth must be greater than 0");
        }

        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be greater than 0");
        }

        Ok(())
    }

    /// Loads the configured catalog
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Invalid catalog file: {}", path.display()))
            }
            None => Catalog::builtin().context("Built-in catalog is invalid"),
        }
    }

    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            keys: self.keys.clone(),
            slot_policy: if self.strict_slots {
                SlotPolicy::Strict
            } else {
                SlotPolicy::Blank
            },
            concurrency: self.concurrency,
            allow_blind: self.allow_blind,
        }
    }
}
