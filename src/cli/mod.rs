//! Command-line consumer: argument parsing, provider selection and the
//! interactive session.

pub mod command;
pub mod render;
pub mod session;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::config::{Config, ConfigError};
use crate::provider::{DataProvider, HttpProvider, InMemoryProvider, ProviderError};

pub use session::run;

#[derive(Debug, Parser)]
#[command(name = "itemgrid", version, about = "Search and page through a remote item collection")]
pub struct Args {
    /// Config file (default: ~/.config/itemgrid/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the items service base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Items per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<u64>,

    /// Initial search query
    #[arg(long, short)]
    pub query: Option<String>,

    /// Initial page, starting at 1
    #[arg(long, short, value_name = "N")]
    pub page: Option<u64>,

    /// Serve N generated items from memory instead of the items service
    #[arg(long, value_name = "N")]
    pub demo: Option<u64>,

    /// Artificial response latency in demo mode
    #[arg(long, value_name = "MS", default_value_t = 0, requires = "demo")]
    pub demo_latency_ms: u64,
}

impl Args {
    /// Load the config file and apply command-line overrides on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.provider.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.view.page_size = page_size;
        }
        if let Some(query) = &self.query {
            config.view.initial_query = query.clone();
        }
        if let Some(page) = self.page {
            config.view.initial_page = page.saturating_sub(1);
        }
    }

    /// The provider selected by the arguments.
    pub fn provider(&self, config: &Config) -> Result<Arc<dyn DataProvider>, ProviderError> {
        match self.demo {
            Some(count) => {
                tracing::info!(count, latency_ms = self.demo_latency_ms, "Using in-memory demo provider");
                let provider = InMemoryProvider::numbered(count)
                    .with_latency(Duration::from_millis(self.demo_latency_ms));
                Ok(Arc::new(provider))
            }
            None => {
                let provider = HttpProvider::new(&config.provider)?;
                tracing::info!(endpoint = provider.endpoint(), "Using HTTP provider");
                Ok(Arc::new(provider))
            }
        }
    }
}
