//! Runtime configuration.
//!
//! Defaults target ncore.pro with the usual movie categories; every value can be
//! overridden through an environment variable.

use std::str::FromStr;
use std::time::Duration;

use crate::site::Category;
use crate::{Error, Result};

pub const BASE_URL_VAR: &str = "NCORE_BASE_URL";
pub const TIMEOUT_VAR: &str = "NCORE_TIMEOUT_SECS";
pub const CATEGORIES_VAR: &str = "NCORE_CATEGORIES";
pub const CATEGORY_LIMIT_VAR: &str = "NCORE_CATEGORY_LIMIT";
pub const RESULT_LIMIT_VAR: &str = "NCORE_RESULT_LIMIT";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub site: SiteConfig,
    pub search: SearchConfig,
}

/// HTTP settings for the site client.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ncore.pro".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("ncore-tools/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Search fan-out settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Categories queried, in order.
    pub categories: Vec<Category>,
    /// Records kept from each category.
    pub per_category_limit: usize,
    /// Records kept after merging.
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::HdHun,
                Category::HdEng,
                Category::SdHun,
                Category::SdEng,
            ],
            per_category_limit: 5,
            result_limit: 20,
        }
    }
}

impl Config {
    /// Creates configuration with environment variable overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with a caller supplied variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.site.base_url = base_url;
        }
        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            config.site.timeout = Duration::from_secs(parse_var(TIMEOUT_VAR, &timeout)?);
        }
        if let Some(categories) = lookup(CATEGORIES_VAR) {
            config.search.categories = categories
                .split(',')
                .filter(|c| !c.trim().is_empty())
                .map(Category::from_str)
                .collect::<Result<_>>()?;
        }
        if let Some(limit) = lookup(CATEGORY_LIMIT_VAR) {
            config.search.per_category_limit = parse_var(CATEGORY_LIMIT_VAR, &limit)?;
        }
        if let Some(limit) = lookup(RESULT_LIMIT_VAR) {
            config.search.result_limit = parse_var(RESULT_LIMIT_VAR, &limit)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{}={:?} is not a valid number", name, value)))
}
