//! Catalog configuration from TOML (`[catalog]` section)

use nutrichat_domain::catalog::page::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// Foods per page
    pub page_size: usize,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
