// Copyright (c) 2023 The MobileCoin Foundation

//! Configuration of a [`CrlStore`](crate::CrlStore)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for a [`CrlStore`](crate::CrlStore).
///
/// ```
/// # use mc_crl_revocation::StoreConfig;
/// let config = StoreConfig::from_json(r#"{"path": "/var/lib/crls", "useDeltaCrl": false}"#)
///     .expect("valid config");
/// assert!(!config.use_delta_crl);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Directory CRL files are persisted to and loaded from. `None` keeps the
    /// store in memory only.
    pub path: Option<PathBuf>,
    /// Whether delta CRLs are handed out by lookups.
    pub use_delta_crl: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            use_delta_crl: true,
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from a JSON document.
    ///
    /// Missing keys take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            log::debug!("Invalid store configuration: {e}");
            Error::InvalidParameter("store configuration is not valid JSON")
        })
    }
}
