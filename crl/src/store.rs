// Copyright (c) 2023 The MobileCoin Foundation

//! A collection of CRLs indexed by their CRL ID

use crate::config::StoreConfig;
use crate::item::CrlItem;
use crate::parser::parse_crl;
use crate::status::{Actuality, CrlType};
use crate::Result;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const CRL_FILE_EXTENSION: &str = "crl";

/// Thread safe store of [`CrlItem`]s.
///
/// Items are unique by CRL ID. For every authority key ID and CRL type the
/// item with the latest `thisUpdate` is marked [`Actuality::IsActual`], older
/// ones [`Actuality::IsNotActual`].
#[derive(Debug, Default)]
pub struct CrlStore {
    config: StoreConfig,
    items: Mutex<Vec<Arc<CrlItem>>>,
}

impl CrlStore {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            items: Mutex::new(Vec::new()),
        }
    }

    /// The configuration the store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn items(&self) -> MutexGuard<'_, Vec<Arc<CrlItem>>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Parse `encoded` and add it to the store.
    ///
    /// Returns the stored item and whether it is new. When a CRL with the same
    /// CRL ID is already present that item is returned instead.
    ///
    /// With `permanent` set and a configured path the CRL is also written to
    /// disk under [`CrlItem::generate_file_name`]. The CRL is only added once
    /// it has been written, a failed write leaves the store unchanged.
    pub fn add_crl(&self, encoded: Vec<u8>, permanent: bool) -> Result<(Arc<CrlItem>, bool)> {
        let item = CrlItem::from(parse_crl(encoded)?);
        let file_name = item.generate_file_name();
        let save_to = self.config.path.as_deref().filter(|_| permanent);
        self.admit(item, &file_name, save_to)
    }

    fn admit(
        &self,
        item: CrlItem,
        file_name: &str,
        save_to: Option<&Path>,
    ) -> Result<(Arc<CrlItem>, bool)> {
        let mut items = self.items();
        if let Some(existing) = items.iter().find(|other| other.crl_id() == item.crl_id()) {
            return Ok((existing.clone(), false));
        }

        if item.set_file_name(file_name) {
            if let Some(directory) = save_to {
                item.save_to_file(directory)?;
            }
        }

        let mut actuality = Actuality::IsActual;
        if item.authority_key_id().is_some() {
            for other in items.iter().filter(|other| {
                other.authority_key_id() == item.authority_key_id()
                    && other.crl_type() == item.crl_type()
            }) {
                if other.this_update() > item.this_update() {
                    actuality = Actuality::IsNotActual;
                } else {
                    other.set_actuality(Actuality::IsNotActual);
                }
            }
        }
        item.set_actuality(actuality);

        log::debug!(
            "Added {} CRL number {} as {actuality}",
            item.crl_type(),
            hex::encode(item.crl_number())
        );

        let item = Arc::new(item);
        items.push(item.clone());
        Ok((item, true))
    }

    /// The latest CRL of `crl_type` issued under `authority_key_id`.
    ///
    /// Delta CRLs are only returned when the store is configured to use them.
    pub fn get_crl(&self, authority_key_id: &[u8], crl_type: CrlType) -> Option<Arc<CrlItem>> {
        if crl_type == CrlType::Delta && !self.config.use_delta_crl {
            return None;
        }
        self.items()
            .iter()
            .filter(|item| {
                item.authority_key_id() == Some(authority_key_id) && item.crl_type() == crl_type
            })
            .max_by_key(|item| item.this_update())
            .cloned()
    }

    /// The CRL with the DER encoded `crl_id`.
    pub fn get_crl_by_crl_id(&self, crl_id: &[u8]) -> Option<Arc<CrlItem>> {
        self.items()
            .iter()
            .find(|item| item.crl_id() == crl_id)
            .cloned()
    }

    /// The CRL at `index`, in the order the CRLs were added.
    pub fn get_crl_by_index(&self, index: usize) -> Option<Arc<CrlItem>> {
        self.items().get(index).cloned()
    }

    /// Number of CRLs in the store.
    pub fn count(&self) -> usize {
        self.items().len()
    }

    /// A snapshot of every CRL in the store.
    pub fn crl_items(&self) -> Vec<Arc<CrlItem>> {
        self.items().clone()
    }

    /// Remove the CRL with `crl_id`, or every CRL when `crl_id` is `None`.
    ///
    /// `permanent` also deletes the persisted files. Returns the number of
    /// removed CRLs.
    pub fn remove_crl(&self, crl_id: Option<&[u8]>, permanent: bool) -> Result<usize> {
        let removed = {
            let mut items = self.items();
            let (removed, kept) = items
                .drain(..)
                .partition::<Vec<_>, _>(|item| crl_id.map_or(true, |id| item.crl_id() == id));
            *items = kept;
            removed
        };

        if permanent {
            if let Some(path) = &self.config.path {
                for file_name in removed.iter().filter_map(|item| item.file_name()) {
                    remove_file(&path.join(file_name))?;
                }
            }
        }

        log::debug!("Removed {} CRL(s)", removed.len());
        Ok(removed.len())
    }

    /// Add every `*.crl` file in the configured directory.
    ///
    /// Files that can't be read or parsed are skipped. Returns the number of
    /// CRLs added.
    pub fn load(&self) -> Result<usize> {
        let Some(path) = &self.config.path else {
            return Ok(0);
        };

        let mut added = 0;
        for entry in fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.extension() != Some(OsStr::new(CRL_FILE_EXTENSION)) {
                continue;
            }
            let Some(file_name) = file_path.file_name().and_then(OsStr::to_str) else {
                continue;
            };

            match load_file(&file_path) {
                Ok(item) => {
                    if self.admit(item, file_name, None)?.1 {
                        added += 1;
                    }
                }
                Err(e) => log::warn!("Skipping CRL file {}: {e}", file_path.display()),
            }
        }

        log::debug!("Loaded {added} CRL(s) from {}", path.display());
        Ok(added)
    }
}

fn load_file(path: &Path) -> Result<CrlItem> {
    Ok(CrlItem::from(parse_crl(fs::read(path)?)?))
}

fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}
