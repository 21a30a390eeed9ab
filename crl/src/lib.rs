// Copyright (c) 2023 The MobileCoin Foundation

#![doc = include_str!("../README.md")]
#![deny(missing_docs, missing_debug_implementations, unsafe_code)]

pub mod asn1;
mod config;
mod digest;
mod error;
pub mod extensions;
mod identifier;
mod item;
mod parser;
mod revocation;
mod signature;
mod status;
mod store;

pub use crate::config::StoreConfig;
pub use crate::digest::{DigestAlgorithm, Digester, OtherHash, ShaDigester};
pub use crate::error::{Error, Result};
pub use crate::identifier::{
    decode_crl_identifier, encode_crl_id, encode_crl_identifier, DecodedCrlIdentifier,
};
pub use crate::item::CrlItem;
pub use crate::parser::{parse_crl, CrlRecord, CrlUris};
pub use crate::revocation::{
    find_near_before, find_revoked_cert, revoked_certs, RevocationResult, RevokedCertItem,
};
pub use crate::signature::{is_encapsulated_signature, RustCryptoVerifier, SignatureVerifier};
pub use crate::status::{Actuality, CertStatus, CrlReason, CrlType, VerifyStatus};
pub use crate::store::CrlStore;

use core::time::Duration;

/// Milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
