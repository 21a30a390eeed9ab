// Copyright (c) 2023 The MobileCoin Foundation

//! A parsed CRL together with the state derived from it over time

use crate::digest::{self, Digester, OtherHash, ShaDigester};
use crate::parser::{parse_crl, CrlRecord};
use crate::revocation::{self, RevokedCertItem};
use crate::signature::{self, RustCryptoVerifier, SignatureVerifier};
use crate::status::{Actuality, VerifyStatus};
use crate::{Error, Result};
use const_oid::ObjectIdentifier;
use der::asn1::OctetString;
use der::{Decode, Encode, Header, Reader, SliceReader};
use std::collections::HashMap;
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use x509_cert::spki::AlgorithmIdentifierOwned;
use x509_cert::Certificate;

#[derive(Debug, Default)]
struct ItemState {
    hashes: HashMap<ObjectIdentifier, OtherHash>,
    status_sign: VerifyStatus,
    actuality: Actuality,
    file_name: Option<String>,
}

/// A CRL as held by a store.
///
/// Dereferences to the immutable [`CrlRecord`]. Hashes, the signature status,
/// the actuality and the file name live behind one lock, so an item can be
/// shared between threads.
#[derive(Debug)]
pub struct CrlItem {
    record: CrlRecord,
    state: Mutex<ItemState>,
}

impl From<CrlRecord> for CrlItem {
    fn from(record: CrlRecord) -> Self {
        Self {
            record,
            state: Mutex::new(ItemState::default()),
        }
    }
}

impl TryFrom<Vec<u8>> for CrlItem {
    type Error = Error;

    fn try_from(encoded: Vec<u8>) -> Result<Self> {
        Ok(parse_crl(encoded)?.into())
    }
}

impl TryFrom<&[u8]> for CrlItem {
    type Error = Error;

    fn try_from(encoded: &[u8]) -> Result<Self> {
        Self::try_from(encoded.to_vec())
    }
}

impl Deref for CrlItem {
    type Target = CrlRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

impl CrlItem {
    fn state(&self) -> MutexGuard<'_, ItemState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The parsed CRL.
    pub fn record(&self) -> &CrlRecord {
        &self.record
    }

    /// Hash the encoded CRL with `algorithm`.
    ///
    /// Hashes are cached by algorithm OID, parameters don't take part in the
    /// lookup.
    pub fn generate_hash(&self, algorithm: &AlgorithmIdentifierOwned) -> Result<OtherHash> {
        self.generate_hash_with(&ShaDigester, algorithm)
    }

    /// Same as [`CrlItem::generate_hash`] with a custom digest primitive.
    pub fn generate_hash_with(
        &self,
        digester: &impl Digester,
        algorithm: &AlgorithmIdentifierOwned,
    ) -> Result<OtherHash> {
        let mut state = self.state();
        if let Some(hash) = state.hashes.get(&algorithm.oid) {
            return Ok(hash.clone());
        }

        let hash = OtherHash {
            hash_algorithm: algorithm.clone(),
            hash_value: digest::hash_with(digester, &algorithm.oid, self.encoded())?,
        };
        state.hashes.insert(algorithm.oid, hash.clone());
        Ok(hash)
    }

    /// Check the CRL signature against the key of `issuer`.
    ///
    /// A decided status is returned as is unless `force` is set. Without an
    /// issuer the status stays [`VerifyStatus::Indeterminate`].
    ///
    /// A mismatching signature gives [`VerifyStatus::Invalid`], any other
    /// failure of the primitive gives [`VerifyStatus::Failed`].
    ///
    /// # Errors
    /// [`Error::InvalidStruct`] when the signed portion or the signature value
    /// can not be extracted, the status is left
    /// [`VerifyStatus::Indeterminate`].
    pub fn verify(&self, issuer: Option<&Certificate>, force: bool) -> Result<VerifyStatus> {
        self.verify_with(&RustCryptoVerifier, issuer, force)
    }

    /// Same as [`CrlItem::verify`] with a custom signature primitive.
    pub fn verify_with(
        &self,
        verifier: &impl SignatureVerifier,
        issuer: Option<&Certificate>,
        force: bool,
    ) -> Result<VerifyStatus> {
        let mut state = self.state();
        if !force && state.status_sign.is_decided() {
            return Ok(state.status_sign);
        }

        state.status_sign = VerifyStatus::Indeterminate;
        let Some(issuer) = issuer else {
            return Ok(VerifyStatus::Indeterminate);
        };

        let tbs = self.tbs_bytes()?;
        let signature = self.signature_value()?;
        let algorithm = &self.certificate_list().signature_algorithm;
        let key = &issuer.tbs_certificate.subject_public_key_info;

        let status = match verifier.verify_signature(algorithm, tbs, key, &signature) {
            Ok(()) => VerifyStatus::Valid,
            Err(Error::VerifyFailed) => VerifyStatus::Invalid,
            Err(e) => {
                log::debug!("Unable to verify CRL signature: {e}");
                VerifyStatus::Failed
            }
        };
        log::debug!(
            "CRL {} signature is {status}",
            hex::encode(self.crl_number())
        );

        state.status_sign = status;
        Ok(status)
    }

    /// The signed portion of the CRL, sliced out of the original encoding.
    fn tbs_bytes(&self) -> Result<&[u8]> {
        let encoded = self.encoded();
        let mut reader = SliceReader::new(encoded).map_err(|_| Error::InvalidStruct)?;
        Header::decode(&mut reader).map_err(|_| Error::InvalidStruct)?;
        let offset = usize::try_from(reader.position()).map_err(|_| Error::InvalidStruct)?;

        let header = Header::decode(&mut reader).map_err(|_| Error::InvalidStruct)?;
        let tbs_length = (header.encoded_len()? + header.length)?;
        let end = offset + usize::try_from(tbs_length).map_err(|_| Error::InvalidStruct)?;
        encoded.get(offset..end).ok_or(Error::InvalidStruct)
    }

    fn signature_value(&self) -> Result<Vec<u8>> {
        let certificate_list = self.certificate_list();
        let bits = certificate_list
            .signature
            .as_bytes()
            .ok_or(Error::InvalidStruct)?;
        if signature::is_encapsulated_signature(&certificate_list.signature_algorithm.oid) {
            let inner = OctetString::from_der(bits).map_err(|_| Error::InvalidStruct)?;
            Ok(inner.as_bytes().to_vec())
        } else {
            Ok(bits.to_vec())
        }
    }

    /// The cached signature status.
    pub fn status_sign(&self) -> VerifyStatus {
        self.state().status_sign
    }

    /// Whether this is still the latest CRL of its issuer.
    pub fn actuality(&self) -> Actuality {
        self.state().actuality
    }

    /// Record whether this is still the latest CRL of its issuer.
    pub fn set_actuality(&self, actuality: Actuality) {
        self.state().actuality = actuality;
    }

    /// The name the CRL is persisted under, if one has been assigned.
    pub fn file_name(&self) -> Option<String> {
        self.state().file_name.clone()
    }

    /// Assign the persisted file name. Empty names are refused.
    pub fn set_file_name(&self, file_name: &str) -> bool {
        if file_name.is_empty() {
            return false;
        }
        self.state().file_name = Some(file_name.to_string());
        true
    }

    /// Write the encoded CRL to `directory` under its file name.
    ///
    /// # Errors
    /// * [`Error::InvalidParameter`] when no file name has been assigned.
    /// * [`Error::Io`] when writing fails.
    pub fn save_to_file(&self, directory: impl AsRef<Path>) -> Result<()> {
        let state = self.state();
        let file_name = state
            .file_name
            .as_deref()
            .ok_or(Error::InvalidParameter("CRL has no file name"))?;
        fs::write(directory.as_ref().join(file_name), self.encoded())?;
        Ok(())
    }

    /// Number of entries in the revoked certificates list.
    pub fn count_revoked_certs(&self) -> usize {
        self.certificate_list()
            .tbs_cert_list
            .revoked_certificates
            .as_ref()
            .map_or(0, Vec::len)
    }

    /// The file name derived from the authority key ID, the CRL type and the
    /// CRL number, e.g. `0a1b...-full-0f.crl`.
    ///
    /// Empty when the CRL has no authority key ID.
    pub fn generate_file_name(&self) -> String {
        let aki = self.authority_key_id().map(hex::encode).unwrap_or_default();
        let crl_number = hex::encode(self.crl_number());
        if aki.is_empty() || crl_number.is_empty() {
            return String::new();
        }
        format!("{aki}{}{crl_number}.crl", self.crl_type().file_marker())
    }

    /// The revocation events of `subject` in this CRL.
    pub fn revoked_certs(&self, subject: &Certificate) -> Vec<RevokedCertItem> {
        revocation::revoked_certs(&self.record, subject)
    }
}
