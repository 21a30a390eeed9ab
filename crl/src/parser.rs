// Copyright (c) 2023 The MobileCoin Foundation

//! Parsing of DER encoded CRLs into a [`CrlRecord`]

use crate::asn1::CertificateList;
use crate::extensions::{self, PointKind};
use crate::identifier::{encode_crl_id, encode_crl_identifier};
use crate::status::CrlType;
use crate::{Error, Result};
use der::{Decode, Encode};
use x509_cert::name::Name;
use x509_cert::time::Time;

/// The distribution point URIs of a CRL.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CrlUris {
    /// Locations of full CRLs, from `cRLDistributionPoints`.
    pub full: Vec<String>,
    /// Locations of delta CRLs, from `freshestCRL`.
    pub delta: Vec<String>,
}

/// A parsed and structurally validated CRL.
///
/// The record owns both the encoded bytes and the decoded tree. Derived
/// identifiers are computed once in [`parse_crl`] and never change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrlRecord {
    encoded: Vec<u8>,
    certificate_list: CertificateList,
    crl_id: Vec<u8>,
    issuer: Vec<u8>,
    this_update: u64,
    next_update: u64,
    authority_key_id: Option<Vec<u8>>,
    crl_number: Vec<u8>,
    delta_crl_indicator: Option<Vec<u8>>,
    crl_identifier: Vec<u8>,
    uris: CrlUris,
    crl_type: CrlType,
}

impl CrlRecord {
    /// The DER bytes the record was parsed from.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// The decoded CRL.
    pub fn certificate_list(&self) -> &CertificateList {
        &self.certificate_list
    }

    /// DER encoded `IssuerAndSerialNumber` made of the issuer and CRL number.
    pub fn crl_id(&self) -> &[u8] {
        &self.crl_id
    }

    /// DER encoded issuer name.
    pub fn issuer(&self) -> &[u8] {
        &self.issuer
    }

    /// The issuer as a decoded name.
    pub fn issuer_name(&self) -> &Name {
        &self.certificate_list.tbs_cert_list.issuer
    }

    /// `thisUpdate` in milliseconds since the Unix epoch.
    pub fn this_update(&self) -> u64 {
        self.this_update
    }

    /// `nextUpdate` in milliseconds since the Unix epoch, 0 when absent.
    pub fn next_update(&self) -> u64 {
        self.next_update
    }

    /// Key identifier of the issuer key, when the CRL names one.
    pub fn authority_key_id(&self) -> Option<&[u8]> {
        self.authority_key_id.as_deref()
    }

    /// Big endian bytes of the CRL number.
    pub fn crl_number(&self) -> &[u8] {
        &self.crl_number
    }

    /// The base CRL number, present only for delta CRLs.
    pub fn delta_crl_indicator(&self) -> Option<&[u8]> {
        self.delta_crl_indicator.as_deref()
    }

    /// DER encoded `CrlIdentifier`.
    pub fn crl_identifier(&self) -> &[u8] {
        &self.crl_identifier
    }

    /// Distribution point URIs.
    pub fn uris(&self) -> &CrlUris {
        &self.uris
    }

    /// [`CrlType::Delta`] when the delta indicator is present.
    pub fn crl_type(&self) -> CrlType {
        self.crl_type
    }

    /// The CRL version number, 1 for lists without a version field.
    pub fn version(&self) -> u32 {
        self.certificate_list
            .tbs_cert_list
            .version
            .map_or(1, |version| version.saturating_add(1))
    }
}

fn unix_millis(time: &Time) -> u64 {
    crate::duration_to_millis(time.to_unix_duration())
}

/// Parse and validate a DER encoded CRL.
///
/// The CRL must be v2 and carry the CRL number extension. The checks run in
/// order and the first failing check decides the error.
///
/// # Errors
/// * [`Error::InvalidStruct`] for undecodable input, missing extensions,
///   mismatched signature algorithms or malformed extensions.
/// * [`Error::InvalidStructVersion`] when the version field is not v2.
pub fn parse_crl(encoded: Vec<u8>) -> Result<CrlRecord> {
    let certificate_list = CertificateList::from_der(&encoded).map_err(|e| {
        log::debug!("Rejecting CRL, failed decoding DER: {e}");
        Error::InvalidStruct
    })?;
    let tbs = &certificate_list.tbs_cert_list;

    let Some(crl_extensions) = tbs.crl_extensions.as_deref() else {
        log::debug!("Rejecting CRL without extensions");
        return Err(Error::InvalidStruct);
    };

    if let Some(version) = tbs.version {
        if version < 1 {
            log::debug!("Rejecting CRL with version field {version}");
            return Err(Error::InvalidStructVersion);
        }
    }

    if certificate_list.signature_algorithm.to_der()? != tbs.signature.to_der()? {
        log::debug!("Rejecting CRL, outer and inner signature algorithms differ");
        return Err(Error::InvalidStruct);
    }

    let issuer = tbs.issuer.to_der()?;
    let this_update = unix_millis(&tbs.this_update);
    let next_update = tbs.next_update.as_ref().map_or(0, unix_millis);

    let authority_key_id = extensions::authority_key_id(crl_extensions)?;
    let Some(crl_number) = extensions::crl_number(crl_extensions)? else {
        log::debug!("Rejecting CRL without a CRL number");
        return Err(Error::InvalidStruct);
    };

    let delta_crl_indicator = extensions::delta_crl_indicator(crl_extensions)?;
    let crl_type = match delta_crl_indicator {
        Some(_) => CrlType::Delta,
        None => CrlType::Full,
    };

    let crl_id = encode_crl_id(&tbs.issuer, &crl_number)?;
    let crl_identifier = encode_crl_identifier(&tbs.issuer, &tbs.this_update, Some(&crl_number))?;

    let uris = CrlUris {
        full: extensions::crl_uris(crl_extensions, PointKind::FullCrl)?.unwrap_or_default(),
        delta: extensions::crl_uris(crl_extensions, PointKind::DeltaCrl)?.unwrap_or_default(),
    };

    log::trace!("Parsed {crl_type} CRL number {}", hex::encode(&crl_number));

    Ok(CrlRecord {
        encoded,
        certificate_list,
        crl_id,
        issuer,
        this_update,
        next_update,
        authority_key_id,
        crl_number,
        delta_crl_indicator,
        crl_identifier,
        uris,
        crl_type,
    })
}
