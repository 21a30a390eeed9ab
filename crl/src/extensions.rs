// Copyright (c) 2023 The MobileCoin Foundation

//! Helpers to pull raw values out of CRL and CRL entry extensions.
//!
//! Every helper returns `Ok(None)` when the extension is not present and
//! [`Error::InvalidStruct`] when it is present but can not be decoded.

use crate::status::CrlReason;
use crate::{Error, Result};
use const_oid::ObjectIdentifier;
use der::asn1::{Any, GeneralizedTime, Uint};
use der::{Decode, Encode, Tag, Tagged};
use x509_cert::ext::pkix::crl::dp::DistributionPoint;
use x509_cert::ext::pkix::name::{DistributionPointName, GeneralName};
use x509_cert::ext::pkix::AuthorityKeyIdentifier;
use x509_cert::ext::Extension;

pub(crate) const OID_AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.5.29.35");
pub(crate) const OID_CRL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.20");
pub(crate) const OID_CRL_REASON: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.21");
pub(crate) const OID_INVALIDITY_DATE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.5.29.24");
pub(crate) const OID_DELTA_CRL_INDICATOR: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.5.29.27");
pub(crate) const OID_CRL_DISTRIBUTION_POINTS: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.5.29.31");
pub(crate) const OID_FRESHEST_CRL: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.46");

/// Which set of distribution points to read URIs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PointKind {
    /// The `cRLDistributionPoints` extension, locations of full CRLs.
    FullCrl,
    /// The `freshestCRL` extension, locations of delta CRLs.
    DeltaCrl,
}

impl PointKind {
    fn oid(&self) -> ObjectIdentifier {
        match self {
            PointKind::FullCrl => OID_CRL_DISTRIBUTION_POINTS,
            PointKind::DeltaCrl => OID_FRESHEST_CRL,
        }
    }
}

fn find(extensions: &[Extension], oid: ObjectIdentifier) -> Option<&Extension> {
    extensions.iter().find(|extension| extension.extn_id == oid)
}

fn decode_value<'a, T: Decode<'a>>(extension: &'a Extension) -> Result<T> {
    T::from_der(extension.extn_value.as_bytes()).map_err(|_| Error::InvalidStruct)
}

/// The `keyIdentifier` of the authority key identifier extension.
pub fn authority_key_id(extensions: &[Extension]) -> Result<Option<Vec<u8>>> {
    let Some(extension) = find(extensions, OID_AUTHORITY_KEY_IDENTIFIER) else {
        return Ok(None);
    };
    let aki: AuthorityKeyIdentifier = decode_value(extension)?;
    let key_id = aki.key_identifier.ok_or(Error::InvalidStruct)?;
    Ok(Some(key_id.as_bytes().to_vec()))
}

/// The big endian bytes of the CRL number.
pub fn crl_number(extensions: &[Extension]) -> Result<Option<Vec<u8>>> {
    let Some(extension) = find(extensions, OID_CRL_NUMBER) else {
        return Ok(None);
    };
    let number: Uint = decode_value(extension)?;
    Ok(Some(number.as_bytes().to_vec()))
}

/// The base CRL number of a delta CRL.
///
/// The extension must be marked critical, see
/// [RFC 5280 section 5.2.4](https://datatracker.ietf.org/doc/html/rfc5280#section-5.2.4).
pub fn delta_crl_indicator(extensions: &[Extension]) -> Result<Option<Vec<u8>>> {
    let Some(extension) = find(extensions, OID_DELTA_CRL_INDICATOR) else {
        return Ok(None);
    };
    let number: Uint = decode_value(extension)?;
    if !extension.critical {
        return Err(Error::InvalidStruct);
    }
    Ok(Some(number.as_bytes().to_vec()))
}

/// URIs from either the CRL distribution points or the freshest CRL
/// extension.
///
/// Only the first full name of each distribution point is considered and
/// only when it is a URI.
pub fn crl_uris(extensions: &[Extension], kind: PointKind) -> Result<Option<Vec<String>>> {
    let Some(extension) = find(extensions, kind.oid()) else {
        return Ok(None);
    };
    let points: Vec<DistributionPoint> = decode_value(extension)?;
    let uris = points
        .iter()
        .filter_map(|point| match &point.distribution_point {
            Some(DistributionPointName::FullName(names)) => names.first(),
            _ => None,
        })
        .filter_map(|name| match name {
            GeneralName::UniformResourceIdentifier(uri) => Some(uri.to_string()),
            _ => None,
        })
        .filter(|uri| !uri.is_empty())
        .collect();
    Ok(Some(uris))
}

/// The reason code of a CRL entry.
///
/// Codes RFC 5280 doesn't assign come back as [`CrlReason::Other`].
pub fn crl_reason(entry_extensions: &[Extension]) -> Result<Option<CrlReason>> {
    let Some(extension) = find(entry_extensions, OID_CRL_REASON) else {
        return Ok(None);
    };
    let value: Any = decode_value(extension)?;
    if value.tag() != Tag::Enumerated {
        return Err(Error::InvalidStruct);
    }
    // ENUMERATED shares the INTEGER content encoding
    let code = Any::new(Tag::Integer, value.value())
        .and_then(|integer| integer.to_der())
        .and_then(|der| u32::from_der(&der))
        .map_err(|_| Error::InvalidStruct)?;
    Ok(Some(CrlReason::from_wire(code)))
}

/// The invalidity date of a CRL entry in milliseconds since the Unix epoch.
pub fn invalidity_date(entry_extensions: &[Extension]) -> Result<Option<u64>> {
    let Some(extension) = find(entry_extensions, OID_INVALIDITY_DATE) else {
        return Ok(None);
    };
    let time: GeneralizedTime = decode_value(extension)?;
    Ok(Some(crate::duration_to_millis(time.to_unix_duration())))
}
