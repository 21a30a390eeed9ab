// Copyright (c) 2023 The MobileCoin Foundation

//! Canonical identifiers of a CRL.
//!
//! - The CRL ID is an `IssuerAndSerialNumber` with the CRL number in the
//!   serial number slot. It is the primary key of a CRL in the store.
//! - The CRL identifier is the `CrlIdentifier` structure used to record which
//!   CRL produced a revocation status.

use crate::asn1::{CrlIdentifier, IssuerAndSerialNumber};
use crate::{Error, Result};
use der::asn1::{Any, Uint, UtcTime};
use der::{Decode, Encode, Tag, Tagged};
use x509_cert::name::Name;
use x509_cert::time::Time;

/// Number of century digits a GeneralizedTime has over a UTCTime.
const CENTURY_DIGITS: usize = 2;

/// The decoded contents of a CRL identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedCrlIdentifier {
    /// DER encoded issuer name.
    pub issuer: Vec<u8>,
    /// Issue time in milliseconds since the Unix epoch.
    pub issued_time: u64,
    /// Big endian CRL number, if present.
    pub crl_number: Option<Vec<u8>>,
}

/// DER encode the CRL ID for `issuer` and `crl_number`.
pub fn encode_crl_id(issuer: &Name, crl_number: &[u8]) -> Result<Vec<u8>> {
    let crl_id = IssuerAndSerialNumber {
        issuer: issuer.clone(),
        serial_number: Uint::new(crl_number)?,
    };
    Ok(crl_id.to_der()?)
}

/// DER encode the CRL identifier for a CRL issued by `issuer` at
/// `this_update`.
///
/// The time keeps the content bytes of the CRL's own encoding. A
/// GeneralizedTime loses its century digits and is wrapped as UTCTime.
pub fn encode_crl_identifier(
    issuer: &Name,
    this_update: &Time,
    crl_number: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let crl_identifier = CrlIdentifier {
        crl_issuer: issuer.clone(),
        crl_issued_time: issued_time(this_update)?,
        crl_number: crl_number.map(Uint::new).transpose()?,
    };
    Ok(crl_identifier.to_der()?)
}

fn issued_time(this_update: &Time) -> Result<Any> {
    let encoded = Any::from_der(&this_update.to_der()?).map_err(|_| Error::InvalidStruct)?;
    let content = match this_update {
        Time::UtcTime(_) => encoded.value(),
        Time::GeneralTime(_) => encoded
            .value()
            .get(CENTURY_DIGITS..)
            .ok_or(Error::InvalidStruct)?,
    };
    Ok(Any::new(Tag::UtcTime, content)?)
}

/// Decode a DER encoded CRL identifier.
pub fn decode_crl_identifier(encoded: &[u8]) -> Result<DecodedCrlIdentifier> {
    let crl_identifier = CrlIdentifier::from_der(encoded).map_err(|_| Error::InvalidStruct)?;
    if crl_identifier.crl_issued_time.tag() != Tag::UtcTime {
        return Err(Error::InvalidStruct);
    }
    let issued_time = UtcTime::from_der(&crl_identifier.crl_issued_time.to_der()?)
        .map_err(|_| Error::InvalidStruct)?;

    Ok(DecodedCrlIdentifier {
        issuer: crl_identifier.crl_issuer.to_der()?,
        issued_time: crate::duration_to_millis(issued_time.to_unix_duration()),
        crl_number: crl_identifier
            .crl_number
            .map(|number| number.as_bytes().to_vec()),
    })
}
