// Copyright (c) 2023 The MobileCoin Foundation

//! DER schemas used by the CRL engine.
//!
//! The certificate list mirrors
//! [RFC 5280 section 5.1](https://datatracker.ietf.org/doc/html/rfc5280#section-5.1)
//! but keeps `version` optional so v1 lists (no version) and v2 lists can be
//! told apart:
//!
//! ```text
//!    CertificateList  ::=  SEQUENCE  {
//!         tbsCertList          TBSCertList,
//!         signatureAlgorithm   AlgorithmIdentifier,
//!         signatureValue       BIT STRING  }
//!
//!    TBSCertList  ::=  SEQUENCE  {
//!         version                 Version OPTIONAL,
//!                                      -- if present, MUST be v2
//!         signature               AlgorithmIdentifier,
//!         issuer                  Name,
//!         thisUpdate              Time,
//!         nextUpdate              Time OPTIONAL,
//!         revokedCertificates     SEQUENCE OF SEQUENCE  { ... } OPTIONAL,
//!         crlExtensions           [0]  EXPLICIT Extensions OPTIONAL }
//! ```
//!
//! The identifier structures:
//!
//! ```text
//!    IssuerAndSerialNumber ::= SEQUENCE {
//!         issuer          Name,
//!         serialNumber    CertificateSerialNumber }
//!
//!    CrlIdentifier ::= SEQUENCE {
//!         crlissuer       Name,
//!         crlIssuedTime   UTCTime,
//!         crlNumber       INTEGER OPTIONAL }
//! ```

use der::asn1::{Any, BitString, Uint};
use der::Sequence;
use x509_cert::crl::RevokedCert;
use x509_cert::ext::Extensions;
use x509_cert::name::Name;
use x509_cert::spki::AlgorithmIdentifierOwned;
use x509_cert::time::Time;

/// A signed certificate revocation list.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct CertificateList {
    pub tbs_cert_list: TbsCertList,
    pub signature_algorithm: AlgorithmIdentifierOwned,
    pub signature: BitString,
}

/// The signed portion of a [`CertificateList`].
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct TbsCertList {
    pub version: Option<u32>,
    pub signature: AlgorithmIdentifierOwned,
    pub issuer: Name,
    pub this_update: Time,
    pub next_update: Option<Time>,
    pub revoked_certificates: Option<Vec<RevokedCert>>,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub crl_extensions: Option<Extensions>,
}

/// The CRL ID, the CRL number takes the place of the serial number.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct IssuerAndSerialNumber {
    pub issuer: Name,
    pub serial_number: Uint,
}

/// RFC 5280 style CRL identifier.
///
/// `crl_issued_time` is kept as raw UTCTime TLV so the content bytes of the
/// source CRL can be carried over unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct CrlIdentifier {
    pub crl_issuer: Name,
    pub crl_issued_time: Any,
    pub crl_number: Option<Uint>,
}
