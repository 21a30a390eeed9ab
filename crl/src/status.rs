// Copyright (c) 2023 The MobileCoin Foundation

//! Status values produced while evaluating CRLs.
//!
//! Every enum here maps to a fixed upper case name through an exhaustive
//! `match`, which is also what [`Display`] prints.

use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Revocation status of a certificate as derived from a CRL.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertStatus {
    /// The certificate is not revoked (or a hold has been released).
    Good,
    /// The certificate has been revoked.
    Revoked,
    /// The certificate was revoked with an unspecified reason.
    Unknown,
    /// The revocation entry carried no reason code.
    #[default]
    Undefined,
}

impl CertStatus {
    /// The textual name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CertStatus::Good => "GOOD",
            CertStatus::Revoked => "REVOKED",
            CertStatus::Unknown => "UNKNOWN",
            CertStatus::Undefined => "UNDEFINED",
        }
    }
}

impl Display for CertStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRL entry reason code as defined in
/// [RFC 5280 section 5.3.1](https://datatracker.ietf.org/doc/html/rfc5280#section-5.3.1).
///
/// [`CrlReason::Undefined`] is not a wire value, it marks an entry without a
/// (decodable) reason code extension.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrlReason {
    /// No reason code was present.
    #[default]
    Undefined,
    /// Revoked without a specific reason.
    Unspecified,
    /// The subject key was compromised.
    KeyCompromise,
    /// The issuing CA key was compromised.
    CaCompromise,
    /// The subject's affiliation changed.
    AffiliationChanged,
    /// The certificate was replaced.
    Superseded,
    /// The certificate is no longer needed.
    CessationOfOperation,
    /// The certificate is temporarily on hold.
    CertificateHold,
    /// Releases a previous [`CrlReason::CertificateHold`].
    RemoveFromCrl,
    /// A privilege in the certificate was withdrawn.
    PrivilegeWithdrawn,
    /// The attribute authority was compromised.
    AaCompromise,
    /// A code RFC 5280 doesn't assign, including the unused value 7.
    Other(u32),
}

impl CrlReason {
    /// Map an RFC 5280 `CRLReason` code to a reason.
    ///
    /// Returns `None` for the unused value 7 and anything above 10, see
    /// [`CrlReason::from_wire`] for a mapping that keeps those.
    pub fn from_code(code: u32) -> Option<Self> {
        let reason = match code {
            0 => CrlReason::Unspecified,
            1 => CrlReason::KeyCompromise,
            2 => CrlReason::CaCompromise,
            3 => CrlReason::AffiliationChanged,
            4 => CrlReason::Superseded,
            5 => CrlReason::CessationOfOperation,
            6 => CrlReason::CertificateHold,
            8 => CrlReason::RemoveFromCrl,
            9 => CrlReason::PrivilegeWithdrawn,
            10 => CrlReason::AaCompromise,
            _ => return None,
        };
        Some(reason)
    }

    /// Map a decoded `CRLReason` code, unassigned codes become
    /// [`CrlReason::Other`].
    pub fn from_wire(code: u32) -> Self {
        Self::from_code(code).unwrap_or(CrlReason::Other(code))
    }

    /// The textual name of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrlReason::Undefined => "UNDEFINED",
            CrlReason::Unspecified => "UNSPECIFIED",
            CrlReason::KeyCompromise => "KEY_COMPROMISE",
            CrlReason::CaCompromise => "CA_COMPROMISE",
            CrlReason::AffiliationChanged => "AFFILIATION_CHANGED",
            CrlReason::Superseded => "SUPERSEDED",
            CrlReason::CessationOfOperation => "CESSATION_OF_OPERATION",
            CrlReason::CertificateHold => "CERTIFICATE_HOLD",
            CrlReason::RemoveFromCrl => "REMOVE_FROM_CRL",
            CrlReason::PrivilegeWithdrawn => "PRIVILEGE_WITHDRAWN",
            CrlReason::AaCompromise => "AA_COMPROMISE",
            CrlReason::Other(_) => "OTHER",
        }
    }
}

impl Display for CrlReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of verifying the signature of a CRL.
///
/// The order matters, anything greater than
/// [`VerifyStatus::Indeterminate`] is a decided outcome.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifyStatus {
    /// Verification has never been attempted.
    #[default]
    Undefined,
    /// Verification started but could not be completed, usually because no
    /// issuer certificate was available.
    Indeterminate,
    /// The signature is valid.
    Valid,
    /// The signature does not match the issuer key.
    Invalid,
    /// The signature could not be checked, e.g. an unsupported algorithm.
    Failed,
}

impl VerifyStatus {
    /// Whether this is a final outcome that needs no recomputation.
    pub fn is_decided(&self) -> bool {
        *self > VerifyStatus::Indeterminate
    }

    /// The textual name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyStatus::Undefined => "UNDEFINED",
            VerifyStatus::Indeterminate => "INDETERMINATE",
            VerifyStatus::Valid => "VALID",
            VerifyStatus::Invalid => "INVALID",
            VerifyStatus::Failed => "FAILED",
        }
    }
}

impl Display for VerifyStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a cached CRL is still the most current one known for its issuer.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Actuality {
    /// Not yet determined.
    #[default]
    Undefined,
    /// The newest CRL known for the issuer.
    IsActual,
    /// A newer CRL for the issuer is known.
    IsNotActual,
    /// A newer CRL is expected but could not be obtained.
    IsNotAvailable,
}

impl Actuality {
    /// The textual name of the actuality.
    pub fn as_str(&self) -> &'static str {
        match self {
            Actuality::Undefined => "UNDEFINED",
            Actuality::IsActual => "IS_ACTUAL",
            Actuality::IsNotActual => "IS_NOT_ACTUAL",
            Actuality::IsNotAvailable => "IS_NOT_AVAILABLE",
        }
    }
}

impl Display for Actuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of CRL, only v2 CRLs are supported.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrlType {
    /// Not classified.
    #[default]
    Undefined,
    /// A complete CRL.
    Full,
    /// A CRL with only the changes since a base CRL.
    Delta,
}

impl CrlType {
    /// The textual name of the CRL type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrlType::Undefined => "UNDEFINED",
            CrlType::Full => "FULL",
            CrlType::Delta => "DELTA",
        }
    }

    /// Marker used between the key ID and CRL number in file names.
    pub(crate) fn file_marker(&self) -> &'static str {
        match self {
            CrlType::Full => "-full-",
            CrlType::Delta => "-delta-",
            CrlType::Undefined => "-",
        }
    }
}

impl Display for CrlType {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
