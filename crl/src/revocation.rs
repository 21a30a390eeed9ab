// Copyright (c) 2023 The MobileCoin Foundation

//! Revocation status of a certificate from the entries of a CRL

use crate::extensions;
use crate::parser::CrlRecord;
use crate::status::{CertStatus, CrlReason};
use x509_cert::crl::RevokedCert;
use x509_cert::Certificate;

/// One revocation event for a serial number.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct RevokedCertItem {
    /// `revocationDate` in milliseconds since the Unix epoch.
    pub revocation_date: u64,
    /// Reason code, [`CrlReason::Undefined`] when the entry has none.
    pub crl_reason: CrlReason,
    /// Invalidity date in milliseconds since the Unix epoch, 0 when absent.
    pub invalidity_date: u64,
}

impl RevokedCertItem {
    /// The time to report as the revocation time.
    ///
    /// This is the invalidity date when one is known, otherwise the
    /// revocation date.
    pub fn date(&self) -> u64 {
        match self.invalidity_date {
            0 => self.revocation_date,
            invalidity_date => invalidity_date,
        }
    }
}

impl From<&RevokedCert> for RevokedCertItem {
    fn from(entry: &RevokedCert) -> Self {
        let revocation_date = crate::duration_to_millis(entry.revocation_date.to_unix_duration());
        let Some(entry_extensions) = entry.crl_entry_extensions.as_deref() else {
            return Self {
                revocation_date,
                ..Default::default()
            };
        };

        let crl_reason = extensions::crl_reason(entry_extensions)
            .ok()
            .flatten()
            .unwrap_or_default();
        let invalidity_date = extensions::invalidity_date(entry_extensions)
            .ok()
            .flatten()
            .unwrap_or_default();

        Self {
            revocation_date,
            crl_reason,
            invalidity_date,
        }
    }
}

/// All revocation events in `record` for the serial number of `subject`.
///
/// A serial number can show up more than once, every entry is returned in
/// the order of the CRL.
pub fn revoked_certs(record: &CrlRecord, subject: &Certificate) -> Vec<RevokedCertItem> {
    let serial = subject.tbs_certificate.serial_number.as_bytes();
    record
        .certificate_list()
        .tbs_cert_list
        .revoked_certificates
        .iter()
        .flatten()
        .filter(|entry| entry.serial_number.as_bytes() == serial)
        .map(RevokedCertItem::from)
        .collect()
}

/// The item revoked closest to, but strictly before, `validation_time`.
///
/// Of several items with the same revocation date the first one wins.
pub fn find_near_before(
    items: &[RevokedCertItem],
    validation_time: u64,
) -> Option<&RevokedCertItem> {
    let mut candidates = items
        .iter()
        .filter(|item| item.revocation_date < validation_time);
    let first = candidates.next()?;
    Some(candidates.fold(first, |nearest, item| {
        if item.revocation_date > nearest.revocation_date {
            item
        } else {
            nearest
        }
    }))
}

/// The outcome of [`find_revoked_cert`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RevocationResult {
    /// Whether an applicable revocation event was found.
    pub found: bool,
    /// Status derived from the applicable event.
    pub status: CertStatus,
    /// The applicable event.
    pub item: Option<RevokedCertItem>,
}

/// Derive the certificate status at `validation_time` from its revocation
/// events.
///
/// Without an event before `validation_time` the certificate is
/// [`CertStatus::Good`].
pub fn find_revoked_cert(items: &[RevokedCertItem], validation_time: u64) -> RevocationResult {
    let Some(item) = find_near_before(items, validation_time) else {
        return RevocationResult {
            found: false,
            status: CertStatus::Good,
            item: None,
        };
    };

    let status = match item.crl_reason {
        CrlReason::RemoveFromCrl => CertStatus::Good,
        CrlReason::Undefined => CertStatus::Undefined,
        CrlReason::Unspecified => CertStatus::Unknown,
        _ => CertStatus::Revoked,
    };

    RevocationResult {
        found: true,
        status,
        item: Some(*item),
    }
}
