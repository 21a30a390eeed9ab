// Copyright (c) 2023 The MobileCoin Foundation

#![allow(dead_code)]

use core::str::FromStr;
use core::time::Duration;
use mc_crl_revocation::asn1::{CertificateList, TbsCertList};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::RsaPrivateKey;
use x509_cert::certificate::{TbsCertificate, Version};
use x509_cert::crl::RevokedCert;
use x509_cert::der::asn1::{Any, BitString, GeneralizedTime, Ia5String, OctetString, Uint, UtcTime};
use x509_cert::der::oid::ObjectIdentifier;
use x509_cert::der::Encode;
use x509_cert::ext::pkix::crl::dp::DistributionPoint;
use x509_cert::ext::pkix::name::{DistributionPointName, GeneralName};
use x509_cert::ext::pkix::AuthorityKeyIdentifier;
use x509_cert::ext::Extension;
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use x509_cert::time::{Time, Validity};
use x509_cert::Certificate;

pub const ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

const AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");
const CRL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.20");
const CRL_REASON: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.21");
const INVALIDITY_DATE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.24");
const DELTA_CRL_INDICATOR: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.27");
const CRL_DISTRIBUTION_POINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.31");
const FRESHEST_CRL: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.46");

/// 2023-11-14T22:13:20Z
pub const THIS_UPDATE_SECS: u64 = 1_700_000_000;

pub fn utc_time(secs: u64) -> Time {
    Time::UtcTime(
        UtcTime::from_unix_duration(Duration::from_secs(secs)).expect("Failed creating time"),
    )
}

fn ecdsa_algorithm() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: ECDSA_WITH_SHA256,
        parameters: None,
    }
}

fn extension(oid: ObjectIdentifier, critical: bool, value: Vec<u8>) -> Extension {
    Extension {
        extn_id: oid,
        critical,
        extn_value: OctetString::new(value).expect("Failed creating octet string"),
    }
}

fn encoded(value: &impl Encode) -> Vec<u8> {
    value.to_der().expect("Failed encoding value")
}

fn number(bytes: &[u8]) -> Vec<u8> {
    encoded(&Uint::new(bytes).expect("Failed creating number"))
}

/// A CA able to sign CRLs.
pub struct Issuer {
    pub name: Name,
    pub key: SigningKey,
    pub key_id: Vec<u8>,
    pub certificate: Certificate,
}

impl Issuer {
    /// Create an issuer with a key derived from `seed`.
    pub fn new(common_name: &str, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let key = SigningKey::random(&mut rng);
        let name = Name::from_str(&format!("CN={common_name},O=Example,C=US"))
            .expect("Failed creating name");
        let key_id = seed.to_be_bytes().to_vec();

        let subject_public_key_info = SubjectPublicKeyInfoOwned {
            algorithm: AlgorithmIdentifierOwned {
                oid: EC_PUBLIC_KEY,
                parameters: Some(Any::encode_from(&SECP256R1).expect("Failed encoding curve")),
            },
            subject_public_key: BitString::from_bytes(
                key.verifying_key().to_encoded_point(false).as_bytes(),
            )
            .expect("Failed creating bit string"),
        };
        let certificate = certificate(&name, &name, &[0x01], subject_public_key_info);

        Self {
            name,
            key,
            key_id,
            certificate,
        }
    }

    /// Start a CRL with `crl_number` issued at [`THIS_UPDATE_SECS`].
    pub fn crl(&self, crl_number: &[u8]) -> CrlBuilder<'_> {
        CrlBuilder {
            issuer: self,
            crl_number: crl_number.to_vec(),
            this_update: THIS_UPDATE_SECS,
            next_update: Some(THIS_UPDATE_SECS + 86_400),
            with_key_id: true,
            base_crl_number: None,
            entries: Vec::new(),
            full_uris: Vec::new(),
            delta_uris: Vec::new(),
        }
    }
}

fn certificate(
    issuer: &Name,
    subject: &Name,
    serial_number: &[u8],
    subject_public_key_info: SubjectPublicKeyInfoOwned,
) -> Certificate {
    Certificate {
        tbs_certificate: TbsCertificate {
            version: Version::V3,
            serial_number: SerialNumber::new(serial_number).expect("Failed creating serial"),
            signature: ecdsa_algorithm(),
            issuer: issuer.clone(),
            validity: Validity {
                not_before: utc_time(THIS_UPDATE_SECS - 86_400 * 365),
                not_after: utc_time(THIS_UPDATE_SECS + 86_400 * 365),
            },
            subject: subject.clone(),
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
        },
        signature_algorithm: ecdsa_algorithm(),
        // Certificate signatures are never checked here
        signature: BitString::from_bytes(&[0; 8]).expect("Failed creating bit string"),
    }
}

/// A certificate issued by `issuer` with `serial_number`.
pub fn subject_certificate(issuer: &Issuer, serial_number: &[u8]) -> Certificate {
    let subject = Name::from_str("CN=Leaf,O=Example,C=US").expect("Failed creating name");
    certificate(
        &issuer.name,
        &subject,
        serial_number,
        issuer.certificate.tbs_certificate.subject_public_key_info.clone(),
    )
}

/// A certificate whose key uses an algorithm nothing in this crate supports.
pub fn unsupported_key_certificate(issuer: &Issuer) -> Certificate {
    let mut certificate = issuer.certificate.clone();
    certificate
        .tbs_certificate
        .subject_public_key_info
        .algorithm
        .oid = ObjectIdentifier::new_unwrap("1.3.101.112");
    certificate
}

/// A certificate for the issuer's name carrying an RSA key.
pub fn rsa_key_certificate(issuer: &Issuer, seed: u64) -> Certificate {
    let mut rng = StdRng::seed_from_u64(seed);
    // Small so that key generation stays quick
    let key = RsaPrivateKey::new(&mut rng, 512).expect("Failed generating RSA key");
    let der = key
        .to_public_key()
        .to_pkcs1_der()
        .expect("Failed encoding RSA key");
    let mut certificate = issuer.certificate.clone();
    certificate.tbs_certificate.subject_public_key_info = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: RSA_ENCRYPTION,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(der.as_bytes())
            .expect("Failed creating bit string"),
    };
    certificate
}

/// One revoked certificate entry.
pub struct Entry {
    pub serial_number: Vec<u8>,
    pub revocation_secs: u64,
    pub reason: Option<u8>,
    pub invalidity_secs: Option<u64>,
}

impl Entry {
    pub fn new(serial_number: &[u8], revocation_secs: u64, reason: Option<u8>) -> Self {
        Self {
            serial_number: serial_number.to_vec(),
            revocation_secs,
            reason,
            invalidity_secs: None,
        }
    }

    fn revoked_cert(&self) -> RevokedCert {
        let mut extensions = Vec::new();
        if let Some(reason) = self.reason {
            // ENUMERATED, length 1
            extensions.push(extension(CRL_REASON, false, vec![0x0A, 0x01, reason]));
        }
        if let Some(secs) = self.invalidity_secs {
            let time = GeneralizedTime::from_unix_duration(Duration::from_secs(secs))
                .expect("Failed creating time");
            extensions.push(extension(INVALIDITY_DATE, false, encoded(&time)));
        }

        RevokedCert {
            serial_number: SerialNumber::new(&self.serial_number).expect("Failed creating serial"),
            revocation_date: utc_time(self.revocation_secs),
            crl_entry_extensions: (!extensions.is_empty()).then_some(extensions),
        }
    }
}

fn distribution_points(uris: &[&str]) -> Vec<u8> {
    let points = uris
        .iter()
        .map(|uri| DistributionPoint {
            distribution_point: Some(DistributionPointName::FullName(vec![
                GeneralName::UniformResourceIdentifier(
                    Ia5String::new(uri).expect("Failed creating URI"),
                ),
            ])),
            reasons: None,
            crl_issuer: None,
        })
        .collect::<Vec<_>>();
    encoded(&points)
}

/// Builds and signs a CRL.
pub struct CrlBuilder<'a> {
    issuer: &'a Issuer,
    crl_number: Vec<u8>,
    this_update: u64,
    next_update: Option<u64>,
    with_key_id: bool,
    base_crl_number: Option<Vec<u8>>,
    entries: Vec<Entry>,
    full_uris: Vec<&'static str>,
    delta_uris: Vec<&'static str>,
}

impl<'a> CrlBuilder<'a> {
    pub fn this_update(mut self, secs: u64) -> Self {
        self.this_update = secs;
        self
    }

    pub fn without_next_update(mut self) -> Self {
        self.next_update = None;
        self
    }

    pub fn without_key_id(mut self) -> Self {
        self.with_key_id = false;
        self
    }

    pub fn delta(mut self, base_crl_number: &[u8]) -> Self {
        self.base_crl_number = Some(base_crl_number.to_vec());
        self
    }

    pub fn entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn full_uri(mut self, uri: &'static str) -> Self {
        self.full_uris.push(uri);
        self
    }

    pub fn delta_uri(mut self, uri: &'static str) -> Self {
        self.delta_uris.push(uri);
        self
    }

    fn extensions(&self) -> Vec<Extension> {
        let mut extensions = vec![extension(CRL_NUMBER, false, number(&self.crl_number))];
        if self.with_key_id {
            let aki = AuthorityKeyIdentifier {
                key_identifier: Some(
                    OctetString::new(self.issuer.key_id.clone()).expect("Failed creating key ID"),
                ),
                authority_cert_issuer: None,
                authority_cert_serial_number: None,
            };
            extensions.push(extension(AUTHORITY_KEY_IDENTIFIER, false, encoded(&aki)));
        }
        if let Some(base) = &self.base_crl_number {
            extensions.push(extension(DELTA_CRL_INDICATOR, true, number(base)));
        }
        if !self.full_uris.is_empty() {
            extensions.push(extension(
                CRL_DISTRIBUTION_POINTS,
                false,
                distribution_points(&self.full_uris),
            ));
        }
        if !self.delta_uris.is_empty() {
            extensions.push(extension(
                FRESHEST_CRL,
                false,
                distribution_points(&self.delta_uris),
            ));
        }
        extensions
    }

    /// The unsigned structure.
    pub fn tbs(&self) -> TbsCertList {
        let revoked = self
            .entries
            .iter()
            .map(Entry::revoked_cert)
            .collect::<Vec<_>>();
        TbsCertList {
            version: Some(1),
            signature: ecdsa_algorithm(),
            issuer: self.issuer.name.clone(),
            this_update: utc_time(self.this_update),
            next_update: self.next_update.map(utc_time),
            revoked_certificates: (!revoked.is_empty()).then_some(revoked),
            crl_extensions: Some(self.extensions()),
        }
    }

    /// The DER encoded CRL signed by the issuer.
    pub fn sign(&self) -> Vec<u8> {
        let tbs_cert_list = self.tbs();
        let signature: Signature = self.issuer.key.sign(&encoded(&tbs_cert_list));
        let crl = CertificateList {
            tbs_cert_list,
            signature_algorithm: ecdsa_algorithm(),
            signature: BitString::from_bytes(signature.to_der().as_bytes())
                .expect("Failed creating bit string"),
        };
        encoded(&crl)
    }
}
