// Copyright (c) 2023 The MobileCoin Foundation

//! Signature primitive used to check CRL signatures against an issuer key

use crate::{Error, Result};
use const_oid::ObjectIdentifier;
use p256::ecdsa;
use p256::ecdsa::signature::Verifier;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::sha2::{Digest, Sha256};
use rsa::Pkcs1v15Sign;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

const OID_PKCS1_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const OID_PKCS1_SHA256_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const OID_SIG_ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");

/// DSTU 4145 with GOST 34.311 signatures.
pub(crate) const OID_DSTU4145_WITH_GOST3411: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.804.2.1.1.1.1.3.1");
/// DSTU 4145 with DSTU 7564 signatures.
pub(crate) const OID_DSTU4145_WITH_DSTU7564: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.804.2.1.1.1.1.3.6");

/// Whether the signature of `algorithm` is an OCTET STRING wrapped in the
/// signature BIT STRING.
///
/// This is the case for the DSTU 4145 family, any OID at or below the family
/// arcs qualifies.
pub fn is_encapsulated_signature(algorithm: &ObjectIdentifier) -> bool {
    [OID_DSTU4145_WITH_GOST3411, OID_DSTU4145_WITH_DSTU7564]
        .iter()
        .any(|family| algorithm.as_bytes().starts_with(family.as_bytes()))
}

/// A signature primitive.
pub trait SignatureVerifier {
    /// Verify `signature` over `message` with the issuer `key`.
    ///
    /// # Errors
    /// * [`Error::VerifyFailed`] when the signature doesn't match.
    /// * Any other error when the signature could not be checked at all.
    fn verify_signature(
        &self,
        algorithm: &AlgorithmIdentifierOwned,
        message: &[u8],
        key: &SubjectPublicKeyInfoOwned,
        signature: &[u8],
    ) -> Result<()>;
}

/// [`SignatureVerifier`] for ECDSA P-256 and RSA PKCS#1 v1.5 with SHA-256.
///
/// The issuer key has to belong to the family of the signature algorithm,
/// an RSA key can not check an ECDSA signature and vice versa.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustCryptoVerifier;

impl SignatureVerifier for RustCryptoVerifier {
    fn verify_signature(
        &self,
        algorithm: &AlgorithmIdentifierOwned,
        message: &[u8],
        key: &SubjectPublicKeyInfoOwned,
        signature: &[u8],
    ) -> Result<()> {
        match algorithm.oid {
            OID_SIG_ECDSA_WITH_SHA256 => verify_ecdsa(message, key, signature),
            OID_PKCS1_SHA256_WITH_RSA => verify_rsa(message, key, signature),
            oid => Err(Error::UnsupportedAlgorithm(oid)),
        }
    }
}

/// The raw key bits of `key`, which must be a key of type `key_algorithm`.
fn key_bytes(key: &SubjectPublicKeyInfoOwned, key_algorithm: ObjectIdentifier) -> Result<&[u8]> {
    if key.algorithm.oid != key_algorithm {
        return Err(Error::UnsupportedAlgorithm(key.algorithm.oid));
    }
    key.subject_public_key
        .as_bytes()
        .ok_or(Error::KeyDecoding)
}

fn verify_ecdsa(message: &[u8], key: &SubjectPublicKeyInfoOwned, signature: &[u8]) -> Result<()> {
    let key = ecdsa::VerifyingKey::from_sec1_bytes(key_bytes(key, OID_EC_PUBLIC_KEY)?)
        .map_err(|_| Error::KeyDecoding)?;
    let signature =
        ecdsa::Signature::from_der(signature).map_err(|_| Error::SignatureDecoding)?;
    key.verify(message, &signature)
        .map_err(|_| Error::VerifyFailed)
}

fn verify_rsa(message: &[u8], key: &SubjectPublicKeyInfoOwned, signature: &[u8]) -> Result<()> {
    let key = rsa::RsaPublicKey::from_pkcs1_der(key_bytes(key, OID_PKCS1_RSA_ENCRYPTION)?)
        .map_err(|_| Error::KeyDecoding)?;
    let hashed = Sha256::digest(message);
    key.verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
        .map_err(|_| Error::VerifyFailed)
}
