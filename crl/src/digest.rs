// Copyright (c) 2023 The MobileCoin Foundation

//! Digest primitive used to hash encoded CRLs

use crate::{Error, Result};
use const_oid::ObjectIdentifier;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use x509_cert::spki::AlgorithmIdentifierOwned;

const OID_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");
const OID_SHA224: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.4");
const OID_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
const OID_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
const OID_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

/// Hash algorithms understood by the default [`Digester`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum DigestAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Look up the algorithm for `oid`, `None` when it isn't supported.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        match *oid {
            OID_SHA1 => Some(DigestAlgorithm::Sha1),
            OID_SHA224 => Some(DigestAlgorithm::Sha224),
            OID_SHA256 => Some(DigestAlgorithm::Sha256),
            OID_SHA384 => Some(DigestAlgorithm::Sha384),
            OID_SHA512 => Some(DigestAlgorithm::Sha512),
            _ => None,
        }
    }

    /// The object identifier of the algorithm.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            DigestAlgorithm::Sha1 => OID_SHA1,
            DigestAlgorithm::Sha224 => OID_SHA224,
            DigestAlgorithm::Sha256 => OID_SHA256,
            DigestAlgorithm::Sha384 => OID_SHA384,
            DigestAlgorithm::Sha512 => OID_SHA512,
        }
    }
}

/// A hash value together with the algorithm that produced it.
///
/// ```text
/// OtherHashAlgAndValue ::= SEQUENCE {
///     hashAlgorithm   AlgorithmIdentifier,
///     hashValue       OCTET STRING }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OtherHash {
    /// The algorithm, including any parameters the caller supplied.
    pub hash_algorithm: AlgorithmIdentifierOwned,
    /// The digest bytes.
    pub hash_value: Vec<u8>,
}

/// A digest primitive.
pub trait Digester {
    /// Resolve the algorithm for `oid`.
    fn algorithm_from_oid(&self, oid: &ObjectIdentifier) -> Option<DigestAlgorithm> {
        DigestAlgorithm::from_oid(oid)
    }

    /// Hash `data` with `algorithm`.
    fn hash(&self, algorithm: DigestAlgorithm, data: &[u8]) -> Result<Vec<u8>>;
}

/// [`Digester`] backed by the RustCrypto SHA implementations.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShaDigester;

impl Digester for ShaDigester {
    fn hash(&self, algorithm: DigestAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        let hash = match algorithm {
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        };
        Ok(hash)
    }
}

/// Hash `data` with the algorithm named by `oid`.
pub(crate) fn hash_with(
    digester: &impl Digester,
    oid: &ObjectIdentifier,
    data: &[u8],
) -> Result<Vec<u8>> {
    let algorithm = digester
        .algorithm_from_oid(oid)
        .ok_or(Error::UnsupportedAlgorithm(*oid))?;
    digester.hash(algorithm, data)
}
