// Copyright (c) 2023 The MobileCoin Foundation

//! Errors that can occur while parsing CRLs and evaluating revocation

use const_oid::ObjectIdentifier;

/// Result type for CRL operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error working with certificate revocation lists
#[derive(displaydoc::Display, Debug)]
pub enum Error {
    /// Invalid parameter: {0}
    InvalidParameter(&'static str),
    /// The CRL or identifier structure is invalid
    InvalidStruct,
    /// The CRL version is not supported, only v2 CRLs are accepted
    InvalidStructVersion,
    /// Unsupported algorithm {0}
    UnsupportedAlgorithm(ObjectIdentifier),
    /// The signature does not match the issuer key
    VerifyFailed,
    /// An error occurred decoding the issuer public key
    KeyDecoding,
    /// An error occurred decoding the signature value
    SignatureDecoding,
    /// Error encoding to DER: {0}
    Encoding(der::Error),
    /// I/O error: {0}
    Io(std::io::Error),
}

impl From<der::Error> for Error {
    fn from(e: der::Error) -> Self {
        Error::Encoding(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl std::error::Error for Error {}
