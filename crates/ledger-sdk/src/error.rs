//! Error types for address resolution, operation construction, XDR
//! encoding/decoding and query building.

use thiserror::Error;

use crate::model::OperationType;

/// Error resolving a textual address into a public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is not valid base58: {0}")]
    InvalidEncoding(String),

    #[error("decoded address has length {len}, expected {expected}")]
    InvalidLength { len: usize, expected: usize },

    #[error("address version byte is {found:#04x}, expected {expected:#04x}")]
    InvalidVersion { expected: u8, found: u8 },

    #[error("address checksum mismatch")]
    InvalidChecksum,
}

/// Error parsing an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount {value:?} contains a non-digit character")]
    InvalidDigit { value: String },

    #[error("amount {value:?} exceeds the maximum of {max}", max = i64::MAX)]
    Overflow { value: String },
}

/// Error constructing a currency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("currency code {code:?} must be 1 to 4 ASCII alphanumeric characters")]
    InvalidCode { code: String },

    #[error("invalid currency issuer: {0}")]
    InvalidIssuer(#[from] AddressError),
}

/// Error building or projecting an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("must provide a {field} for a {operation} operation")]
    MissingRequiredField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: AddressError,
    },

    #[error("invalid {field}: {source}")]
    InvalidAmount {
        field: &'static str,
        #[source]
        source: AmountError,
    },

    #[error("{field} must be greater than zero")]
    NonPositiveAmount { field: &'static str },

    #[error("invalid currency: {0}")]
    InvalidCurrency(#[from] CurrencyError),

    #[error("invalid price {value:?}: {reason}")]
    InvalidPrice { value: String, reason: &'static str },

    #[error("payment path has {len} entries, maximum is {max}")]
    PathTooLong { len: usize, max: usize },

    #[error("operation kind {kind:?} has no structured projection")]
    UnsupportedOperationKind { kind: OperationType },
}

/// Error during XDR encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Error during XDR decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("invalid {context} discriminant: {value}")]
    InvalidDiscriminant { context: &'static str, value: u32 },

    #[error("invalid bool value {value} in {context} (expected 0 or 1)")]
    InvalidBool { context: &'static str, value: u32 },

    #[error("non-zero padding after {context}")]
    NonZeroPadding { context: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} is negative: {value}")]
    NegativeAmount { field: &'static str, value: i64 },

    #[error("invalid currency code bytes {bytes:?}")]
    InvalidCurrencyCode { bytes: [u8; 4] },

    #[error("unknown operation type {op_type}")]
    UnknownOperationType { op_type: u32 },

    #[error("operation kind {kind:?} is not supported by this codec")]
    UnsupportedOperationKind { kind: OperationType },

    #[error("{len} trailing bytes after operation")]
    TrailingBytes { len: usize },

    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

/// Error building a resource locator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid server url {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: &'static str },

    #[error("too many filters specified ({count}), at most one is allowed")]
    TooManyFilters { count: usize },
}
