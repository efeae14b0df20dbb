//! Data model types for the ledger SDK.
//!
//! This module contains:
//! - Account identifiers and addresses
//! - Currencies, amounts and prices
//! - Binary operation records (the XDR schema as Rust types)
//! - Operation requests (caller input) and structured objects (decode output)

pub mod account;
pub mod amount;
pub mod currency;
pub mod object;
pub mod op;
pub mod options;

#[cfg(test)]
pub(crate) mod strategies;

pub use account::{AccountId, PublicKey, decode_check, encode_check};
pub use amount::{Amount, Price};
pub use currency::{Currency, CurrencyCode};
pub use object::{ChangeTrustObject, OperationObject, PaymentObject};
pub use op::{
    AUTH_REQUIRED_FLAG, AUTH_REVOCABLE_FLAG, AllowTrustOp, ChangeTrustOp, CreateOfferOp,
    EMPTY_MEMO, Memo, Operation, OperationBody, OperationType, PaymentOp, SetOptionsOp, Signer,
    Thresholds,
};
pub use options::{
    AllowTrustOptions, ChangeTrustOptions, CreateOfferOptions, PaymentOptions, PriceInput,
    SetOptionsOptions, SignerOptions,
};
