//! Client SDK for the ledger network.
//!
//! This crate provides two independent pieces:
//! - an account query builder that composes resource locators for the
//!   network's indexing service, and
//! - an operation codec that turns caller requests into binary XDR
//!   operation records and projects records back into structured objects.
//!
//! # Quick Start
//!
//! ```rust
//! use ledger_sdk::{AccountId, Currency, OperationObject, PaymentOptions};
//! use ledger_sdk::{decode_operation, encode_operation, operation_to_object, payment};
//!
//! let destination = AccountId::from_public_key([7u8; 32]);
//!
//! // Build a payment record
//! let opts = PaymentOptions::new()
//!     .destination(destination.address())
//!     .currency(Currency::native())
//!     .amount(1000);
//! let op = payment(&opts).unwrap();
//!
//! // Encode to XDR
//! let bytes = encode_operation(&op).unwrap();
//!
//! // Decode back and project
//! let decoded = decode_operation(&bytes).unwrap();
//! match operation_to_object(&decoded).unwrap() {
//!     OperationObject::Payment(p) => {
//!         assert_eq!(p.destination, destination);
//!         assert_eq!(p.amount, "1000");
//!         assert_eq!(p.send_max, "1000");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//!
//! // Compose a locator
//! let server = ledger_sdk::query::Server::new("https://horizon.example.org").unwrap();
//! let locator = server.accounts().traits(destination.address()).build().unwrap();
//! assert!(locator.path().ends_with("/traits"));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Accounts, currencies, amounts, operation records and requests
//! - [`operation`]: Operation encoders and the structured decoder
//! - [`codec`]: XDR encoding/decoding of operation records
//! - [`query`]: Resource locators for the indexing service
//! - [`error`]: Error types
//! - [`limits`]: Wire-format sizes and decoding bounds
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Array lengths are bounded before allocation
//! - Discriminants, booleans and padding are checked strictly
//! - Trailing bytes are rejected

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod operation;
pub mod query;

// Re-export commonly used types at crate root
pub use codec::{decode_operation, encode_operation};
pub use error::{
    AddressError, AmountError, CurrencyError, DecodeError, EncodeError, OperationError, QueryError,
};
pub use model::{
    AccountId, AllowTrustOp, AllowTrustOptions, Amount, ChangeTrustObject, ChangeTrustOp,
    ChangeTrustOptions, CreateOfferOp, CreateOfferOptions, Currency, CurrencyCode, Memo,
    Operation, OperationBody, OperationObject, OperationType, PaymentObject, PaymentOp,
    PaymentOptions, Price, PriceInput, PublicKey, SetOptionsOp, SetOptionsOptions, Signer,
    SignerOptions, Thresholds,
};
pub use operation::{
    allow_trust, change_trust, create_offer, operation_to_object, payment, set_options,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
