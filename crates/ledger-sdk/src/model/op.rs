//! Binary operation records.
//!
//! These types mirror the network's XDR schema one to one. They are produced
//! by the encoders in [`crate::operation`] and by [`crate::codec::decode_operation`].

use crate::limits::MEMO_LEN;
use crate::model::{AccountId, Amount, Currency, CurrencyCode, Price};

/// A 32-byte memo block.
pub type Memo = [u8; MEMO_LEN];

/// The all-zero memo used when none is supplied.
pub const EMPTY_MEMO: Memo = [0u8; MEMO_LEN];

/// Account flag: trust lines to this account's currencies need authorization.
pub const AUTH_REQUIRED_FLAG: u32 = 0x1;

/// Account flag: this account may revoke authorizations it granted.
pub const AUTH_REVOCABLE_FLAG: u32 = 0x2;

/// Operation discriminants as defined by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OperationType {
    Payment = 0,
    CreateOffer = 1,
    CancelOffer = 2,
    SetOptions = 3,
    ChangeTrust = 4,
    AllowTrust = 5,
    AccountMerge = 6,
    Inflation = 7,
}

impl OperationType {
    /// Maps a wire discriminant to an operation type.
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => OperationType::Payment,
            1 => OperationType::CreateOffer,
            2 => OperationType::CancelOffer,
            3 => OperationType::SetOptions,
            4 => OperationType::ChangeTrust,
            5 => OperationType::AllowTrust,
            6 => OperationType::AccountMerge,
            7 => OperationType::Inflation,
            _ => return None,
        })
    }
}

/// An operation: an optional source account plus a typed body.
///
/// When `source_account` is `None` the enclosing transaction's source is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub source_account: Option<AccountId>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self {
            source_account: None,
            body,
        }
    }

    pub fn with_source(mut self, source: AccountId) -> Self {
        self.source_account = Some(source);
        self
    }

    pub fn op_type(&self) -> OperationType {
        self.body.op_type()
    }
}

/// The tagged union of operation bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBody {
    Payment(PaymentOp),
    CreateOffer(CreateOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
}

impl OperationBody {
    /// Returns the discriminant this body is encoded with.
    pub fn op_type(&self) -> OperationType {
        match self {
            OperationBody::Payment(_) => OperationType::Payment,
            OperationBody::CreateOffer(_) => OperationType::CreateOffer,
            OperationBody::SetOptions(_) => OperationType::SetOptions,
            OperationBody::ChangeTrust(_) => OperationType::ChangeTrust,
            OperationBody::AllowTrust(_) => OperationType::AllowTrust,
        }
    }
}

/// Sends `amount` of `currency` to `destination`, optionally through `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOp {
    pub destination: AccountId,
    pub currency: Currency,
    /// Intermediate currencies for a path payment, in order.
    pub path: Vec<Currency>,
    pub amount: Amount,
    /// The most the sender will spend; equal to `amount` for exact payments.
    pub send_max: Amount,
    pub source_memo: Memo,
    pub memo: Memo,
}

/// Creates, updates or (with a zero amount) deletes an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOfferOp {
    pub taker_gets: Currency,
    pub taker_pays: Currency,
    pub amount: Amount,
    pub price: Price,
    /// Zero creates a new offer.
    pub offer_id: u64,
}

/// Signing thresholds as stored on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Thresholds {
    pub master_weight: u8,
    pub low: u8,
    pub medium: u8,
    pub high: u8,
}

impl Thresholds {
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.master_weight, self.low, self.medium, self.high]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            master_weight: bytes[0],
            low: bytes[1],
            medium: bytes[2],
            high: bytes[3],
        }
    }
}

/// An additional signer for an account. Weight zero removes the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Signer {
    pub pub_key: AccountId,
    pub weight: u32,
}

/// Sets or clears account flags, the inflation destination, thresholds and signers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub thresholds: Option<Thresholds>,
    pub signer: Option<Signer>,
}

impl SetOptionsOp {
    /// Returns true if the operation changes nothing.
    pub fn is_empty(&self) -> bool {
        self.inflation_dest.is_none()
            && self.clear_flags.is_none()
            && self.set_flags.is_none()
            && self.thresholds.is_none()
            && self.signer.is_none()
    }
}

/// Adds, updates or (with a zero limit) removes a trust line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTrustOp {
    pub line: Currency,
    pub limit: Amount,
}

/// Authorizes or deauthorizes `trustor` to hold the source account's `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowTrustOp {
    pub trustor: AccountId,
    pub code: CurrencyCode,
    pub authorize: bool,
}
