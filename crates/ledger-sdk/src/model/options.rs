//! Caller-side operation requests.
//!
//! Each request is a plain struct of optional fields with fluent setters.
//! Presence and format are checked when the request is encoded by the
//! functions in [`crate::operation`], so a partially filled request is never
//! an error until it is used.
//!
//! ```rust
//! use ledger_sdk::{AccountId, Currency, PaymentOptions};
//!
//! let destination = AccountId::from_public_key([1u8; 32]);
//! let opts = PaymentOptions::new()
//!     .destination(destination.address())
//!     .currency(Currency::native())
//!     .amount(1000);
//! let op = ledger_sdk::operation::payment(&opts).unwrap();
//! assert!(op.source_account.is_none());
//! ```

use crate::model::{Currency, Memo, Price, Thresholds};

/// Request for a payment operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentOptions {
    pub destination: Option<String>,
    pub currency: Option<Currency>,
    pub amount: Option<String>,
    pub source: Option<String>,
    pub path: Option<Vec<Currency>>,
    pub send_max: Option<String>,
    pub source_memo: Option<Memo>,
    pub memo: Option<Memo>,
}

impl PaymentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the destination address.
    pub fn destination(mut self, address: impl Into<String>) -> Self {
        self.destination = Some(address.into());
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Sets the amount from a decimal string or any integer.
    pub fn amount(mut self, amount: impl ToString) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    /// Sets the source account address, overriding the transaction's.
    pub fn source(mut self, address: impl Into<String>) -> Self {
        self.source = Some(address.into());
        self
    }

    pub fn path(mut self, path: impl IntoIterator<Item = Currency>) -> Self {
        self.path = Some(path.into_iter().collect());
        self
    }

    /// Sets the maximum the sender will spend. Defaults to the amount.
    pub fn send_max(mut self, send_max: impl ToString) -> Self {
        self.send_max = Some(send_max.to_string());
        self
    }

    pub fn source_memo(mut self, memo: Memo) -> Self {
        self.source_memo = Some(memo);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = Some(memo);
        self
    }
}

/// Request for a change-trust operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTrustOptions {
    pub currency: Option<Currency>,
    /// Trust limit. Omitted means unlimited; `"0"` deletes the trust line.
    pub limit: Option<String>,
    pub source: Option<String>,
}

impl ChangeTrustOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    pub fn source(mut self, address: impl Into<String>) -> Self {
        self.source = Some(address.into());
        self
    }
}

/// Request for an allow-trust operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowTrustOptions {
    pub trustor: Option<String>,
    pub currency_code: Option<String>,
    pub authorize: Option<bool>,
    pub source: Option<String>,
}

impl AllowTrustOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address of the account whose trust line is authorized.
    pub fn trustor(mut self, address: impl Into<String>) -> Self {
        self.trustor = Some(address.into());
        self
    }

    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    pub fn authorize(mut self, authorize: bool) -> Self {
        self.authorize = Some(authorize);
        self
    }

    pub fn source(mut self, address: impl Into<String>) -> Self {
        self.source = Some(address.into());
        self
    }
}

/// A signer to add, update or (with weight 0) remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerOptions {
    pub address: String,
    pub weight: u32,
}

/// Request for a set-options operation. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptionsOptions {
    pub inflation_dest: Option<String>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub thresholds: Option<Thresholds>,
    pub signer: Option<SignerOptions>,
    pub source: Option<String>,
}

impl SetOptionsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inflation_dest(mut self, address: impl Into<String>) -> Self {
        self.inflation_dest = Some(address.into());
        self
    }

    pub fn clear_flags(mut self, flags: u32) -> Self {
        self.clear_flags = Some(flags);
        self
    }

    pub fn set_flags(mut self, flags: u32) -> Self {
        self.set_flags = Some(flags);
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn signer(mut self, address: impl Into<String>, weight: u32) -> Self {
        self.signer = Some(SignerOptions {
            address: address.into(),
            weight,
        });
        self
    }

    pub fn source(mut self, address: impl Into<String>) -> Self {
        self.source = Some(address.into());
        self
    }
}

/// Price input for an offer: an exact fraction or a decimal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceInput {
    Fraction(Price),
    Decimal(String),
}

impl From<Price> for PriceInput {
    fn from(price: Price) -> Self {
        PriceInput::Fraction(price)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Decimal(value.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(value: String) -> Self {
        PriceInput::Decimal(value)
    }
}

/// Request for a create-offer operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOfferOptions {
    pub taker_gets: Option<Currency>,
    pub taker_pays: Option<Currency>,
    /// Amount of `taker_gets` on offer. Zero deletes the offer.
    pub amount: Option<String>,
    /// Price of one unit of `taker_gets` in terms of `taker_pays`.
    pub price: Option<PriceInput>,
    /// Offer to update. Omitted or zero creates a new offer.
    pub offer_id: Option<u64>,
    pub source: Option<String>,
}

impl CreateOfferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn taker_gets(mut self, currency: Currency) -> Self {
        self.taker_gets = Some(currency);
        self
    }

    pub fn taker_pays(mut self, currency: Currency) -> Self {
        self.taker_pays = Some(currency);
        self
    }

    pub fn amount(mut self, amount: impl ToString) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    pub fn price(mut self, price: impl Into<PriceInput>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn offer_id(mut self, offer_id: u64) -> Self {
        self.offer_id = Some(offer_id);
        self
    }

    pub fn source(mut self, address: impl Into<String>) -> Self {
        self.source = Some(address.into());
        self
    }
}
