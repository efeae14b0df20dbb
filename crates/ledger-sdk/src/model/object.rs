//! Structured views of decoded operation records.

use crate::model::{AccountId, Currency, Memo};

/// The structured projection of an operation record.
///
/// Only payment and change-trust records have a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum OperationObject {
    #[cfg_attr(feature = "serde", serde(rename = "paymentOp"))]
    Payment(PaymentObject),
    #[cfg_attr(feature = "serde", serde(rename = "changeTrustOp"))]
    ChangeTrust(ChangeTrustObject),
}

impl OperationObject {
    /// Returns `"paymentOp"` or `"changeTrustOp"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            OperationObject::Payment(_) => "paymentOp",
            OperationObject::ChangeTrust(_) => "changeTrustOp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PaymentObject {
    pub destination: AccountId,
    pub currency: Currency,
    pub path: Vec<Currency>,
    /// Exact decimal rendering of the wire amount.
    pub amount: String,
    pub send_max: String,
    pub source_memo: Memo,
    pub memo: Memo,
}

/// Only the trust line's currency is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChangeTrustObject {
    pub line: Currency,
}
