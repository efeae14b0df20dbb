//! Operation encoders and the structured decoder.
//!
//! The encoders turn a caller's request ([`PaymentOptions`] and friends) into
//! a binary [`Operation`] record, filling in the network's defaults. The
//! decoder [`operation_to_object`] projects a record back into a structured
//! [`OperationObject`].
//!
//! All functions are pure and may be called concurrently.

use crate::error::OperationError;
use crate::limits::MAX_PATH_LEN;
use crate::model::{
    AccountId, AllowTrustOp, AllowTrustOptions, Amount, ChangeTrustObject, ChangeTrustOp,
    ChangeTrustOptions, CreateOfferOp, CreateOfferOptions, CurrencyCode, EMPTY_MEMO, Operation,
    OperationBody, OperationObject, PaymentObject, PaymentOp, PaymentOptions, Price, PriceInput,
    SetOptionsOp, SetOptionsOptions, Signer,
};

fn resolve_address(address: &str, field: &'static str) -> Result<AccountId, OperationError> {
    AccountId::from_address(address).map_err(|source| OperationError::InvalidAddress { field, source })
}

fn resolve_source(source: Option<&String>) -> Result<Option<AccountId>, OperationError> {
    source.map(|s| resolve_address(s, "source")).transpose()
}

fn parse_amount(value: &str, field: &'static str) -> Result<Amount, OperationError> {
    value
        .parse::<Amount>()
        .map_err(|source| OperationError::InvalidAmount { field, source })
}

fn parse_positive_amount(value: &str, field: &'static str) -> Result<Amount, OperationError> {
    let amount = parse_amount(value, field)?;
    if amount.is_zero() {
        return Err(OperationError::NonPositiveAmount { field });
    }
    Ok(amount)
}

fn required<'a, T>(
    value: Option<&'a T>,
    operation: &'static str,
    field: &'static str,
) -> Result<&'a T, OperationError> {
    value.ok_or(OperationError::MissingRequiredField { operation, field })
}

fn finish(body: OperationBody, source: Option<AccountId>) -> Operation {
    Operation {
        source_account: source,
        body,
    }
}

/// Builds a payment operation.
///
/// `destination`, `currency` and `amount` are required and checked in that
/// order. Payments of zero are rejected. `send_max` defaults to `amount`,
/// `path` to empty and both memos to 32 zero bytes.
pub fn payment(opts: &PaymentOptions) -> Result<Operation, OperationError> {
    let destination = required(opts.destination.as_ref(), "payment", "destination")?;
    let currency = required(opts.currency.as_ref(), "payment", "currency")?;
    let amount = required(opts.amount.as_ref(), "payment", "amount")?;

    let destination = resolve_address(destination, "destination")?;
    let amount = parse_positive_amount(amount, "amount")?;
    let send_max = match &opts.send_max {
        Some(send_max) => parse_positive_amount(send_max, "send_max")?,
        None => amount,
    };

    let path = opts.path.clone().unwrap_or_default();
    if path.len() > MAX_PATH_LEN {
        return Err(OperationError::PathTooLong {
            len: path.len(),
            max: MAX_PATH_LEN,
        });
    }

    let payment = PaymentOp {
        destination,
        currency: *currency,
        path,
        amount,
        send_max,
        source_memo: opts.source_memo.unwrap_or(EMPTY_MEMO),
        memo: opts.memo.unwrap_or(EMPTY_MEMO),
    };

    Ok(finish(
        OperationBody::Payment(payment),
        resolve_source(opts.source.as_ref())?,
    ))
}

/// Builds a change-trust operation.
///
/// `limit` defaults to [`Amount::MAX`]. A limit of `"0"` removes the trust
/// line and is kept distinct from an omitted limit.
pub fn change_trust(opts: &ChangeTrustOptions) -> Result<Operation, OperationError> {
    let line = *required(opts.currency.as_ref(), "changeTrust", "currency")?;
    let limit = match &opts.limit {
        Some(limit) => parse_amount(limit, "limit")?,
        None => Amount::MAX,
    };

    Ok(finish(
        OperationBody::ChangeTrust(ChangeTrustOp { line, limit }),
        resolve_source(opts.source.as_ref())?,
    ))
}

/// Builds an allow-trust operation.
pub fn allow_trust(opts: &AllowTrustOptions) -> Result<Operation, OperationError> {
    let trustor = required(opts.trustor.as_ref(), "allowTrust", "trustor")?;
    let code = required(opts.currency_code.as_ref(), "allowTrust", "currency_code")?;
    let authorize = *required(opts.authorize.as_ref(), "allowTrust", "authorize")?;

    let trustor = resolve_address(trustor, "trustor")?;
    let code = CurrencyCode::new(code)?;

    Ok(finish(
        OperationBody::AllowTrust(AllowTrustOp {
            trustor,
            code,
            authorize,
        }),
        resolve_source(opts.source.as_ref())?,
    ))
}

/// Builds a set-options operation. Absent fields are left unchanged on the account.
pub fn set_options(opts: &SetOptionsOptions) -> Result<Operation, OperationError> {
    let inflation_dest = opts
        .inflation_dest
        .as_deref()
        .map(|a| resolve_address(a, "inflation_dest"))
        .transpose()?;

    let signer = match &opts.signer {
        Some(signer) => Some(Signer {
            pub_key: resolve_address(&signer.address, "signer")?,
            weight: signer.weight,
        }),
        None => None,
    };

    let body = SetOptionsOp {
        inflation_dest,
        clear_flags: opts.clear_flags,
        set_flags: opts.set_flags,
        thresholds: opts.thresholds,
        signer,
    };

    Ok(finish(
        OperationBody::SetOptions(body),
        resolve_source(opts.source.as_ref())?,
    ))
}

/// Builds a create-offer operation.
///
/// An amount of zero deletes the offer named by `offer_id`; an omitted
/// `offer_id` (zero) creates a new offer.
pub fn create_offer(opts: &CreateOfferOptions) -> Result<Operation, OperationError> {
    let taker_gets = *required(opts.taker_gets.as_ref(), "createOffer", "taker_gets")?;
    let taker_pays = *required(opts.taker_pays.as_ref(), "createOffer", "taker_pays")?;
    let amount = required(opts.amount.as_ref(), "createOffer", "amount")?;
    let price = required(opts.price.as_ref(), "createOffer", "price")?;

    let amount = parse_amount(amount, "amount")?;
    let price = resolve_price(price)?;

    Ok(finish(
        OperationBody::CreateOffer(CreateOfferOp {
            taker_gets,
            taker_pays,
            amount,
            price,
            offer_id: opts.offer_id.unwrap_or(0),
        }),
        resolve_source(opts.source.as_ref())?,
    ))
}

fn resolve_price(input: &PriceInput) -> Result<Price, OperationError> {
    match input {
        PriceInput::Fraction(price) if price.is_valid() => Ok(*price),
        PriceInput::Fraction(price) => Err(OperationError::InvalidPrice {
            value: price.to_string(),
            reason: "numerator and denominator must be positive",
        }),
        PriceInput::Decimal(value) => {
            Price::from_decimal(value).map_err(|reason| OperationError::InvalidPrice {
                value: value.clone(),
                reason,
            })
        }
    }
}

/// Projects a record into its structured form.
///
/// Payments expose every field, with amounts as exact decimal strings.
/// Change-trust records expose only the trust line. Other kinds fail with
/// [`OperationError::UnsupportedOperationKind`].
pub fn operation_to_object(op: &Operation) -> Result<OperationObject, OperationError> {
    match &op.body {
        OperationBody::Payment(payment) => Ok(OperationObject::Payment(PaymentObject {
            destination: payment.destination,
            currency: payment.currency,
            path: payment.path.clone(),
            amount: payment.amount.to_string(),
            send_max: payment.send_max.to_string(),
            source_memo: payment.source_memo,
            memo: payment.memo,
        })),
        OperationBody::ChangeTrust(trust) => {
            Ok(OperationObject::ChangeTrust(ChangeTrustObject { line: trust.line }))
        }
        OperationBody::CreateOffer(_)
        | OperationBody::SetOptions(_)
        | OperationBody::AllowTrust(_) => Err(OperationError::UnsupportedOperationKind {
            kind: op.op_type(),
        }),
    }
}
