//! Operation encoding/decoding for the XDR wire format.
//!
//! ```text
//! struct Operation { AccountID* sourceAccount; OperationBody body; };
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::codec::currency::{
    CURRENCY_TYPE_ISO4217, decode_currency, decode_currency_code, encode_currency,
};
use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_OPERATION_SIZE, MAX_PATH_LEN};
use crate::model::{
    AllowTrustOp, Amount, ChangeTrustOp, CreateOfferOp, Operation, OperationBody, OperationType,
    PaymentOp, Price, SetOptionsOp, Signer, Thresholds,
};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a complete operation record. Trailing bytes are rejected.
pub fn decode_operation(input: &[u8]) -> Result<Operation, DecodeError> {
    if input.len() > MAX_OPERATION_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "operation",
            len: input.len(),
            max: MAX_OPERATION_SIZE,
        });
    }

    let mut reader = Reader::new(input);
    let op = decode_op(&mut reader)?;
    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            len: reader.remaining_len(),
        });
    }
    Ok(op)
}

/// Decodes an operation from the reader.
pub fn decode_op(reader: &mut Reader<'_>) -> Result<Operation, DecodeError> {
    let source_account = if reader.read_option_flag("source_account")? {
        Some(reader.read_account_id("source_account")?)
    } else {
        None
    };

    let op_type = reader.read_u32("op_type")?;
    let kind = OperationType::from_u32(op_type).ok_or(DecodeError::UnknownOperationType { op_type })?;

    let body = match kind {
        OperationType::Payment => OperationBody::Payment(decode_payment(reader)?),
        OperationType::CreateOffer => OperationBody::CreateOffer(decode_create_offer(reader)?),
        OperationType::SetOptions => OperationBody::SetOptions(decode_set_options(reader)?),
        OperationType::ChangeTrust => OperationBody::ChangeTrust(decode_change_trust(reader)?),
        OperationType::AllowTrust => OperationBody::AllowTrust(decode_allow_trust(reader)?),
        OperationType::CancelOffer | OperationType::AccountMerge | OperationType::Inflation => {
            return Err(DecodeError::UnsupportedOperationKind { kind });
        }
    };

    Ok(Operation {
        source_account,
        body,
    })
}

fn decode_amount(reader: &mut Reader<'_>, field: &'static str) -> Result<Amount, DecodeError> {
    let value = reader.read_i64(field)?;
    Amount::new(value).ok_or(DecodeError::NegativeAmount { field, value })
}

fn decode_payment(reader: &mut Reader<'_>) -> Result<PaymentOp, DecodeError> {
    let destination = reader.read_account_id("destination")?;
    let currency = decode_currency(reader)?;

    let path_len = reader.read_array_len(MAX_PATH_LEN, "path")?;
    let mut path = Vec::with_capacity(path_len);
    for _ in 0..path_len {
        path.push(decode_currency(reader)?);
    }

    let amount = decode_amount(reader, "amount")?;
    let send_max = decode_amount(reader, "send_max")?;
    let source_memo = reader.read_fixed_opaque::<32>("source_memo")?;
    let memo = reader.read_fixed_opaque::<32>("memo")?;

    Ok(PaymentOp {
        destination,
        currency,
        path,
        amount,
        send_max,
        source_memo,
        memo,
    })
}

fn decode_create_offer(reader: &mut Reader<'_>) -> Result<CreateOfferOp, DecodeError> {
    let taker_gets = decode_currency(reader)?;
    let taker_pays = decode_currency(reader)?;
    let amount = decode_amount(reader, "amount")?;
    let n = reader.read_i32("price.n")?;
    let d = reader.read_i32("price.d")?;
    let offer_id = reader.read_u64("offer_id")?;

    Ok(CreateOfferOp {
        taker_gets,
        taker_pays,
        amount,
        price: Price::new(n, d),
        offer_id,
    })
}

fn decode_set_options(reader: &mut Reader<'_>) -> Result<SetOptionsOp, DecodeError> {
    let inflation_dest = if reader.read_option_flag("inflation_dest")? {
        Some(reader.read_account_id("inflation_dest")?)
    } else {
        None
    };

    let clear_flags = if reader.read_option_flag("clear_flags")? {
        Some(reader.read_u32("clear_flags")?)
    } else {
        None
    };

    let set_flags = if reader.read_option_flag("set_flags")? {
        Some(reader.read_u32("set_flags")?)
    } else {
        None
    };

    let thresholds = if reader.read_option_flag("thresholds")? {
        Some(Thresholds::from_bytes(reader.read_fixed_opaque::<4>("thresholds")?))
    } else {
        None
    };

    let signer = if reader.read_option_flag("signer")? {
        let pub_key = reader.read_account_id("signer.pub_key")?;
        let weight = reader.read_u32("signer.weight")?;
        Some(Signer { pub_key, weight })
    } else {
        None
    };

    Ok(SetOptionsOp {
        inflation_dest,
        clear_flags,
        set_flags,
        thresholds,
        signer,
    })
}

fn decode_change_trust(reader: &mut Reader<'_>) -> Result<ChangeTrustOp, DecodeError> {
    let line = decode_currency(reader)?;
    let limit = decode_amount(reader, "limit")?;
    Ok(ChangeTrustOp { line, limit })
}

fn decode_allow_trust(reader: &mut Reader<'_>) -> Result<AllowTrustOp, DecodeError> {
    let trustor = reader.read_account_id("trustor")?;

    // The inner union only has an ISO4217 arm.
    let currency_type = reader.read_u32("allow_trust.currency_type")?;
    if currency_type != CURRENCY_TYPE_ISO4217 {
        return Err(DecodeError::InvalidDiscriminant {
            context: "allow_trust.currency_type",
            value: currency_type,
        });
    }
    let code = decode_currency_code(reader)?;
    let authorize = reader.read_bool("authorize")?;

    Ok(AllowTrustOp {
        trustor,
        code,
        authorize,
    })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a complete operation record.
pub fn encode_operation(op: &Operation) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(256);
    encode_op(&mut writer, op)?;
    Ok(writer.into_bytes())
}

/// Encodes an operation to the writer.
pub fn encode_op(writer: &mut Writer, op: &Operation) -> Result<(), EncodeError> {
    writer.write_option_flag(op.source_account.is_some());
    if let Some(source) = &op.source_account {
        writer.write_account_id(source);
    }

    writer.write_u32(op.body.op_type() as u32);
    match &op.body {
        OperationBody::Payment(payment) => encode_payment(writer, payment)?,
        OperationBody::CreateOffer(offer) => encode_create_offer(writer, offer),
        OperationBody::SetOptions(options) => encode_set_options(writer, options),
        OperationBody::ChangeTrust(trust) => encode_change_trust(writer, trust),
        OperationBody::AllowTrust(allow) => encode_allow_trust(writer, allow),
    }

    Ok(())
}

fn encode_payment(writer: &mut Writer, payment: &PaymentOp) -> Result<(), EncodeError> {
    if payment.path.len() > MAX_PATH_LEN {
        return Err(EncodeError::LengthExceedsLimit {
            field: "path",
            len: payment.path.len(),
            max: MAX_PATH_LEN,
        });
    }

    writer.write_account_id(&payment.destination);
    encode_currency(writer, &payment.currency);
    writer.write_u32(payment.path.len() as u32);
    for currency in &payment.path {
        encode_currency(writer, currency);
    }
    writer.write_i64(payment.amount.value());
    writer.write_i64(payment.send_max.value());
    writer.write_fixed_opaque(&payment.source_memo);
    writer.write_fixed_opaque(&payment.memo);
    Ok(())
}

fn encode_create_offer(writer: &mut Writer, offer: &CreateOfferOp) {
    encode_currency(writer, &offer.taker_gets);
    encode_currency(writer, &offer.taker_pays);
    writer.write_i64(offer.amount.value());
    writer.write_i32(offer.price.n);
    writer.write_i32(offer.price.d);
    writer.write_u64(offer.offer_id);
}

fn encode_set_options(writer: &mut Writer, options: &SetOptionsOp) {
    writer.write_option_flag(options.inflation_dest.is_some());
    if let Some(dest) = &options.inflation_dest {
        writer.write_account_id(dest);
    }

    writer.write_option_flag(options.clear_flags.is_some());
    if let Some(flags) = options.clear_flags {
        writer.write_u32(flags);
    }

    writer.write_option_flag(options.set_flags.is_some());
    if let Some(flags) = options.set_flags {
        writer.write_u32(flags);
    }

    writer.write_option_flag(options.thresholds.is_some());
    if let Some(thresholds) = &options.thresholds {
        writer.write_fixed_opaque(&thresholds.to_bytes());
    }

    writer.write_option_flag(options.signer.is_some());
    if let Some(signer) = &options.signer {
        writer.write_account_id(&signer.pub_key);
        writer.write_u32(signer.weight);
    }
}

fn encode_change_trust(writer: &mut Writer, trust: &ChangeTrustOp) {
    encode_currency(writer, &trust.line);
    writer.write_i64(trust.limit.value());
}

fn encode_allow_trust(writer: &mut Writer, allow: &AllowTrustOp) {
    writer.write_account_id(&allow.trustor);
    writer.write_u32(CURRENCY_TYPE_ISO4217);
    writer.write_fixed_opaque(allow.code.as_bytes());
    writer.write_bool(allow.authorize);
}

// =============================================================================
// BASE64
// =============================================================================

impl Operation {
    /// Encodes the record as standard base64 XDR.
    pub fn to_xdr_base64(&self) -> Result<String, EncodeError> {
        Ok(STANDARD.encode(encode_operation(self)?))
    }

    /// Decodes a record from standard base64 XDR.
    pub fn from_xdr_base64(input: &str) -> Result<Self, DecodeError> {
        let bytes = STANDARD
            .decode(input.trim())
            .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
        decode_operation(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::{AccountId, Currency, CurrencyCode, EMPTY_MEMO, strategies};

    fn account(byte: u8) -> AccountId {
        AccountId::from_public_key([byte; 32])
    }

    fn usd() -> Currency {
        Currency::issued(CurrencyCode::new("USD").unwrap(), account(9))
    }

    fn payment(path: Vec<Currency>) -> Operation {
        Operation::new(OperationBody::Payment(PaymentOp {
            destination: account(1),
            currency: usd(),
            path,
            amount: Amount::new(1000).unwrap(),
            send_max: Amount::new(1500).unwrap(),
            source_memo: [7u8; 32],
            memo: EMPTY_MEMO,
        }))
    }

    #[test]
    fn test_payment_wire_layout() {
        let bytes = encode_operation(&payment(vec![])).unwrap();

        // no source account, then discriminant 0
        assert_eq!(&bytes[0..8], &[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..40], &[1u8; 32]);
        // ISO4217 currency: type, code, issuer
        assert_eq!(&bytes[40..44], &[0, 0, 0, 1]);
        assert_eq!(&bytes[44..48], b"USD\0");
        assert_eq!(&bytes[48..80], &[9u8; 32]);
        // empty path
        assert_eq!(&bytes[80..84], &[0, 0, 0, 0]);
        assert_eq!(&bytes[84..92], &1000i64.to_be_bytes());
        assert_eq!(&bytes[92..100], &1500i64.to_be_bytes());
        assert_eq!(&bytes[100..132], &[7u8; 32]);
        assert_eq!(&bytes[132..164], &[0u8; 32]);
        assert_eq!(bytes.len(), 164);
    }

    #[test]
    fn test_payment_roundtrip_with_source_and_path() {
        let op = payment(vec![Currency::Native, usd()]).with_source(account(4));
        let bytes = encode_operation(&op).unwrap();
        assert_eq!(&bytes[0..4], &[0, 0, 0, 1]);
        assert_eq!(decode_operation(&bytes).unwrap(), op);
    }

    #[test]
    fn test_max_amount_roundtrip() {
        let mut op = payment(vec![]);
        if let OperationBody::Payment(p) = &mut op.body {
            p.amount = Amount::MAX;
            p.send_max = Amount::MAX;
        }
        let decoded = decode_operation(&encode_operation(&op).unwrap()).unwrap();
        match decoded.body {
            OperationBody::Payment(p) => assert_eq!(p.amount, Amount::MAX),
            _ => panic!("expected Payment"),
        }
    }

    #[test]
    fn test_path_too_long_rejected() {
        let op = payment(vec![Currency::Native; MAX_PATH_LEN + 1]);
        assert!(matches!(
            encode_operation(&op),
            Err(EncodeError::LengthExceedsLimit { field: "path", .. })
        ));
    }

    #[test]
    fn test_change_trust_roundtrip() {
        let op = Operation::new(OperationBody::ChangeTrust(ChangeTrustOp {
            line: usd(),
            limit: Amount::ZERO,
        }));
        let bytes = encode_operation(&op).unwrap();
        assert_eq!(&bytes[4..8], &[0, 0, 0, 4]);
        assert_eq!(&bytes[bytes.len() - 8..], &[0u8; 8]);
        assert_eq!(decode_operation(&bytes).unwrap(), op);
    }

    #[test]
    fn test_allow_trust_roundtrip() {
        let op = Operation::new(OperationBody::AllowTrust(AllowTrustOp {
            trustor: account(2),
            code: CurrencyCode::new("EUR").unwrap(),
            authorize: true,
        }));
        let bytes = encode_operation(&op).unwrap();
        // 4 + 4 + trustor + inner type + code + bool
        assert_eq!(bytes.len(), 4 + 4 + 32 + 4 + 4 + 4);
        assert_eq!(decode_operation(&bytes).unwrap(), op);
    }

    #[test]
    fn test_allow_trust_native_arm_rejected() {
        let mut writer = Writer::new();
        writer.write_option_flag(false);
        writer.write_u32(OperationType::AllowTrust as u32);
        writer.write_account_id(&account(2));
        writer.write_u32(0);
        assert!(matches!(
            decode_operation(writer.as_bytes()),
            Err(DecodeError::InvalidDiscriminant {
                context: "allow_trust.currency_type",
                value: 0
            })
        ));
    }

    #[test]
    fn test_set_options_roundtrip() {
        let op = Operation::new(OperationBody::SetOptions(SetOptionsOp {
            inflation_dest: Some(account(3)),
            clear_flags: None,
            set_flags: Some(3),
            thresholds: Some(Thresholds {
                master_weight: 1,
                low: 1,
                medium: 2,
                high: 3,
            }),
            signer: Some(Signer {
                pub_key: account(5),
                weight: 1,
            }),
        }));
        let bytes = encode_operation(&op).unwrap();
        assert_eq!(decode_operation(&bytes).unwrap(), op);

        let empty = Operation::new(OperationBody::SetOptions(SetOptionsOp::default()));
        let bytes = encode_operation(&empty).unwrap();
        // source flag, type, five absent optionals
        assert_eq!(bytes.len(), 4 + 4 + 5 * 4);
        assert_eq!(decode_operation(&bytes).unwrap(), empty);
    }

    #[test]
    fn test_create_offer_roundtrip() {
        let op = Operation::new(OperationBody::CreateOffer(CreateOfferOp {
            taker_gets: Currency::Native,
            taker_pays: usd(),
            amount: Amount::new(250).unwrap(),
            price: Price::new(3, 2),
            offer_id: u64::MAX,
        }));
        let bytes = encode_operation(&op).unwrap();
        assert_eq!(decode_operation(&bytes).unwrap(), op);
    }

    #[test]
    fn test_unknown_op_type() {
        let data = [0u8, 0, 0, 0, 0, 0, 0, 42];
        assert!(matches!(
            decode_operation(&data),
            Err(DecodeError::UnknownOperationType { op_type: 42 })
        ));
    }

    #[test]
    fn test_unsupported_op_kind() {
        let data = [0u8, 0, 0, 0, 0, 0, 0, 7];
        assert!(matches!(
            decode_operation(&data),
            Err(DecodeError::UnsupportedOperationKind {
                kind: OperationType::Inflation
            })
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut bytes = encode_operation(&payment(vec![])).unwrap();
        bytes[84..92].copy_from_slice(&(-1i64).to_be_bytes());
        assert!(matches!(
            decode_operation(&bytes),
            Err(DecodeError::NegativeAmount {
                field: "amount",
                value: -1
            })
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_operation(&payment(vec![])).unwrap();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        assert!(matches!(
            decode_operation(&bytes),
            Err(DecodeError::TrailingBytes { len: 4 })
        ));
    }

    #[test]
    fn test_truncated_input_rejected() {
        let bytes = encode_operation(&payment(vec![])).unwrap();
        assert!(matches!(
            decode_operation(&bytes[..bytes.len() - 1]),
            Err(DecodeError::UnexpectedEof { context: "memo" })
        ));
    }

    #[test]
    fn test_base64_roundtrip() {
        let op = payment(vec![usd()]).with_source(account(8));
        let encoded = op.to_xdr_base64().unwrap();
        assert_eq!(Operation::from_xdr_base64(&encoded).unwrap(), op);
        assert!(matches!(
            Operation::from_xdr_base64("not base64!"),
            Err(DecodeError::InvalidBase64(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_every_body_kind_roundtrips(op in strategies::operation()) {
            let bytes = encode_operation(&op).unwrap();
            prop_assert!(bytes.len() <= MAX_OPERATION_SIZE);
            prop_assert_eq!(bytes.len() % 4, 0);
            let decoded = decode_operation(&bytes).unwrap();
            prop_assert_eq!(decoded.op_type(), op.op_type());
            prop_assert_eq!(decoded, op);
        }
    }
}
