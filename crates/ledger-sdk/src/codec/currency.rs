//! Currency encoding/decoding.
//!
//! ```text
//! union Currency switch (uint32 type) {
//!   case 0 /* NATIVE */:  void;
//!   case 1 /* ISO4217 */: struct { opaque currencyCode[4]; AccountID issuer; } isoCI;
//! };
//! ```

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::model::{Currency, CurrencyCode};

pub(crate) const CURRENCY_TYPE_NATIVE: u32 = 0;
pub(crate) const CURRENCY_TYPE_ISO4217: u32 = 1;

/// Decodes a currency union.
pub fn decode_currency(reader: &mut Reader<'_>) -> Result<Currency, DecodeError> {
    match reader.read_u32("currency_type")? {
        CURRENCY_TYPE_NATIVE => Ok(Currency::Native),
        CURRENCY_TYPE_ISO4217 => {
            let code = decode_currency_code(reader)?;
            let issuer = reader.read_account_id("currency_issuer")?;
            Ok(Currency::Iso4217 { code, issuer })
        }
        value => Err(DecodeError::InvalidDiscriminant {
            context: "currency_type",
            value,
        }),
    }
}

/// Decodes the 4-byte padded currency code.
pub fn decode_currency_code(reader: &mut Reader<'_>) -> Result<CurrencyCode, DecodeError> {
    let bytes = reader.read_fixed_opaque::<4>("currency_code")?;
    CurrencyCode::from_bytes(bytes).ok_or(DecodeError::InvalidCurrencyCode { bytes })
}

/// Encodes a currency union.
pub fn encode_currency(writer: &mut Writer, currency: &Currency) {
    match currency {
        Currency::Native => writer.write_u32(CURRENCY_TYPE_NATIVE),
        Currency::Iso4217 { code, issuer } => {
            writer.write_u32(CURRENCY_TYPE_ISO4217);
            writer.write_fixed_opaque(code.as_bytes());
            writer.write_account_id(issuer);
        }
    }
}
