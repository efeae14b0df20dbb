//! Currencies (ledger assets).

use std::fmt;

use crate::error::CurrencyError;
use crate::limits::CURRENCY_CODE_LEN;
use crate::model::AccountId;

/// A 1 to 4 character alphanumeric currency code, zero padded on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode([u8; CURRENCY_CODE_LEN]);

impl CurrencyCode {
    /// Parses a currency code such as `"USD"`.
    pub fn new(code: &str) -> Result<Self, CurrencyError> {
        let bytes = code.as_bytes();
        if bytes.is_empty()
            || bytes.len() > CURRENCY_CODE_LEN
            || !bytes.iter().all(u8::is_ascii_alphanumeric)
        {
            return Err(CurrencyError::InvalidCode {
                code: code.to_string(),
            });
        }
        let mut padded = [0u8; CURRENCY_CODE_LEN];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(padded))
    }

    /// Builds a code from its padded wire bytes.
    ///
    /// Returns `None` unless the bytes are 1 to 4 alphanumeric characters
    /// followed only by zero padding.
    pub fn from_bytes(bytes: [u8; CURRENCY_CODE_LEN]) -> Option<Self> {
        let len = bytes.iter().position(|b| *b == 0).unwrap_or(CURRENCY_CODE_LEN);
        if len == 0
            || !bytes[..len].iter().all(u8::is_ascii_alphanumeric)
            || bytes[len..].iter().any(|b| *b != 0)
        {
            return None;
        }
        Some(Self(bytes))
    }

    /// Returns the padded wire bytes.
    pub fn as_bytes(&self) -> &[u8; CURRENCY_CODE_LEN] {
        &self.0
    }

    /// Returns the code without padding.
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|b| *b == 0).unwrap_or(CURRENCY_CODE_LEN);
        // Only ASCII alphanumerics are ever stored.
        std::str::from_utf8(&self.0[..len]).unwrap_or_default()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({:?})", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CurrencyCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A ledger asset: the native currency, or a code issued by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Currency {
    Native,
    Iso4217 { code: CurrencyCode, issuer: AccountId },
}

impl Currency {
    /// The network's native currency.
    pub fn native() -> Self {
        Currency::Native
    }

    /// An issued currency, with the issuer given as an address.
    pub fn new(code: &str, issuer: &str) -> Result<Self, CurrencyError> {
        let code = CurrencyCode::new(code)?;
        let issuer = AccountId::from_address(issuer)?;
        Ok(Currency::Iso4217 { code, issuer })
    }

    /// An issued currency from an already resolved issuer.
    pub fn issued(code: CurrencyCode, issuer: AccountId) -> Self {
        Currency::Iso4217 { code, issuer }
    }

    /// Returns true for the native currency.
    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native)
    }

    /// Returns the currency code, or `None` for the native currency.
    pub fn code(&self) -> Option<&CurrencyCode> {
        match self {
            Currency::Native => None,
            Currency::Iso4217 { code, .. } => Some(code),
        }
    }

    /// Returns the issuer, or `None` for the native currency.
    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Currency::Native => None,
            Currency::Iso4217 { issuer, .. } => Some(issuer),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Native => f.write_str("native"),
            Currency::Iso4217 { code, issuer } => write!(f, "{}:{}", code, issuer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_padding() {
        let code = CurrencyCode::new("USD").unwrap();
        assert_eq!(code.as_bytes(), b"USD\0");
        assert_eq!(code.as_str(), "USD");

        let code = CurrencyCode::new("EURT").unwrap();
        assert_eq!(code.as_bytes(), b"EURT");
    }

    #[test]
    fn test_invalid_codes() {
        for bad in ["", "TOOLONG", "U-D", "ÜSD", "A B"] {
            assert!(CurrencyCode::new(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_from_bytes_requires_trailing_padding() {
        assert!(CurrencyCode::from_bytes(*b"USD\0").is_some());
        assert!(CurrencyCode::from_bytes(*b"\0\0\0\0").is_none());
        assert!(CurrencyCode::from_bytes(*b"U\0SD").is_none());
        assert!(CurrencyCode::from_bytes(*b"US$\0").is_none());
    }

    #[test]
    fn test_currency_new() {
        let issuer = AccountId::from_public_key([3u8; 32]);
        let currency = Currency::new("USD", &issuer.address()).unwrap();

        assert!(!currency.is_native());
        assert_eq!(currency.code().map(|c| c.as_str()), Some("USD"));
        assert_eq!(currency.issuer(), Some(&issuer));
        assert_eq!(currency, Currency::issued(CurrencyCode::new("USD").unwrap(), issuer));
    }

    #[test]
    fn test_currency_new_bad_issuer() {
        assert!(matches!(
            Currency::new("USD", "not-an-address"),
            Err(CurrencyError::InvalidIssuer(_))
        ));
    }

    #[test]
    fn test_native() {
        let native = Currency::native();
        assert!(native.is_native());
        assert!(native.code().is_none());
        assert!(native.issuer().is_none());
        assert_eq!(native.to_string(), "native");
    }
}
