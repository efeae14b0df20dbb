//! Amounts and prices.

use std::fmt;
use std::str::FromStr;

use crate::error::AmountError;

/// A non-negative quantity in the ledger's smallest unit.
///
/// Encoded as an XDR `int64`, so the largest amount is `i64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// The largest representable amount, 9223372036854775807.
    pub const MAX: Amount = Amount(i64::MAX);

    /// Creates an amount, returning `None` for negative values.
    pub const fn new(value: i64) -> Option<Self> {
        if value < 0 { None } else { Some(Self(value)) }
    }

    /// Returns the raw integer value.
    pub const fn value(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a plain decimal integer. No sign, whitespace or separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::InvalidDigit {
                value: s.to_string(),
            });
        }
        // Only digits remain, so the only possible failure is overflow.
        s.parse::<i64>()
            .map(Amount)
            .map_err(|_| AmountError::Overflow {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An offer price as the fraction `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl Price {
    pub const fn new(n: i32, d: i32) -> Self {
        Self { n, d }
    }

    /// Returns true if both terms are positive.
    pub fn is_valid(&self) -> bool {
        self.n > 0 && self.d > 0
    }

    /// Converts a positive decimal string such as `"1.25"` to a price.
    ///
    /// Exact when the reduced fraction fits in `i32`; otherwise the last
    /// continued-fraction convergent whose terms both fit. Semiconvergents
    /// are not considered, so this is not always the closest such fraction.
    pub fn from_decimal(value: &str) -> Result<Self, &'static str> {
        let (whole, frac) = match value.split_once('.') {
            Some((w, f)) => (w, f),
            None => (value, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err("price is empty");
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err("price must be a plain positive decimal");
        }
        // 10^38 overflows u128; anything this precise is beyond i32 anyway.
        if frac.len() > 30 || whole.len() > 30 {
            return Err("price has too many digits");
        }

        let digits = format!("{}{}", whole, frac);
        let numerator: u128 = digits.parse().map_err(|_| "price has too many digits")?;
        let denominator: u128 = 10u128.pow(frac.len() as u32);
        if numerator == 0 {
            return Err("price must be greater than zero");
        }

        best_rational(numerator, denominator).ok_or("price is out of range")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Approximates `num / den` by the last convergent with both terms <= i32::MAX.
fn best_rational(num: u128, den: u128) -> Option<Price> {
    let limit = i32::MAX as u128;
    let g = gcd(num, den);
    let (num, den) = (num / g, den / g);
    if num <= limit && den <= limit {
        return Some(Price::new(num as i32, den as i32));
    }

    // Convergents h/k of the continued fraction of num/den.
    let (mut h_prev, mut h) = (0u128, 1u128);
    let (mut k_prev, mut k) = (1u128, 0u128);
    let (mut p, mut q) = (num, den);
    let mut best = None;

    while q != 0 {
        let a = p / q;
        let h_next = a.checked_mul(h)?.checked_add(h_prev)?;
        let k_next = a.checked_mul(k)?.checked_add(k_prev)?;
        if h_next > limit || k_next > limit {
            break;
        }
        (h_prev, h) = (h, h_next);
        (k_prev, k) = (k, k_next);
        best = Some((h, k));
        (p, q) = (q, p % q);
    }

    match best {
        Some((n, d)) if n > 0 && d > 0 => Some(Price::new(n as i32, d as i32)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!("0".parse::<Amount>().unwrap(), Amount::ZERO);
        assert_eq!("100".parse::<Amount>().unwrap().value(), 100);
        assert_eq!(
            "9223372036854775807".parse::<Amount>().unwrap(),
            Amount::MAX
        );
    }

    #[test]
    fn test_parse_amount_errors() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert!(matches!(
            "-5".parse::<Amount>(),
            Err(AmountError::InvalidDigit { .. })
        ));
        assert!(matches!(
            "+5".parse::<Amount>(),
            Err(AmountError::InvalidDigit { .. })
        ));
        assert!(matches!(
            "1.5".parse::<Amount>(),
            Err(AmountError::InvalidDigit { .. })
        ));
        assert!(matches!(
            "9223372036854775808".parse::<Amount>(),
            Err(AmountError::Overflow { .. })
        ));
    }

    #[test]
    fn test_new_rejects_negative() {
        assert_eq!(Amount::new(-1), None);
        assert_eq!(Amount::new(0), Some(Amount::ZERO));
    }

    #[test]
    fn test_max_displays_exactly() {
        assert_eq!(Amount::MAX.to_string(), "9223372036854775807");
    }

    #[test]
    fn test_price_exact() {
        assert_eq!(Price::from_decimal("1").unwrap(), Price::new(1, 1));
        assert_eq!(Price::from_decimal("1.25").unwrap(), Price::new(5, 4));
        assert_eq!(Price::from_decimal("0.1").unwrap(), Price::new(1, 10));
        assert_eq!(Price::from_decimal(".5").unwrap(), Price::new(1, 2));
        assert_eq!(Price::from_decimal("2.").unwrap(), Price::new(2, 1));
    }

    #[test]
    fn test_price_approximated() {
        // 1/3 to 12 places does not reduce below i32; the convergent is 1/3.
        assert_eq!(Price::from_decimal("0.333333333333").unwrap(), Price::new(1, 3));
        let pi = Price::from_decimal("3.14159265358979").unwrap();
        assert!(pi.is_valid());
        let approx = pi.n as f64 / pi.d as f64;
        assert!((approx - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_price_stops_at_last_fitting_convergent() {
        // 3051757812/6103515625 = [0; 2, 3051757812]. The next convergent
        // overflows i32, so the result is 1/2 even though the
        // semiconvergent 1073741823/2147483647 is closer.
        assert_eq!(Price::from_decimal("0.49999999991808").unwrap(), Price::new(1, 2));
    }

    #[test]
    fn test_price_errors() {
        assert!(Price::from_decimal("").is_err());
        assert!(Price::from_decimal(".").is_err());
        assert!(Price::from_decimal("0").is_err());
        assert!(Price::from_decimal("-1").is_err());
        assert!(Price::from_decimal("1e5").is_err());
        assert!(Price::from_decimal("99999999999").is_err());
    }

    proptest! {
        #[test]
        fn prop_amount_display_parse(v in 0i64..=i64::MAX) {
            let amount = Amount::new(v).unwrap();
            prop_assert_eq!(amount.to_string().parse::<Amount>().unwrap(), amount);
        }
    }
}
