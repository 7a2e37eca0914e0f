//! Numeric kinds
//!
//! Cadence numbers are carried as decimal strings so 128- and 256-bit values
//! survive JSON untouched.

use crate::error::{FlowError, FlowResult};

/// Decimal places of Fix64 / UFix64
pub const FIXED_POINT_SCALE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Word8,
    Word16,
    Word32,
    Word64,
    Fix64,
    UFix64,
}

const ALL_KINDS: [NumberKind; 20] = [
    NumberKind::Int,
    NumberKind::Int8,
    NumberKind::Int16,
    NumberKind::Int32,
    NumberKind::Int64,
    NumberKind::Int128,
    NumberKind::Int256,
    NumberKind::UInt,
    NumberKind::UInt8,
    NumberKind::UInt16,
    NumberKind::UInt32,
    NumberKind::UInt64,
    NumberKind::UInt128,
    NumberKind::UInt256,
    NumberKind::Word8,
    NumberKind::Word16,
    NumberKind::Word32,
    NumberKind::Word64,
    NumberKind::Fix64,
    NumberKind::UFix64,
];

impl NumberKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Int128 => "Int128",
            Self::Int256 => "Int256",
            Self::UInt => "UInt",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::UInt128 => "UInt128",
            Self::UInt256 => "UInt256",
            Self::Word8 => "Word8",
            Self::Word16 => "Word16",
            Self::Word32 => "Word32",
            Self::Word64 => "Word64",
            Self::Fix64 => "Fix64",
            Self::UFix64 => "UFix64",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|k| k.type_name() == name)
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Int128
                | Self::Int256
                | Self::Fix64
        )
    }

    pub fn is_fixed_point(&self) -> bool {
        matches!(self, Self::Fix64 | Self::UFix64)
    }

    /// Largest positive and negative magnitudes as decimal digits. Fixed-point
    /// limits are in units of 10^-8. `None` for the unbounded `Int` / `UInt`.
    pub fn limits(&self) -> Option<(&'static str, &'static str)> {
        let limits = match self {
            Self::Int | Self::UInt => return None,
            Self::Int8 => ("127", "128"),
            Self::Int16 => ("32767", "32768"),
            Self::Int32 => ("2147483647", "2147483648"),
            Self::Int64 | Self::Fix64 => ("9223372036854775807", "9223372036854775808"),
            Self::Int128 => (
                "170141183460469231731687303715884105727",
                "170141183460469231731687303715884105728",
            ),
            Self::Int256 => (
                "57896044618658097711785492504343953926634992332820282019728792003956564819967",
                "57896044618658097711785492504343953926634992332820282019728792003956564819968",
            ),
            Self::UInt8 | Self::Word8 => ("255", "0"),
            Self::UInt16 | Self::Word16 => ("65535", "0"),
            Self::UInt32 | Self::Word32 => ("4294967295", "0"),
            Self::UInt64 | Self::Word64 | Self::UFix64 => ("18446744073709551615", "0"),
            Self::UInt128 => ("340282366920938463463374607431768211455", "0"),
            Self::UInt256 => (
                "115792089237316195423570985008687907853269984665640564039457584007913129639935",
                "0",
            ),
        };
        Some(limits)
    }

    /// Validate a decimal literal for this kind. Fixed-point values are
    /// normalized to exactly eight fractional digits.
    pub fn normalize(&self, literal: &str) -> FlowResult<String> {
        let invalid = || {
            FlowError::invalid_input(format!(
                "'{}' is not a valid {} literal",
                literal,
                self.type_name()
            ))
        };

        let (negative, digits) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        if negative && !self.is_signed() {
            return Err(invalid());
        }

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) if self.is_fixed_point() => (w, f),
            Some(_) => return Err(invalid()),
            None => (digits, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > FIXED_POINT_SCALE {
            return Err(invalid());
        }

        if let Some((max_positive, max_negative)) = self.limits() {
            let scaled = if self.is_fixed_point() {
                format!("{}{:0<scale$}", whole, fraction, scale = FIXED_POINT_SCALE)
            } else {
                whole.to_string()
            };
            let limit = if negative { max_negative } else { max_positive };
            if !within(&scaled, limit) {
                return Err(FlowError::invalid_input(format!(
                    "{} is out of range for {}",
                    literal,
                    self.type_name()
                )));
            }
        }

        let sign = if negative { "-" } else { "" };
        if self.is_fixed_point() {
            Ok(format!("{}{}.{:0<scale$}", sign, whole, fraction, scale = FIXED_POINT_SCALE))
        } else {
            Ok(format!("{}{}", sign, whole))
        }
    }
}

/// Compare unsigned decimal digit strings without parsing
fn within(digits: &str, limit: &str) -> bool {
    let digits = digits.trim_start_matches('0');
    match digits.len().cmp(&limit.len()) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => digits <= limit,
    }
}

impl std::fmt::Display for NumberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_normalized() {
        assert_eq!(NumberKind::UFix64.normalize("10").unwrap(), "10.00000000");
        assert_eq!(NumberKind::UFix64.normalize("0.5").unwrap(), "0.50000000");
        assert_eq!(NumberKind::Fix64.normalize("-1.25").unwrap(), "-1.25000000");
    }

    #[test]
    fn test_rejects_bad_literals() {
        assert!(NumberKind::UInt8.normalize("-1").is_err());
        assert!(NumberKind::UFix64.normalize("-1.0").is_err());
        assert!(NumberKind::Int.normalize("1.5").is_err());
        assert!(NumberKind::UFix64.normalize("1.123456789").is_err());
        assert!(NumberKind::Int.normalize("").is_err());
        assert!(NumberKind::Int.normalize("12a").is_err());
        assert!(NumberKind::UFix64.normalize(".5").is_err());
    }

    #[test]
    fn test_integer_bounds() {
        let cases = [
            (NumberKind::Int8, "127", "128", Some(("-128", "-129"))),
            (NumberKind::Int16, "32767", "32768", Some(("-32768", "-32769"))),
            (NumberKind::Int32, "2147483647", "2147483648", Some(("-2147483648", "-2147483649"))),
            (
                NumberKind::Int64,
                "9223372036854775807",
                "9223372036854775808",
                Some(("-9223372036854775808", "-9223372036854775809")),
            ),
            (
                NumberKind::Int128,
                "170141183460469231731687303715884105727",
                "170141183460469231731687303715884105728",
                Some((
                    "-170141183460469231731687303715884105728",
                    "-170141183460469231731687303715884105729",
                )),
            ),
            (
                NumberKind::Int256,
                "57896044618658097711785492504343953926634992332820282019728792003956564819967",
                "57896044618658097711785492504343953926634992332820282019728792003956564819968",
                Some((
                    "-57896044618658097711785492504343953926634992332820282019728792003956564819968",
                    "-57896044618658097711785492504343953926634992332820282019728792003956564819969",
                )),
            ),
            (NumberKind::UInt8, "255", "256", None),
            (NumberKind::UInt16, "65535", "65536", None),
            (NumberKind::UInt32, "4294967295", "4294967296", None),
            (NumberKind::UInt64, "18446744073709551615", "18446744073709551616", None),
            (
                NumberKind::UInt128,
                "340282366920938463463374607431768211455",
                "340282366920938463463374607431768211456",
                None,
            ),
            (
                NumberKind::UInt256,
                "115792089237316195423570985008687907853269984665640564039457584007913129639935",
                "115792089237316195423570985008687907853269984665640564039457584007913129639936",
                None,
            ),
            (NumberKind::Word8, "255", "256", None),
            (NumberKind::Word16, "65535", "65536", None),
            (NumberKind::Word32, "4294967295", "4294967296", None),
            (NumberKind::Word64, "18446744073709551615", "18446744073709551616", None),
        ];

        for (kind, max, over, negative) in cases {
            assert!(kind.normalize(max).is_ok(), "{} {}", kind, max);
            assert!(kind.normalize(over).is_err(), "{} {}", kind, over);
            if let Some((min, under)) = negative {
                assert!(kind.normalize(min).is_ok(), "{} {}", kind, min);
                assert!(kind.normalize(under).is_err(), "{} {}", kind, under);
            }
        }

        assert!(NumberKind::UInt8.normalize("300").is_err());
    }

    #[test]
    fn test_fixed_point_bounds() {
        assert!(NumberKind::UFix64.normalize("184467440737.09551615").is_ok());
        assert!(NumberKind::UFix64.normalize("184467440737.09551616").is_err());
        assert!(NumberKind::UFix64.normalize("999999999999999.0").is_err());

        assert!(NumberKind::Fix64.normalize("92233720368.54775807").is_ok());
        assert!(NumberKind::Fix64.normalize("92233720368.54775808").is_err());
        assert!(NumberKind::Fix64.normalize("-92233720368.54775808").is_ok());
        assert!(NumberKind::Fix64.normalize("-92233720368.54775809").is_err());
    }

    #[test]
    fn test_unbounded_kinds() {
        let huge = "9".repeat(100);
        assert!(NumberKind::Int.normalize(&huge).is_ok());
        assert!(NumberKind::UInt.normalize(&huge).is_ok());
        assert!(NumberKind::Int.normalize(&format!("-{}", huge)).is_ok());
    }

    #[test]
    fn test_type_names_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(NumberKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(NumberKind::from_type_name("Float"), None);
    }
}
