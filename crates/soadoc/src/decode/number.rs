/// A number literal converted to the slot type it is stored as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    /// Leading `-`, no fraction, no exponent.
    Int(i64),
    /// Digits only, optionally preceded by `+`.
    UInt(u64),
    /// Has a fraction or an exponent.
    Float(f64),
}

impl Number {
    /// Classifies and converts a lexeme accepted by the scanner.
    ///
    /// Integers that do not fit saturate at the bound of their type instead
    /// of wrapping.
    pub(crate) fn parse(lexeme: &str) -> Self {
        if lexeme.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            return Number::Float(lexeme.parse().unwrap_or(0.0));
        }
        if lexeme.starts_with('-') {
            // a digit run can only fail by being out of range
            Number::Int(lexeme.parse().unwrap_or(i64::MIN))
        } else {
            Number::UInt(lexeme.parse().unwrap_or(u64::MAX))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Number;

    #[rstest]
    #[case("123", Number::UInt(123))]
    #[case("+5", Number::UInt(5))]
    #[case("-123", Number::Int(-123))]
    #[case("-0", Number::Int(0))]
    #[case("1.5", Number::Float(1.5))]
    #[case("1e10", Number::Float(1e10))]
    #[case("-1.0", Number::Float(-1.0))]
    #[case("2E-2", Number::Float(0.02))]
    #[case("18446744073709551615", Number::UInt(u64::MAX))]
    #[case("18446744073709551616", Number::UInt(u64::MAX))]
    #[case("99999999999999999999999", Number::UInt(u64::MAX))]
    #[case("-9223372036854775808", Number::Int(i64::MIN))]
    #[case("-9223372036854775809", Number::Int(i64::MIN))]
    fn classification(#[case] lexeme: &str, #[case] expected: Number) {
        assert_eq!(Number::parse(lexeme), expected);
    }

    #[test]
    fn huge_exponent_is_infinite() {
        assert_eq!(Number::parse("1e400"), Number::Float(f64::INFINITY));
    }
}
