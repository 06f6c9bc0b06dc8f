use std::str::FromStr;

use crate::common::CodecError;

// ======================== Fast path ========================
//
// The parse_* functions below assume the caller already knows the input is
// a canonical decimal for the target type. They never panic: malformed
// digits and overflow simply wrap. Use the try_parse_* wrappers for
// untrusted input.

#[inline]
fn split_sign(s: &[u8]) -> (bool, &[u8]) {
    match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, s),
    }
}

#[inline]
fn accumulate_u32(digits: &[u8]) -> u32 {
    digits.iter().fold(0u32, |acc, &d| {
        acc.wrapping_mul(10)
            .wrapping_add(u32::from(d.wrapping_sub(b'0')))
    })
}

#[inline]
fn accumulate_u64(digits: &[u8]) -> u64 {
    digits.iter().fold(0u64, |acc, &d| {
        acc.wrapping_mul(10)
            .wrapping_add(u64::from(d.wrapping_sub(b'0')))
    })
}

/// Parse a pre-validated decimal `i32`. `i32::MIN` parses exactly: its
/// magnitude wraps to itself on negation.
pub fn parse_i32(s: &str) -> i32 {
    let (neg, digits) = split_sign(s.as_bytes());
    let v = accumulate_u32(digits) as i32;
    if neg { v.wrapping_neg() } else { v }
}

/// Parse a pre-validated decimal `i64`.
pub fn parse_i64(s: &str) -> i64 {
    let (neg, digits) = split_sign(s.as_bytes());
    let v = accumulate_u64(digits) as i64;
    if neg { v.wrapping_neg() } else { v }
}

/// Parse a pre-validated decimal `u32`.
pub fn parse_u32(s: &str) -> u32 {
    accumulate_u32(s.as_bytes())
}

/// Parse a pre-validated decimal `u64`.
pub fn parse_u64(s: &str) -> u64 {
    accumulate_u64(s.as_bytes())
}

/// Exact powers of ten representable in an f64.
const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Largest integer every smaller integer of which is exact in an f64.
const MAX_EXACT_MANTISSA: u64 = 1 << 53;

/// Mantissa digits that always fit in a u64.
const MAX_MANTISSA_DIGITS: usize = 19;

/// Parse a pre-validated decimal floating-point number:
/// `-`? digits [`.` digits] [`e`|`E` [`+`|`-`] digits].
///
/// Small mantissas with small decimal exponents are computed with a
/// single exact multiply or divide, which rounds correctly. Everything
/// else goes through the standard library's correctly rounded parser.
/// Input outside the grammar (including `inf`, `NaN` and a leading `+`)
/// yields NaN.
pub fn parse_f64(s: &str) -> f64 {
    fast_f64(s.as_bytes()).unwrap_or_else(|| {
        if is_decimal_float(s.as_bytes()) {
            s.parse::<f64>().unwrap_or(f64::NAN)
        } else {
            f64::NAN
        }
    })
}

fn fast_f64(s: &[u8]) -> Option<f64> {
    let (neg, rest) = split_sign(s);
    let mut mantissa = 0u64;
    let mut ndigits = 0usize;
    let mut frac_digits = 0i32;
    let mut i = 0;

    while i < rest.len() && rest[i].is_ascii_digit() {
        if ndigits == MAX_MANTISSA_DIGITS {
            return None;
        }
        mantissa = mantissa * 10 + u64::from(rest[i] - b'0');
        ndigits += 1;
        i += 1;
    }

    if i < rest.len() && rest[i] == b'.' {
        i += 1;
        while i < rest.len() && rest[i].is_ascii_digit() {
            if ndigits == MAX_MANTISSA_DIGITS {
                return None;
            }
            mantissa = mantissa * 10 + u64::from(rest[i] - b'0');
            ndigits += 1;
            frac_digits += 1;
            i += 1;
        }
    }
    if ndigits == 0 {
        return None;
    }

    let mut exponent = 0i32;
    if i < rest.len() && (rest[i] == b'e' || rest[i] == b'E') {
        i += 1;
        let exp_neg = match rest.get(i) {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };
        let start = i;
        while i < rest.len() && rest[i].is_ascii_digit() {
            exponent = exponent.saturating_mul(10).saturating_add(i32::from(rest[i] - b'0'));
            i += 1;
        }
        if i == start {
            return None;
        }
        if exp_neg {
            exponent = -exponent;
        }
    }
    if i != rest.len() {
        return None;
    }

    let value = if mantissa == 0 {
        0.0
    } else {
        if mantissa > MAX_EXACT_MANTISSA {
            return None;
        }
        let scale = exponent.saturating_sub(frac_digits);
        let m = mantissa as f64;
        match scale {
            0..=22 => m * POW10[scale as usize],
            -22..=-1 => m / POW10[(-scale) as usize],
            _ => return None,
        }
    };
    Some(if neg { -value } else { value })
}

// ======================== Validating wrappers ========================

/// Integer types with an unchecked fast path and a digit count below
/// which that path cannot overflow.
trait FastInt: FromStr {
    const SIGNED: bool;
    const SAFE_DIGITS: usize;
    fn parse_fast(s: &str) -> Self;
}

impl FastInt for i32 {
    const SIGNED: bool = true;
    const SAFE_DIGITS: usize = 9;
    fn parse_fast(s: &str) -> Self {
        parse_i32(s)
    }
}

impl FastInt for i64 {
    const SIGNED: bool = true;
    const SAFE_DIGITS: usize = 18;
    fn parse_fast(s: &str) -> Self {
        parse_i64(s)
    }
}

impl FastInt for u32 {
    const SIGNED: bool = false;
    const SAFE_DIGITS: usize = 9;
    fn parse_fast(s: &str) -> Self {
        parse_u32(s)
    }
}

impl FastInt for u64 {
    const SIGNED: bool = false;
    const SAFE_DIGITS: usize = 19;
    fn parse_fast(s: &str) -> Self {
        parse_u64(s)
    }
}

fn invalid(s: &str) -> CodecError {
    log::debug!("numconv: rejecting {:?}", s);
    CodecError::InvalidNumber {
        input: s.to_string(),
    }
}

fn try_parse_int<T: FastInt>(s: &str) -> Result<T, CodecError> {
    let digits = if T::SIGNED {
        s.strip_prefix('-').unwrap_or(s)
    } else {
        s
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(s));
    }
    if digits.len() <= T::SAFE_DIGITS {
        return Ok(T::parse_fast(s));
    }
    s.parse::<T>().map_err(|_| CodecError::NumberOutOfRange {
        input: s.to_string(),
    })
}

/// Parse an untrusted decimal `i32`: optional `-`, at least one digit,
/// nothing else.
pub fn try_parse_i32(s: &str) -> Result<i32, CodecError> {
    try_parse_int(s)
}

pub fn try_parse_i64(s: &str) -> Result<i64, CodecError> {
    try_parse_int(s)
}

/// Parse an untrusted decimal `u32`. A sign is never accepted.
pub fn try_parse_u32(s: &str) -> Result<u32, CodecError> {
    try_parse_int(s)
}

pub fn try_parse_u64(s: &str) -> Result<u64, CodecError> {
    try_parse_int(s)
}

/// Check the decimal float grammar accepted by [`parse_f64`].
fn is_decimal_float(s: &[u8]) -> bool {
    let (_, rest) = split_sign(s);
    let int_len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut i = int_len;
    let mut frac_len = 0;
    if rest.get(i) == Some(&b'.') {
        i += 1;
        frac_len = rest[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        i += frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return false;
    }
    if matches!(rest.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(rest.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_len = rest[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_len == 0 {
            return false;
        }
        i += exp_len;
    }
    i == rest.len()
}

/// Parse an untrusted decimal float. Values too large for an f64 are a
/// range error rather than infinity.
pub fn try_parse_f64(s: &str) -> Result<f64, CodecError> {
    if !is_decimal_float(s.as_bytes()) {
        return Err(invalid(s));
    }
    let value = parse_f64(s);
    if !value.is_finite() {
        return Err(CodecError::NumberOutOfRange {
            input: s.to_string(),
        });
    }
    Ok(value)
}

// ======================== Formatting ========================

/// Invariant-culture decimal text for a number: no grouping, no leading
/// zeros, `-` only for negatives.
pub trait FormatDecimal {
    fn to_decimal(&self) -> String;
}

macro_rules! impl_format_int {
    ($($t:ty),*) => {
        $(
            impl FormatDecimal for $t {
                #[inline]
                fn to_decimal(&self) -> String {
                    let mut buf = itoa::Buffer::new();
                    buf.format(*self).to_owned()
                }
            }
        )*
    };
}

impl_format_int!(i32, i64, u32, u64);

/// Decimal exponents outside this range switch float output to
/// scientific notation.
const PLAIN_EXPONENTS: std::ops::Range<i32> = -4..15;

impl FormatDecimal for f64 {
    /// Shortest digits that parse back to the same value. Plain notation
    /// for exponents in `PLAIN_EXPONENTS`, otherwise `1.5E+300` style
    /// with at least two exponent digits. Non-finite values use the
    /// invariant names.
    fn to_decimal(&self) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        } else if *self == f64::INFINITY {
            return "Infinity".to_string();
        } else if *self == f64::NEG_INFINITY {
            return "-Infinity".to_string();
        }

        // `{:E}` yields the shortest round-trip digits, e.g. "1.5E-7".
        let sci = format!("{:E}", self);
        let Some((mantissa, exp)) = sci.split_once('E') else {
            return self.to_string();
        };
        let exp: i32 = exp.parse().unwrap_or(0);
        if PLAIN_EXPONENTS.contains(&exp) {
            return self.to_string();
        }
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", mantissa, sign, exp.unsigned_abs())
    }
}

/// Format any supported number as decimal text.
pub fn format<T: FormatDecimal>(value: T) -> String {
    value.to_decimal()
}
