//! Classifies an already-accumulated raw identifier as a numeric literal
//! or `Inf`/`NaN` float, per the regexes in spec.md §4.4. Ported from
//! `str_is_binary`/`str_is_decimal`/`str_is_hexadecimal`/`str_is_octal`/
//! `str_is_float` in `src/lexer/numeric.c`.

use super::token::TokenKind;

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['-', '+']).unwrap_or(s)
}

fn is_binary(s: &str) -> bool {
    let s = strip_sign(s);
    let Some(digits) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b == b'0' || b == b'1')
}

fn is_decimal(s: &str) -> bool {
    let s = strip_sign(s);
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_hexadecimal(s: &str) -> bool {
    let s = strip_sign(s);
    let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_octal(s: &str) -> bool {
    let s = strip_sign(s);
    let Some(digits) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| (b'0'..=b'7').contains(&b))
}

/// `[+-]?` then one of `digits '.' digits`, `digits '.'`, `'.' digits`,
/// `digits` — followed optionally by `[eE][+-]?digits`. Bare `digits`
/// (no dot) is a float only when the exponent is present. `Inf`/`NaN`
/// (with optional sign) are also floats.
fn is_float(s: &str) -> bool {
    let s = strip_sign(s);
    if s == "Inf" || s == "NaN" {
        return true;
    }

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let (whole, frac) = match mantissa.find('.') {
        Some(idx) => (&mantissa[..idx], Some(&mantissa[idx + 1..])),
        None => (mantissa, None),
    };

    let has_dot = frac.is_some();
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let mantissa_ok = if let Some(frac) = frac {
        // `digits '.' digits`, `digits '.'`, or `'.' digits` -- never
        // bare `.` with nothing on either side.
        let whole_ok = whole.is_empty() || all_digits(whole);
        let frac_ok = frac.is_empty() || all_digits(frac);
        whole_ok && frac_ok && !(whole.is_empty() && frac.is_empty())
    } else {
        !whole.is_empty() && all_digits(whole)
    };

    if !mantissa_ok {
        return false;
    }

    match exponent {
        None => has_dot, // bare digits need an exponent to count as a float
        Some(exp) => {
            let exp = strip_sign(exp);
            !exp.is_empty() && exp.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

/// Reclassifies an accumulated raw identifier. Returns `TokenKind::RawIdent`
/// unless the text matches one of the numeric/boolean/float grammars.
#[must_use]
pub fn classify(text: &str) -> TokenKind {
    if text == "true" {
        return TokenKind::True;
    }
    if text == "false" {
        return TokenKind::False;
    }

    match text.as_bytes().first() {
        Some(b'-' | b'+' | b'.' | b'0'..=b'9') => {
            if is_binary(text) {
                TokenKind::IntBin
            } else if is_decimal(text) {
                TokenKind::IntDec
            } else if is_hexadecimal(text) {
                TokenKind::IntHex
            } else if is_octal(text) {
                TokenKind::IntOct
            } else if is_float(text) {
                TokenKind::Float
            } else {
                TokenKind::RawIdent
            }
        }
        Some(b'I' | b'N') if is_float(text) => TokenKind::Float,
        _ => TokenKind::RawIdent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans() {
        assert_eq!(classify("true"), TokenKind::True);
        assert_eq!(classify("false"), TokenKind::False);
    }

    #[test]
    fn decimal() {
        assert_eq!(classify("42"), TokenKind::IntDec);
        assert_eq!(classify("-42"), TokenKind::IntDec);
        assert_eq!(classify("+0"), TokenKind::IntDec);
    }

    #[test]
    fn hex_oct_bin() {
        assert_eq!(classify("0x1A"), TokenKind::IntHex);
        assert_eq!(classify("-0o17"), TokenKind::IntOct);
        assert_eq!(classify("0b101"), TokenKind::IntBin);
    }

    #[test]
    fn floats() {
        assert_eq!(classify("1.5"), TokenKind::Float);
        assert_eq!(classify("1."), TokenKind::Float);
        assert_eq!(classify(".5"), TokenKind::Float);
        assert_eq!(classify("1e10"), TokenKind::Float);
        assert_eq!(classify("1.5e-10"), TokenKind::Float);
        assert_eq!(classify("Inf"), TokenKind::Float);
        assert_eq!(classify("-NaN"), TokenKind::Float);
        // Bare digits with no dot and no exponent are decimal, not float.
        assert_eq!(classify("10"), TokenKind::IntDec);
    }

    #[test]
    fn bare_sign_is_not_numeric() {
        assert_eq!(classify("-"), TokenKind::RawIdent);
        assert_eq!(classify("+"), TokenKind::RawIdent);
        assert_eq!(classify("."), TokenKind::RawIdent);
    }

    #[test]
    fn non_numeric_raw_idents() {
        assert_eq!(classify("hello"), TokenKind::RawIdent);
        assert_eq!(classify("a.b.c"), TokenKind::RawIdent);
        assert_eq!(classify("Name"), TokenKind::RawIdent);
    }
}
