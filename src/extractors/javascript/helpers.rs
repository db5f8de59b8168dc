//! Literal helpers for JavaScript lowering
//!
//! String escape processing and numeric literal evaluation. Both are lenient:
//! malformed escapes are kept verbatim rather than rejected.

use super::syntax::Field;

/// Evaluate a numeric literal; BigInts stay textual
pub(crate) fn parse_numeric_literal(raw: &str) -> Field {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();

    if let Some(digits) = cleaned.strip_suffix('n') {
        return Field::Str(digits.to_string());
    }

    let lower = cleaned.to_ascii_lowercase();
    let radix_value = |prefix: &str, radix: u32| {
        lower
            .strip_prefix(prefix)
            .and_then(|digits| u64::from_str_radix(digits, radix).ok())
            .map(|value| value as f64)
    };

    let value = radix_value("0x", 16)
        .or_else(|| radix_value("0o", 8))
        .or_else(|| radix_value("0b", 2))
        .or_else(|| legacy_octal(&lower))
        .or_else(|| lower.parse::<f64>().ok());

    match value {
        Some(value) => Field::Number(value),
        None => Field::Null,
    }
}

/// `017` style octal; `019` falls back to decimal
fn legacy_octal(literal: &str) -> Option<f64> {
    let digits = literal.strip_prefix('0')?;
    if digits.is_empty() || !digits.chars().all(|c| ('0'..='7').contains(&c)) {
        return None;
    }
    u64::from_str_radix(digits, 8).ok().map(|value| value as f64)
}

/// Resolve escape sequences in string and template text
pub(crate) fn cook_string(raw: &str) -> String {
    let mut cooked = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            cooked.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            cooked.push('\\');
            break;
        };
        match escaped {
            'n' => cooked.push('\n'),
            't' => cooked.push('\t'),
            'r' => cooked.push('\r'),
            'b' => cooked.push('\u{8}'),
            'f' => cooked.push('\u{c}'),
            'v' => cooked.push('\u{b}'),
            '0' if !chars.peek().is_some_and(|next| next.is_ascii_digit()) => cooked.push('\0'),
            // Line continuation
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut cooked, &hex, "\\x");
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut cooked, &hex, "\\u");
            }
            other => cooked.push(other),
        }
    }

    cooked
}

fn push_code_point(out: &mut String, hex: &str, prefix: &str) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            out.push_str(prefix);
            out.push_str(hex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals() {
        assert_eq!(parse_numeric_literal("42"), Field::Number(42.0));
        assert_eq!(parse_numeric_literal("0xff"), Field::Number(255.0));
        assert_eq!(parse_numeric_literal("0B101"), Field::Number(5.0));
        assert_eq!(parse_numeric_literal("0o17"), Field::Number(15.0));
        assert_eq!(parse_numeric_literal("017"), Field::Number(15.0));
        assert_eq!(parse_numeric_literal("019"), Field::Number(19.0));
        assert_eq!(parse_numeric_literal("1_000.5"), Field::Number(1000.5));
        assert_eq!(parse_numeric_literal("1e3"), Field::Number(1000.0));
        assert_eq!(parse_numeric_literal(".5"), Field::Number(0.5));
        assert_eq!(parse_numeric_literal("10n"), Field::str("10"));
    }

    #[test]
    fn test_cook_string_escapes() {
        assert_eq!(cook_string(r"a\nb"), "a\nb");
        assert_eq!(cook_string(r"\x41B\u{43}"), "ABC");
        assert_eq!(cook_string(r"it\'s"), "it's");
        assert_eq!(cook_string("line\\\ncontinued"), "linecontinued");
        assert_eq!(cook_string(r"\0"), "\0");
        assert_eq!(cook_string(r"\uZZZZ"), r"\uZZZZ");
    }
}
