//! Field-level formatters for government ids and phone numbers.
//!
//! Masks use `X` for a digit slot; every other character is a literal.

pub const SSS_MASK: &str = "XX-XXXXXXX-X";
pub const PAGIBIG_MASK: &str = "XXXX-XXXX-XXXX";
pub const PHILHEALTH_MASK: &str = "XX-XXXXXXXXX-X";
pub const TIN_MASK: &str = "XXX-XXX-XXX";
pub const MOBILE_MASK: &str = "XXX-XXX-XXXX";

const MOBILE_DIGITS: usize = 10;

pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Fill the mask's digit slots with the digits of `value`.
///
/// Formatting stops when the digits run out, so partially typed input stays
/// partial (`"0912"` → `"09-12"`). Extra digits are dropped.
pub fn apply_mask(value: &str, mask: &str) -> String {
    let mut digits = digits_only(value).into_bytes().into_iter();
    let mut out = String::with_capacity(mask.len());
    let mut pending = String::new();

    for slot in mask.chars() {
        if slot == 'X' {
            match digits.next() {
                Some(digit) => {
                    out.push_str(&pending);
                    pending.clear();
                    out.push(digit as char);
                }
                None => break,
            }
        } else {
            pending.push(slot);
        }
    }
    out
}

/// Exact match of `value` against the mask.
pub fn matches_mask(value: &str, mask: &str) -> bool {
    value.len() == mask.len()
        && value.chars().zip(mask.chars()).all(|(v, m)| match m {
            'X' => v.is_ascii_digit(),
            literal => v == literal,
        })
}

pub fn format_sss(value: &str) -> String {
    apply_mask(value, SSS_MASK)
}

pub fn format_pagibig(value: &str) -> String {
    apply_mask(value, PAGIBIG_MASK)
}

pub fn format_philhealth(value: &str) -> String {
    apply_mask(value, PHILHEALTH_MASK)
}

pub fn format_tin(value: &str) -> String {
    apply_mask(value, TIN_MASK)
}

/// Strip the Philippine country code (`+63`/`63`) or trunk prefix (`0`).
///
/// A prefix is only recognised once the digits overflow a local number, so
/// the value survives being re-formatted after every keystroke.
pub fn strip_mobile_prefix(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() > MOBILE_DIGITS {
        if let Some(rest) = digits.strip_prefix("63") {
            return rest.to_string();
        }
        if let Some(rest) = digits.strip_prefix('0') {
            return rest.to_string();
        }
    }
    digits
}

pub fn format_mobile(value: &str) -> String {
    apply_mask(&strip_mobile_prefix(value), MOBILE_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sss_format_and_match() {
        assert_eq!(format_sss("0912345678"), "09-1234567-8");
        assert!(matches_mask("09-1234567-8", SSS_MASK));
        assert!(!matches_mask("9-1234567-8", SSS_MASK));
        assert!(!matches_mask("09-1234567-", SSS_MASK));
    }

    #[test]
    fn test_partial_input_keeps_no_trailing_literal() {
        assert_eq!(format_sss("0912"), "09-12");
        assert_eq!(format_sss("09"), "09");
        assert_eq!(format_tin(""), "");
    }

    #[test]
    fn test_mobile_prefixes() {
        assert_eq!(format_mobile("9171234567"), "917-123-4567");
        assert_eq!(format_mobile("+63 917 123 4567"), "917-123-4567");
        assert_eq!(format_mobile("639171234567"), "917-123-4567");
        assert_eq!(format_mobile("09171234567"), "917-123-4567");
    }

    /// Feed `input` one character at a time, formatting after each key.
    fn type_mobile(input: &str) -> String {
        input.chars().fold(String::new(), |field, key| {
            let mut typed = field;
            typed.push(key);
            format_mobile(&typed)
        })
    }

    #[test]
    fn test_mobile_typed_key_by_key() {
        assert_eq!(type_mobile("+639171234567"), "917-123-4567");
        assert_eq!(type_mobile("639171234567"), "917-123-4567");
        assert_eq!(type_mobile("09171234567"), "917-123-4567");
        assert_eq!(type_mobile("9171234567"), "917-123-4567");
        assert!(matches_mask(&type_mobile("+639171234567"), MOBILE_MASK));
    }

    #[test]
    fn test_mobile_partial_prefix_kept_until_overflow() {
        assert_eq!(format_mobile("+"), "");
        assert_eq!(format_mobile("+63"), "63");
        assert_eq!(format_mobile("0917"), "091-7");
        assert_eq!(format_mobile("639-171-23456"), "917-123-456");
    }

    #[test]
    fn test_other_government_ids() {
        assert_eq!(format_pagibig("123456789012"), "1234-5678-9012");
        assert_eq!(format_philhealth("123456789012"), "12-345678901-2");
        assert_eq!(format_tin("123456789"), "123-456-789");
        assert!(matches_mask("123-456-789", TIN_MASK));
    }
}
