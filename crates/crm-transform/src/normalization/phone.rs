//! Contact phone canonicalization.
//!
//! The output shape is `(DD)9DDDDDDDD`: the first two digits in parentheses,
//! an injected mobile prefix `9`, then the remaining digits. The transform is
//! lossy and never fails; short inputs get the same template with fewer
//! digits.

use crm_model::Phone;

/// Digits kept from the end of the contact string. Anything before them
/// (country code, typos) is discarded.
pub const PHONE_DIGIT_WINDOW: usize = 10;

const MOBILE_PREFIX: char = '9';
const AREA_CODE_LEN: usize = 2;

/// Canonicalizes a free-text contact string.
///
/// Returns [`Phone::Unparseable`] only when the input holds no digit.
pub fn canonicalize_phone(raw: &str) -> Phone {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Phone::Unparseable;
    }
    let window = &digits[digits.len().saturating_sub(PHONE_DIGIT_WINDOW)..];
    let split = window.len().min(AREA_CODE_LEN);

    let mut canonical = String::with_capacity(window.len() + 3);
    canonical.push('(');
    canonical.extend(&window[..split]);
    canonical.push(')');
    canonical.push(MOBILE_PREFIX);
    canonical.extend(&window[split..]);
    Phone::Canonical(canonical)
}
