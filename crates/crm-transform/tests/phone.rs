//! Shape properties of the phone canonicalizer.

use crm_model::Phone;
use crm_transform::canonicalize_phone;
use proptest::prelude::*;

fn canonical(raw: &str) -> String {
    match canonicalize_phone(raw) {
        Phone::Canonical(value) => value,
        Phone::Unparseable => panic!("expected a canonical phone for {raw:?}"),
    }
}

proptest! {
    #[test]
    fn long_inputs_have_the_fixed_width(digits in "[0-9]{11,20}", noise in "[ ()+.-]{0,6}") {
        let raw = format!("{noise}{digits}{noise}");
        let value = canonical(&raw);
        prop_assert_eq!(value.chars().count(), 13);
        prop_assert!(value.starts_with('('));
        prop_assert_eq!(&value[3..5], ")9");
        prop_assert!(digits.ends_with(&value[5..]));
    }

    #[test]
    fn short_inputs_keep_the_template(digits in "[0-9]{2,10}") {
        let value = canonical(&digits);
        prop_assert_eq!(value.len(), digits.len() + 3);
        prop_assert_eq!(&value[..4], format!("({})", &digits[..2]));
        prop_assert_eq!(&value[4..5], "9");
        prop_assert_eq!(&value[5..], &digits[2..]);
    }

    #[test]
    fn canonicalization_is_deterministic(raw in ".{0,30}") {
        prop_assert_eq!(canonicalize_phone(&raw), canonicalize_phone(&raw));
    }
}

#[test]
fn ten_digit_input_embeds_the_mobile_prefix() {
    let value = canonical("1199999888");
    assert_eq!(value, "(11)999999888");
    assert_eq!(value.chars().nth(4), Some('9'));
}

#[test]
fn letters_only_contact_is_unparseable() {
    assert_eq!(canonicalize_phone("n/a"), Phone::Unparseable);
}
