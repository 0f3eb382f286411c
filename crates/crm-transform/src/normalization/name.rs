//! Full-name text cleanup.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Drops everything up to and including the first `+` or `.`.
///
/// Spreadsheet operators mark titles and salutations this way ("Sr. Fulano",
/// "+ Fulano").
fn strip_prefix_marker(raw: &str) -> &str {
    match raw.find(['+', '.']) {
        Some(pos) => raw[pos + 1..].trim_start(),
        None => raw,
    }
}

/// ASCII letters, whitespace and the Latin-1 letter block.
fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || ch.is_whitespace()
        || (('\u{00C0}'..='\u{00FF}').contains(&ch) && ch != '\u{00D7}' && ch != '\u{00F7}')
}

/// Upper-case Latin-1 letters that have no canonical decomposition.
///
/// Input is already upper-cased, which also turns `ß` into `SS`; the arm
/// covers callers that pass mixed-case text.
fn transliterate(ch: char) -> Option<&'static str> {
    match ch {
        'ß' => Some("SS"),
        'Æ' => Some("AE"),
        'Ø' => Some("O"),
        'Ð' => Some("D"),
        'Þ' => Some("TH"),
        _ => None,
    }
}

/// Removes accents: NFD decomposition, then combining marks are dropped.
pub fn strip_diacritics(value: &str) -> String {
    let mut plain = String::with_capacity(value.len());
    for ch in value.nfd().filter(|ch| !is_combining_mark(*ch)) {
        match transliterate(ch) {
            Some(replacement) => plain.push_str(replacement),
            None => plain.push(ch),
        }
    }
    plain
}

/// Cleans a raw full name: prefix marker, non-letters, accents, outer spaces.
pub fn clean_name_text(raw: &str) -> String {
    let letters: String = strip_prefix_marker(raw)
        .chars()
        .map(|ch| if is_name_char(ch) { ch } else { ' ' })
        .collect();
    strip_diacritics(&letters).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_up_to_first_marker() {
        assert_eq!(clean_name_text("+ João da Silva."), "Joao da Silva");
        assert_eq!(clean_name_text("SR. JOSÉ PEREIRA"), "JOSE PEREIRA");
        assert_eq!(clean_name_text("DRA. ANA. LIMA"), "ANA  LIMA");
    }

    #[test]
    fn replaces_digits_and_symbols_with_spaces() {
        assert_eq!(clean_name_text("MARIA-CLARA 2 SOUZA"), "MARIA CLARA   SOUZA");
        assert_eq!(clean_name_text("ANA × LIMA"), "ANA   LIMA");
    }

    #[test]
    fn removes_accents_from_upper_case_names() {
        assert_eq!(clean_name_text("CONCEIÇÃO ÁVILA"), "CONCEICAO AVILA");
        assert_eq!(strip_diacritics("Ñandú"), "Nandu");
        assert_eq!(strip_diacritics("STRAßE"), "STRASSE");
    }

    #[test]
    fn upper_cased_pipeline_input_is_transliterated() {
        let upper = "Ørsted Æbelø Straße".to_uppercase();
        assert_eq!(clean_name_text(&upper), "ORSTED AEBELO STRASSE");
        assert_eq!(clean_name_text("ÐÓRA ÞOR"), "DORA THOR");
    }

    #[test]
    fn empty_and_marker_only_inputs_become_empty() {
        assert_eq!(clean_name_text(""), "");
        assert_eq!(clean_name_text("..."), "");
        assert_eq!(clean_name_text("+"), "");
    }
}
