use icu_normalizer::ComposingNormalizerBorrowed;

/// Canonical form used for answer comparison: surrounding whitespace
/// trimmed, composed to NFC, then lowercased.
pub fn normalize(text: &str) -> String {
    let nfc = ComposingNormalizerBorrowed::new_nfc();
    nfc.normalize(text.trim()).to_lowercase()
}

pub fn is_match(submitted: &str, expected: &str) -> bool {
    normalize(submitted) == normalize(expected)
}

/// The first `attempts - 1` characters of `expected`, once more than one
/// wrong attempt has been made.
pub fn hint(expected: &str, attempts: usize) -> Option<String> {
    if attempts <= 1 {
        return None;
    }
    Some(expected.chars().take(attempts - 1).collect())
}
