use url::Url;

/// Width of a fingerprint in hexadecimal digits.
pub const FINGERPRINT_WIDTH: usize = 8;

/// Fingerprint the query and fragment of a URL.
///
/// The query text (without `?`) and the fragment text (without `#`) are concatenated and
/// hashed with [`fingerprint_str`]. URLs without a query or fragment yield an empty string.
pub fn fingerprint(url: &Url) -> String {
    let mut text = String::new();
    text.push_str(url.query().unwrap_or(""));
    text.push_str(url.fragment().unwrap_or(""));
    fingerprint_str(&text)
}

/// Hash a string into an 8 digit lowercase hexadecimal fingerprint.
///
/// The string is folded over its UTF-16 code units with `hash * 31 + unit` in wrapping
/// 32-bit signed arithmetic; the absolute value is printed in hex and left-padded with
/// zeros. The empty string has an empty fingerprint.
pub fn fingerprint_str(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let hash = text.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });

    // i32::MIN has no positive counterpart in i32.
    let magnitude = i64::from(hash).unsigned_abs();
    let mut hex = format!("{magnitude:0width$x}", width = FINGERPRINT_WIDTH);
    hex.truncate(FINGERPRINT_WIDTH);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_empty_fingerprint() {
        assert_eq!(fingerprint_str(""), "");
        let url = Url::parse("http://site/foo").unwrap();
        assert_eq!(fingerprint(&url), "");
    }

    #[test]
    fn short_hashes_are_left_padded() {
        assert_eq!(fingerprint_str("a"), "00000061");
        assert_eq!(fingerprint_str("q=1"), "0001afc5");
        assert_eq!(fingerprint_str("id=42"), "05f60480");
    }

    #[test]
    fn negative_hashes_use_absolute_value() {
        assert_eq!(fingerprint_str("page=2&sort=desc"), "1fd46a92");
        assert_eq!(
            fingerprint_str("utm_source=newsletter&utm_medium=email"),
            "70cacc21"
        );
    }

    #[test]
    fn hashes_utf16_code_units() {
        // The emoji is a surrogate pair and contributes two units.
        assert_eq!(fingerprint_str("é=😀"), "0085dcd7");
    }

    #[test]
    fn minimum_hash_does_not_overflow() {
        let magnitude = i64::from(i32::MIN).unsigned_abs();
        assert_eq!(format!("{magnitude:08x}"), "80000000");
    }

    #[test]
    fn query_and_fragment_are_concatenated() {
        let split = Url::parse("http://site/app.js?v=1.2.3#top").unwrap();
        let joined = Url::parse("http://site/app.js?v=1.2.3top").unwrap();
        assert_eq!(fingerprint(&split), "566bb39e");
        assert_eq!(fingerprint(&split), fingerprint(&joined));
    }

    #[test]
    fn fragment_alone_produces_fingerprint() {
        let url = Url::parse("http://site/page#a").unwrap();
        assert_eq!(fingerprint(&url), "00000061");
    }
}
