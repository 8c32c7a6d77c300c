//! Parsing of raw mark text as typed into a form field.

/// Reads the leading integer of `raw`.
///
/// Leading whitespace and one `+`/`-` sign are accepted, then the longest run
/// of ASCII digits is taken and anything after it is ignored, so `"72.9"`
/// reads as `72` and `"85abc"` as `85`.
///
/// Returns `None` when there are no digits or the value overflows `i64`.
pub fn parse_mark(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}
