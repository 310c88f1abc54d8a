//! Text normalization utilities for feed-sourced strings.

use std::borrow::Cow;

use itertools::Itertools as _;

/// Sanitizes the provided feed string.
///
/// Surrounding whitespace is trimmed and literal `\uXXXX` escape sequences
/// (left by some feeds) are decoded. [`None`] is returned for an empty or
/// whitespace-only result.
#[must_use]
pub fn sanitize(input: &str) -> Option<String> {
    let unescaped = unescape_unicode(input.trim());
    let trimmed = unescaped.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Sanitizes the provided optional feed string.
#[must_use]
pub fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.and_then(sanitize)
}

/// Decodes literal `\uXXXX` escape sequences (including UTF-16 surrogate
/// pairs) in the provided string.
///
/// Decoding repeats while it changes anything, so the result never contains
/// a decodable sequence. Malformed or unpaired sequences are left as is.
#[must_use]
pub fn unescape_unicode(input: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(input);
    while let Some(decoded) = unescape_once(&out) {
        out = Cow::Owned(decoded);
    }
    out
}

/// Decodes literal `\uXXXX` escape sequences in a single pass, returning
/// [`None`] if there is nothing to decode.
fn unescape_once(input: &str) -> Option<String> {
    if !input.contains("\\u") {
        return None;
    }

    let mut decoded = false;
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some((ch, len)) = decode_escape(tail) {
            decoded = true;
            out.push(ch);
            rest = &tail[len..];
        } else {
            out.push_str("\\u");
            rest = &tail[2..];
        }
    }
    out.push_str(rest);
    decoded.then_some(out)
}

/// Decodes a single escape at the start of `s`, returning the decoded
/// [`char`] and the number of consumed bytes.
fn decode_escape(s: &str) -> Option<(char, usize)> {
    let high = code_unit(s)?;
    if (0xD800..0xDC00).contains(&high) {
        let low = code_unit(s.get(6..)?)?;
        return char::decode_utf16([high, low])
            .next()?
            .ok()
            .map(|c| (c, 12));
    }
    char::decode_utf16([high]).next()?.ok().map(|c| (c, 6))
}

/// Parses a `\uXXXX` UTF-16 code unit at the start of `s`.
fn code_unit(s: &str) -> Option<u16> {
    let digits = s.strip_prefix("\\u")?.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Trims the provided strings, drops empty ones and case-insensitive
/// duplicates (keeping the first occurrence), and caps the result at `max`
/// items.
pub fn dedup_and_cap<I>(items: I, max: usize) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(|s| {
            let s = s.as_ref().trim();
            (!s.is_empty()).then(|| s.to_owned())
        })
        .unique_by(|s| s.to_lowercase())
        .take(max)
        .collect()
}

/// Checks whether the provided strings are equal ignoring case.
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Checks whether `haystack` contains `needle` ignoring case.
///
/// `needle` is expected to be lowercased already.
#[must_use]
pub fn contains_lowercased(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
