//! String primitives behind the text built-ins.
//!
//! Positions and lengths count Unicode scalar values, not bytes.

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s`, or all of `s` if it is shorter.
pub fn left(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// The last `n` characters of `s`, or all of `s` if it is shorter.
pub fn right(s: &str, n: usize) -> String {
    let len = char_len(s);
    s.chars().skip(len.saturating_sub(n)).collect()
}

/// Up to `n` characters starting at 0-based `pos`; empty when `pos` is past the end.
pub fn mid(s: &str, pos: usize, n: usize) -> String {
    s.chars().skip(pos).take(n).collect()
}

/// Characters `[start, end)` of `s` (0-based), clamped to the string.
pub fn substring(s: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    mid(s, start, end - start)
}

/// Splice `new` over the `len` characters starting at 0-based `pos`.
///
/// Returns `None` when `pos + len` runs past the end of `s`.
pub fn replace(s: &str, pos: usize, len: usize, new: &str) -> Option<String> {
    let end = pos.checked_add(len)?;
    if end > char_len(s) {
        return None;
    }
    let mut out: String = s.chars().take(pos).collect();
    out.push_str(new);
    out.extend(s.chars().skip(end));
    Some(out)
}

/// Replace occurrences of `find` in a single left-to-right scan.
///
/// At most `max` replacements are made; `max <= 0` replaces every occurrence. An empty
/// `find` leaves `s` unchanged.
pub fn substitute(s: &str, find: &str, replacement: &str, max: i64) -> String {
    if find.is_empty() {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    let mut count = 0i64;
    while let Some(pos) = rest.find(find) {
        out.push_str(&rest[..pos]);
        out.push_str(replacement);
        rest = &rest[pos + find.len()..];
        count += 1;
        if count == max {
            break;
        }
    }
    out.push_str(rest);
    out
}

/// Longest text, in bytes, that [`repeat`] will build.
pub const MAX_TEXT_LEN: usize = 32 * 1024 * 1024;

/// `s` repeated `n` times, or `None` when the result would exceed [`MAX_TEXT_LEN`] bytes.
pub fn repeat(s: &str, n: usize) -> Option<String> {
    let total = s.len().checked_mul(n)?;
    (total <= MAX_TEXT_LEN).then(|| s.repeat(n))
}

/// 1-based character position of the first `needle` in `haystack` at or after 1-based
/// `start`; 0 when absent.
pub fn find(needle: &str, haystack: &str, start: usize) -> usize {
    let skip = start.saturating_sub(1);
    let byte_start = match haystack.char_indices().nth(skip) {
        Some((i, _)) => i,
        None if needle.is_empty() && skip == char_len(haystack) => haystack.len(),
        None => return 0,
    };
    match haystack[byte_start..].find(needle) {
        Some(byte_pos) => skip + char_len(&haystack[byte_start..byte_start + byte_pos]) + 1,
        None => 0,
    }
}

pub fn len(s: &str) -> usize {
    char_len(s)
}
