//! Body-fragment extraction for clipboard-style consumers.
//!
//! Email clients reject pasted content carrying `<html>`/`<head>`/`<body>`
//! wrappers, so callers take the inner body content instead of the full
//! document.

/// Extract the inner content of the document's `<body>` element, trimmed.
///
/// Fail-open: if no body tag is found the input is returned unchanged.
/// Never panics, never errors.
pub fn extract_signature_fragment(html: &str) -> &str {
    let Some(open) = find_ignore_ascii_case(html, "<body", 0) else {
        return html;
    };
    let Some(open_end) = html[open..].find('>') else {
        return html;
    };
    let start = open + open_end + 1;
    let Some(close) = find_ignore_ascii_case(html, "</body", start) else {
        return html;
    };
    html[start..close].trim()
}

/// Byte-wise ASCII-case-insensitive substring search starting at `from`.
///
/// HTML tag names are ASCII, so a byte-window comparison is safe here; a
/// lowercased copy would shift indices for non-ASCII document content.
fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < from || haystack.len() - from < needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| i + from)
}
