use std::borrow::Cow;

use super::error::CodecError;

/// Line separator inserted by the wrapping encoders.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Split `text` into `width`-sized chunks joined by `sep`.
/// The final (possibly short) chunk gets no trailing separator.
/// A `width` of 0 copies the input unchanged.
pub fn wrap_lines(text: &[u8], width: usize, sep: &[u8]) -> Vec<u8> {
    if width == 0 || text.len() <= width {
        return text.to_vec();
    }

    let lines = text.len().div_ceil(width);
    let mut out = Vec::with_capacity(text.len() + (lines - 1) * sep.len());
    let mut chunks = text.chunks(width);
    if let Some(first) = chunks.next() {
        out.extend_from_slice(first);
    }
    for chunk in chunks {
        out.extend_from_slice(sep);
        out.extend_from_slice(chunk);
    }
    out
}

/// Remove every `\r` and `\n` byte. Borrows when there is nothing to strip.
pub fn strip_line_breaks(data: &[u8]) -> Cow<'_, [u8]> {
    if memchr::memchr2(b'\n', b'\r', data).is_none() {
        return Cow::Borrowed(data);
    }

    let mut clean = Vec::with_capacity(data.len());
    let mut last = 0;
    for pos in memchr::memchr2_iter(b'\n', b'\r', data) {
        if pos > last {
            clean.extend_from_slice(&data[last..pos]);
        }
        last = pos + 1;
    }
    if last < data.len() {
        clean.extend_from_slice(&data[last..]);
    }
    Cow::Owned(clean)
}

/// Strip `prefix` from the start and `suffix` from the end of `input`,
/// each only when present. Empty marks are ignored.
pub fn strip_marks<'a>(input: &'a str, prefix: &str, suffix: &str) -> &'a str {
    let mut body = input;
    if !prefix.is_empty() {
        body = body.strip_prefix(prefix).unwrap_or(body);
    }
    if !suffix.is_empty() {
        body = body.strip_suffix(suffix).unwrap_or(body);
    }
    body
}

/// Validate a user supplied wrap column count. Zero disables wrapping.
pub fn wrap_width(value: i64) -> Result<usize, CodecError> {
    usize::try_from(value).map_err(|_| CodecError::OutOfRange {
        name: "line length",
        value,
    })
}
