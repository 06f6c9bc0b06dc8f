use base64_simd::AsOut;

use crate::common::{CodecError, LINE_SEPARATOR, strip_line_breaks, strip_marks, wrap_lines};

const BASE64_ENGINE: &base64_simd::Base64 = &base64_simd::STANDARD;

/// Column at which wrapped output is broken (MIME line length).
pub const WRAP_COLUMNS: usize = 76;

/// Output shape for [`encode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Base64Options {
    /// Break the payload every [`WRAP_COLUMNS`] characters.
    pub wrap: bool,
    /// Literal text placed before the payload.
    pub prefix: Option<String>,
    /// Literal text placed after the payload.
    pub suffix: Option<String>,
}

impl Base64Options {
    pub fn wrapped() -> Self {
        Base64Options {
            wrap: true,
            ..Default::default()
        }
    }

    pub fn with_marks(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self.suffix = Some(suffix.into());
        self
    }
}

/// Encode bytes as standard (RFC 4648, padded) base64.
///
/// With `wrap`, the payload is split into 76-column lines and the prefix
/// and suffix sit on their own lines; without it everything is
/// concatenated directly.
pub fn encode(data: &[u8], opts: &Base64Options) -> String {
    let enc_len = BASE64_ENGINE.encoded_length(data.len());
    let mut buf = vec![0u8; enc_len];
    let encoded = BASE64_ENGINE.encode(data, buf[..].as_out());

    let sep = LINE_SEPARATOR.as_bytes();
    let payload = if opts.wrap {
        wrap_lines(encoded, WRAP_COLUMNS, sep)
    } else {
        encoded.to_vec()
    };

    let extra = opts.prefix.as_ref().map_or(0, |p| p.len() + sep.len())
        + opts.suffix.as_ref().map_or(0, |s| s.len() + sep.len());
    let mut out = Vec::with_capacity(payload.len() + extra);

    let joiner: &[u8] = if opts.wrap { sep } else { b"" };
    let parts = [
        opts.prefix.as_deref().map(str::as_bytes),
        Some(&payload[..]).filter(|p| !p.is_empty()),
        opts.suffix.as_deref().map(str::as_bytes),
    ];
    for part in parts.into_iter().flatten() {
        if !out.is_empty() {
            out.extend_from_slice(joiner);
        }
        out.extend_from_slice(part);
    }

    // SAFETY: base64 output and separators are ASCII; prefix/suffix come from &str.
    unsafe { String::from_utf8_unchecked(out) }
}

/// Decode base64 produced by [`encode`].
///
/// Trailing line breaks are ignored, a matching `prefix`/`suffix` is
/// removed, every remaining `\r`/`\n` is dropped and the rest must be
/// valid padded base64.
pub fn decode(
    input: &str,
    prefix: Option<&str>,
    suffix: Option<&str>,
) -> Result<Vec<u8>, CodecError> {
    let trimmed = input.trim_end_matches(['\r', '\n']);
    let body = strip_marks(trimmed, prefix.unwrap_or(""), suffix.unwrap_or(""));
    let clean = strip_line_breaks(body.as_bytes());
    if clean.is_empty() {
        return Ok(Vec::new());
    }

    BASE64_ENGINE.decode_to_vec(&clean[..]).map_err(|_| {
        log::debug!("base64: decode of {} payload bytes failed", clean.len());
        CodecError::InvalidBase64
    })
}
