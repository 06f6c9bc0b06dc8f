use crate::common::{CodecError, strip_marks};

/// Default start-of-data mark (Adobe Ascii85).
pub const DEFAULT_PREFIX: &str = "<~";
/// Default end-of-data mark (Adobe Ascii85).
pub const DEFAULT_SUFFIX: &str = "~>";

/// First digit character; a digit's value is `ch - '!'`.
const ASCII_OFFSET: u8 = b'!';

/// Positional weights of the five digits of a group, most significant first.
const POW85: [u64; 5] = [85 * 85 * 85 * 85, 85 * 85 * 85, 85 * 85, 85, 1];

/// Encoder settings. Defaults: no wrapping, no marks, `<~` / `~>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base85Options {
    /// Break lines once this many characters have been written (0 = never).
    pub line_length: usize,
    /// Bracket the output with `prefix` and `suffix`.
    pub use_marks: bool,
    pub prefix: String,
    pub suffix: String,
}

impl Default for Base85Options {
    fn default() -> Self {
        Base85Options {
            line_length: 0,
            use_marks: false,
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl Base85Options {
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_marks(mut self, use_marks: bool) -> Self {
        self.use_marks = use_marks;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Decoder settings. Defaults: marks optional, `<~` / `~>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base85DecodeOptions {
    /// Reject input that does not start with `prefix` and end with `suffix`.
    pub enforce_marks: bool,
    pub prefix: String,
    pub suffix: String,
}

impl Default for Base85DecodeOptions {
    fn default() -> Self {
        Base85DecodeOptions {
            enforce_marks: false,
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl Base85DecodeOptions {
    pub fn enforcing() -> Self {
        Base85DecodeOptions {
            enforce_marks: true,
            ..Default::default()
        }
    }

    pub fn with_marks(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }
}

/// Output buffer that tracks the current column for line wrapping.
struct LineWriter {
    out: Vec<u8>,
    line_length: usize,
    column: usize,
}

impl LineWriter {
    fn new(capacity: usize, line_length: usize) -> Self {
        LineWriter {
            out: Vec::with_capacity(capacity),
            line_length,
            column: 0,
        }
    }

    fn break_line(&mut self) {
        self.out.push(b'\n');
        self.column = 0;
    }

    #[inline]
    fn push_char(&mut self, c: u8) {
        self.out.push(c);
        self.column += 1;
        if self.line_length > 0 && self.column >= self.line_length {
            self.break_line();
        }
    }

    fn push_prefix(&mut self, mark: &str) {
        self.out.extend_from_slice(mark.as_bytes());
        self.column += mark.len();
        if self.line_length > 0 && self.column >= self.line_length {
            self.break_line();
        }
    }

    fn push_suffix(&mut self, mark: &str) {
        if self.line_length > 0 && self.column > 0 && self.column + mark.len() > self.line_length
        {
            self.break_line();
        }
        self.out.extend_from_slice(mark.as_bytes());
        self.column += mark.len();
    }

    fn finish(mut self) -> String {
        // A line that ends exactly at the end of the data needs no break.
        if self.column == 0 && self.out.last() == Some(&b'\n') {
            self.out.pop();
        }
        // SAFETY: digits are ASCII and the marks come from &str.
        unsafe { String::from_utf8_unchecked(self.out) }
    }
}

/// Expand a group into its five digit characters, most significant first.
#[inline]
fn encode_tuple(mut value: u32) -> [u8; 5] {
    let mut chars = [0u8; 5];
    for c in chars.iter_mut().rev() {
        *c = (value % 85) as u8 + ASCII_OFFSET;
        value /= 85;
    }
    chars
}

/// Encode bytes as Ascii85.
///
/// Every aligned all-zero group becomes `z`. A trailing group of `k`
/// bytes is zero-padded and only its first `k + 1` digits are written.
pub fn encode(data: &[u8], opts: &Base85Options) -> Result<String, CodecError> {
    if opts.use_marks && (opts.prefix.is_empty() || opts.suffix.is_empty()) {
        return Err(CodecError::InvalidArgument(
            "base85 prefix and suffix must not be empty",
        ));
    }

    let mut capacity = data.len().div_ceil(4) * 5;
    if opts.use_marks {
        capacity += opts.prefix.len() + opts.suffix.len();
    }
    if opts.line_length > 0 {
        capacity += capacity / opts.line_length + 1;
    }
    let mut w = LineWriter::new(capacity, opts.line_length);

    if opts.use_marks {
        w.push_prefix(&opts.prefix);
    }

    for chunk in data.chunks(4) {
        let mut group = [0u8; 4];
        group[..chunk.len()].copy_from_slice(chunk);
        let tuple = u32::from_be_bytes(group);

        if chunk.len() == 4 && tuple == 0 {
            w.push_char(b'z');
            continue;
        }
        let digits = encode_tuple(tuple);
        for &d in &digits[..chunk.len() + 1] {
            w.push_char(d);
        }
    }

    if opts.use_marks {
        w.push_suffix(&opts.suffix);
    }

    log::trace!("base85: encoded {} bytes", data.len());
    Ok(w.finish())
}

/// Decode Ascii85.
///
/// Marks are stripped whenever present and are mandatory with
/// `enforce_marks`. Line breaks, tabs, NUL, form feed and backspace are
/// skipped between digits.
pub fn decode(input: &str, opts: &Base85DecodeOptions) -> Result<Vec<u8>, CodecError> {
    if opts.enforce_marks {
        if opts.prefix.is_empty() || opts.suffix.is_empty() {
            return Err(CodecError::InvalidArgument(
                "base85 prefix and suffix must not be empty",
            ));
        }
        if !input.starts_with(&opts.prefix) {
            log::debug!("base85: input lacks prefix {:?}", opts.prefix);
            return Err(CodecError::MissingPrefix {
                prefix: opts.prefix.clone(),
            });
        }
        if input.len() < opts.prefix.len() + opts.suffix.len() || !input.ends_with(&opts.suffix)
        {
            log::debug!("base85: input lacks suffix {:?}", opts.suffix);
            return Err(CodecError::MissingSuffix {
                suffix: opts.suffix.clone(),
            });
        }
    }

    let offset = if !opts.prefix.is_empty() && input.starts_with(&opts.prefix) {
        opts.prefix.len()
    } else {
        0
    };
    let body = strip_marks(input, &opts.prefix, &opts.suffix);

    let mut result = Vec::with_capacity(body.len() / 5 * 4 + 4);
    let mut tuple: u64 = 0;
    let mut count = 0usize;

    for (i, ch) in body.char_indices() {
        let pos = offset + i;
        match ch {
            'z' => {
                if count != 0 {
                    log::debug!("base85: 'z' inside a group at {}", pos);
                    return Err(CodecError::MisplacedZero { pos });
                }
                result.extend_from_slice(&[0u8; 4]);
            }
            '\n' | '\r' | '\t' | '\0' | '\x0c' | '\x08' => {}
            '!'..='u' => {
                tuple += u64::from(ch as u8 - ASCII_OFFSET) * POW85[count];
                count += 1;
                if count == 5 {
                    let value = u32::try_from(tuple).map_err(|_| {
                        log::debug!("base85: group overflow ending at {}", pos);
                        CodecError::GroupOverflow { pos }
                    })?;
                    result.extend_from_slice(&value.to_be_bytes());
                    tuple = 0;
                    count = 0;
                }
            }
            _ => {
                log::debug!("base85: invalid character {:?} at {}", ch, pos);
                return Err(CodecError::InvalidCharacter { ch, pos });
            }
        }
    }

    match count {
        0 => {}
        1 => {
            log::debug!("base85: final block of a single character");
            return Err(CodecError::FinalBlockTooShort);
        }
        _ => {
            // Round up past the unseen digits (padding with 'u'), then keep
            // only the bytes the seen digits determine.
            let kept = count - 1;
            tuple += POW85[kept];
            let value = u32::try_from(tuple).map_err(|_| CodecError::GroupOverflow {
                pos: offset + body.len(),
            })?;
            result.extend_from_slice(&value.to_be_bytes()[..kept]);
        }
    }

    Ok(result)
}
