use crate::common::CodecError;

/// Letter case of the hex digits `a`-`f`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LetterCase {
    #[default]
    Upper,
    Lower,
}

/// Pre-computed hex encoding table: byte → 2 hex chars.
const fn build_hex_table(digits: &[u8; 16]) -> [[u8; 2]; 256] {
    let mut table = [[0u8; 2]; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = [digits[(i >> 4) as usize], digits[(i & 0x0F) as usize]];
        i += 1;
    }
    table
}

static HEX_UPPER: [[u8; 2]; 256] = build_hex_table(b"0123456789ABCDEF");
static HEX_LOWER: [[u8; 2]; 256] = build_hex_table(b"0123456789abcdef");

/// Pre-computed decode table for one letter case: char → nibble, 0xFF if invalid.
const fn build_decode_table(letters: u8) -> [u8; 256] {
    let mut table = [0xFFu8; 256];
    let mut i = 0u8;
    while i < 10 {
        table[(b'0' + i) as usize] = i;
        i += 1;
    }
    let mut j = 0u8;
    while j < 6 {
        table[(letters + j) as usize] = 10 + j;
        j += 1;
    }
    table
}

static DECODE_UPPER: [u8; 256] = build_decode_table(b'A');
static DECODE_LOWER: [u8; 256] = build_decode_table(b'a');

/// Encode bytes as hex using the lookup table for `case`.
pub fn encode(data: &[u8], case: LetterCase) -> String {
    let table = match case {
        LetterCase::Upper => &HEX_UPPER,
        LetterCase::Lower => &HEX_LOWER,
    };
    let mut result = Vec::with_capacity(data.len() * 2);
    for &b in data {
        result.extend_from_slice(&table[b as usize]);
    }
    // SAFETY: every table entry is an ASCII hex digit.
    unsafe { String::from_utf8_unchecked(result) }
}

/// Decode hex whose letters must all be in `case`.
/// A letter of the other case is rejected like any other non-hex character.
pub fn decode(input: &str, case: LetterCase) -> Result<Vec<u8>, CodecError> {
    let table = match case {
        LetterCase::Upper => &DECODE_UPPER,
        LetterCase::Lower => &DECODE_LOWER,
    };
    decode_with(input.as_bytes(), |b| table[b as usize])
}

/// Decode hex accepting either letter case, per character.
pub fn decode_any_case(input: &str) -> Result<Vec<u8>, CodecError> {
    decode_with(input.as_bytes(), |b| {
        let v = DECODE_UPPER[b as usize];
        if v != 0xFF { v } else { DECODE_LOWER[b as usize] }
    })
}

fn decode_with(input: &[u8], nibble: impl Fn(u8) -> u8) -> Result<Vec<u8>, CodecError> {
    if !input.len().is_multiple_of(2) {
        log::debug!("base16: rejecting odd-length input ({} chars)", input.len());
        return Err(CodecError::OddLength { len: input.len() });
    }

    let mut result = Vec::with_capacity(input.len() / 2);
    for (i, pair) in input.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0]);
        let lo = nibble(pair[1]);
        if hi == 0xFF || lo == 0xFF {
            let pos = if hi == 0xFF { i * 2 } else { i * 2 + 1 };
            return Err(invalid_char(input, pos));
        }
        result.push((hi << 4) | lo);
    }
    Ok(result)
}

/// Build an `InvalidCharacter` error for the byte at `pos`, reporting the
/// full UTF-8 character when the byte starts one.
fn invalid_char(input: &[u8], pos: usize) -> CodecError {
    let ch = std::str::from_utf8(&input[pos..])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::from(input[pos]));
    log::debug!("base16: invalid character {:?} at {}", ch, pos);
    CodecError::InvalidCharacter { ch, pos }
}
