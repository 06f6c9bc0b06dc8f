use thiserror::Error;

/// Broad class of a [`CodecError`], used by callers to map failures
/// to messages or exit codes without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed encoded input.
    Format,
    /// Invalid parameter passed to an encode/decode entry point.
    Argument,
    /// Bounded parameter or value outside its accepted domain.
    Range,
}

/// Errors reported by the codecs and numeric conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid input (odd length {len} for base16 decoding)")]
    OddLength { len: usize },

    #[error("invalid character {ch:?} at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    #[error("the character 'z' is invalid inside a base85 group (position {pos})")]
    MisplacedZero { pos: usize },

    #[error("the last block of base85 data cannot be a single character")]
    FinalBlockTooShort,

    #[error("base85 group ending at position {pos} does not fit in 32 bits")]
    GroupOverflow { pos: usize },

    #[error("encoded data should begin with '{prefix}'")]
    MissingPrefix { prefix: String },

    #[error("encoded data should end with '{suffix}'")]
    MissingSuffix { suffix: String },

    #[error("invalid base64 input")]
    InvalidBase64,

    #[error("invalid number: '{input}'")]
    InvalidNumber { input: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: i64 },

    #[error("number out of range: '{input}'")]
    NumberOutOfRange { input: String },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::InvalidArgument(_) => ErrorKind::Argument,
            CodecError::OutOfRange { .. } | CodecError::NumberOutOfRange { .. } => {
                ErrorKind::Range
            }
            _ => ErrorKind::Format,
        }
    }
}
