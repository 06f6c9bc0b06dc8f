// fconvert: encode/decode Base16, Base64 and Base85, and normalize numbers

use std::io::{self, Write};
use std::process;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};

use fconvert::base16::{self, LetterCase};
use fconvert::base64::{self, Base64Options};
use fconvert::base85::{self, Base85DecodeOptions, Base85Options, DEFAULT_PREFIX, DEFAULT_SUFFIX};
use fconvert::common::io::{InputData, read_input};
use fconvert::common::{io_error_msg, wrap_width};
use fconvert::numconv;

/// Use mimalloc as the global allocator for the CLI process.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const TOOL_NAME: &str = "fconvert";

#[derive(Parser)]
#[command(
    name = "fconvert",
    about = "Encode or decode FILE, or standard input, to standard output.",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\n\
        Encoded text is written followed by a newline; decoded bytes are\n\
        written as-is. Set FCONVERT_LOG=debug to see why input was rejected.",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hex encoding (RFC4648 section 8)
    Base16 {
        /// Decode data
        #[arg(short = 'd', long = "decode")]
        decode: bool,

        /// Use (or, when decoding, require) lower-case letters
        #[arg(long, conflicts_with = "upper")]
        lower: bool,

        /// When decoding, require upper-case letters
        #[arg(long)]
        upper: bool,

        /// File to process (reads stdin if omitted or -)
        file: Option<String>,
    },

    /// Standard base64 (RFC4648 section 4)
    Base64 {
        /// Decode data
        #[arg(short = 'd', long = "decode")]
        decode: bool,

        /// Wrap encoded lines after 76 characters
        #[arg(short = 'w', long = "wrap")]
        wrap: bool,

        /// Text placed before the payload
        #[arg(long, value_name = "TEXT")]
        prefix: Option<String>,

        /// Text placed after the payload
        #[arg(long, value_name = "TEXT")]
        suffix: Option<String>,

        /// File to process (reads stdin if omitted or -)
        file: Option<String>,
    },

    /// Adobe Ascii85 with 'z' for zero groups
    Base85 {
        /// Decode data
        #[arg(short = 'd', long = "decode")]
        decode: bool,

        /// Wrap encoded lines after COLS characters (0 disables wrapping)
        #[arg(
            short = 'w',
            long = "wrap",
            value_name = "COLS",
            default_value = "0",
            allow_hyphen_values = true
        )]
        wrap: i64,

        /// Write (or, when decoding, require) the prefix and suffix marks
        #[arg(short = 'm', long = "marks")]
        marks: bool,

        /// Start-of-data mark
        #[arg(long, value_name = "TEXT", default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// End-of-data mark
        #[arg(long, value_name = "TEXT", default_value = DEFAULT_SUFFIX)]
        suffix: String,

        /// File to process (reads stdin if omitted or -)
        file: Option<String>,
    },

    /// Validate a decimal number and print its canonical form
    Number {
        /// Numeric type the value must fit
        #[arg(short = 'k', long = "kind", alias = "type", value_enum, default_value = "i64")]
        kind: NumberKind,

        /// Decimal text to check
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NumberKind {
    I32,
    I64,
    U32,
    U64,
    F64,
}

/// Read the whole input and return it as text, for the decoders.
fn read_text(file: Option<&str>) -> anyhow::Result<String> {
    let bytes = read_bytes(file)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| anyhow!("invalid input (not UTF-8)"))?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}

fn read_bytes(file: Option<&str>) -> anyhow::Result<InputData> {
    let filename = file.unwrap_or("-");
    read_input(filename).map_err(|e| {
        if filename == "-" {
            anyhow!("{}", io_error_msg(&e))
        } else {
            anyhow!("{}: {}", filename, io_error_msg(&e))
        }
    })
}

/// Encoded text plus a trailing newline; nothing at all for empty output.
fn write_text(out: &mut impl Write, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Base16 {
            decode,
            lower,
            upper,
            file,
        } => {
            if decode {
                let text = read_text(file.as_deref())?;
                let data = if lower {
                    base16::decode(&text, LetterCase::Lower)?
                } else if upper {
                    base16::decode(&text, LetterCase::Upper)?
                } else {
                    base16::decode_any_case(&text)?
                };
                out.write_all(&data)?;
            } else {
                let data = read_bytes(file.as_deref())?;
                let case = if lower {
                    LetterCase::Lower
                } else {
                    LetterCase::Upper
                };
                write_text(out, &base16::encode(&data, case))?;
            }
        }
        Command::Base64 {
            decode,
            wrap,
            prefix,
            suffix,
            file,
        } => {
            if decode {
                let text = read_text(file.as_deref())?;
                let data = base64::decode(&text, prefix.as_deref(), suffix.as_deref())?;
                out.write_all(&data)?;
            } else {
                let data = read_bytes(file.as_deref())?;
                let opts = Base64Options {
                    wrap,
                    prefix,
                    suffix,
                };
                write_text(out, &base64::encode(&data, &opts))?;
            }
        }
        Command::Base85 {
            decode,
            wrap,
            marks,
            prefix,
            suffix,
            file,
        } => {
            let line_length = wrap_width(wrap)?;
            if decode {
                let text = read_text(file.as_deref())?;
                let opts = Base85DecodeOptions {
                    enforce_marks: marks,
                    prefix,
                    suffix,
                };
                out.write_all(&base85::decode(&text, &opts)?)?;
            } else {
                let data = read_bytes(file.as_deref())?;
                let opts = Base85Options::default()
                    .with_line_length(line_length)
                    .with_marks(marks)
                    .with_prefix(prefix)
                    .with_suffix(suffix);
                write_text(out, &base85::encode(&data, &opts)?)?;
            }
        }
        Command::Number { kind, value } => {
            let text = match kind {
                NumberKind::I32 => numconv::format(numconv::try_parse_i32(&value)?),
                NumberKind::I64 => numconv::format(numconv::try_parse_i64(&value)?),
                NumberKind::U32 => numconv::format(numconv::try_parse_u32(&value)?),
                NumberKind::U64 => numconv::format(numconv::try_parse_u64(&value)?),
                NumberKind::F64 => numconv::format(numconv::try_parse_f64(&value)?),
            };
            write_text(out, &text)?;
        }
    }
    out.flush().context("write error")
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("FCONVERT_LOG", "warn"))
        .format_timestamp(None)
        .init();
}

fn main() {
    fconvert::common::reset_sigpipe();
    init_logging();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = io::BufWriter::with_capacity(1024 * 1024, stdout.lock());

    if let Err(e) = run(cli, &mut out) {
        if let Some(io_err) = e.downcast_ref::<io::Error>()
            && io_err.kind() == io::ErrorKind::BrokenPipe
        {
            process::exit(0);
        }
        log::debug!("{:?}", e);
        eprintln!("{}: {:#}", TOOL_NAME, e);
        process::exit(1);
    }
}
