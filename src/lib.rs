//! Base16, Base64 and Base85 (Ascii85) codecs over in-memory buffers,
//! plus fast decimal string conversions.
//!
//! Every function is pure: input is borrowed, output is freshly
//! allocated, and malformed input is reported as a [`CodecError`].

#![allow(
    clippy::manual_range_contains,
    clippy::needless_range_loop,
    clippy::identity_op
)]

pub mod base16;
pub mod base64;
pub mod base85;
pub mod common;
pub mod numconv;

pub use common::{CodecError, ErrorKind};
