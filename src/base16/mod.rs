mod core;


pub use self::core::{LetterCase, decode, decode_any_case, encode};
