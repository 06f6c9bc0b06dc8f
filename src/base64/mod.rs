mod core;


pub use self::core::{Base64Options, WRAP_COLUMNS, decode, encode};
