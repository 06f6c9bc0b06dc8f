mod core;


pub use self::core::{
    Base85DecodeOptions, Base85Options, DEFAULT_PREFIX, DEFAULT_SUFFIX, decode, encode,
};
