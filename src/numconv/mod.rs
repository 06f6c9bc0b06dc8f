mod core;


pub use self::core::{FormatDecimal, format};
pub use self::core::{parse_f64, parse_i32, parse_i64, parse_u32, parse_u64};
pub use self::core::{try_parse_f64, try_parse_i32, try_parse_i64, try_parse_u32, try_parse_u64};
