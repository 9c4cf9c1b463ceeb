pub mod transposition_table;

pub use self::transposition_table::*;
