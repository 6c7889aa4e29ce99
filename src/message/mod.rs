mod nom_parser;
mod parse;
mod types;

pub use self::nom_parser::{parse_line, ParsedLine};
pub use self::parse::MAX_MIDDLE_ARGS;
pub use self::types::{Message, Rename};
