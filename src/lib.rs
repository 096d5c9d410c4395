//! Parses American English number phrases ("negative nine hundred eighty seven
//! million ...") into signed integers, and spells integers back out.

pub mod analyzer;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod spell;

pub use config::{Config, ParseOptions};
pub use errors::{ErrorKind, NumberError};
pub use parser::ast::Scale;
pub use parser::{
    parse_digit, parse_multiple_of_ten, parse_number, parse_number_with, parse_teen, parse_triple,
};
pub use spell::spell;
