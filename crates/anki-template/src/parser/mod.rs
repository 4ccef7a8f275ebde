//! Card template parser.
//!
//! This module turns template strings into an AST that the renderer walks.
//! Parsing is pure, so a parsed [`Template`] can be cached and rendered any
//! number of times against different fields.

pub mod ast;
pub mod error;
mod lexer;
mod template;

pub use ast::{Node, Side, Template};
pub use error::ParseError;
pub use template::parse_template;
