// Parser module for extracting type declarations from C/C++ headers

pub mod ast;
pub mod bases;
pub mod declarations;
pub mod lexer;

pub use ast::*;
pub use bases::BaseListParser;
pub use declarations::DeclarationScanner;
pub use lexer::{find_matching_brace, skip_span, Span};
