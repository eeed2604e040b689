// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod lexer;
mod parser;

use crate::error::ExprError;

pub use lexer::Token;
pub use parser::ExprParser;

/// Variables referenced by `expr_str`, without evaluating it.
///
/// Identifiers directly followed by `(` are function names and are not
/// reported.
pub fn extract_variables(expr_str: &str) -> Result<Vec<String>, ExprError> {
    ExprParser::new().extract_variables(expr_str)
}
