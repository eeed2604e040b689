// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod calc_expr;

pub use calc_expr::{extract_variables, ExprParser, Token};
