// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod interpreter_run;

use crate::{ast::Expr, error::ExprError, parser::ExprParser, values::TemplateValues};

use interpreter_run::InterpreterRun;

/// Evaluates a compiled expression.
///
/// `Ok(None)` is the normal "no value yet" outcome: a missing variable,
/// division by zero, or a NaN/infinite result.
pub fn evaluate(expr: &Expr, values: &TemplateValues) -> Result<Option<f64>, ExprError> {
    let run = InterpreterRun::new(values);
    let value = run.eval(expr)?;
    Ok(value.filter(|value| value.is_finite()))
}

/// Compiles and evaluates `expr_str`. Malformed expressions are logged and
/// yield `None`, so a broken calc renders blank instead of failing the form.
pub fn evaluate_expression(expr_str: &str, values: &TemplateValues) -> Option<f64> {
    evaluate_expression_with(&ExprParser::new(), expr_str, values)
}

pub fn evaluate_expression_with(parser: &ExprParser, expr_str: &str, values: &TemplateValues) -> Option<f64> {
    let res = parser.parse(expr_str).and_then(|expr| evaluate(&expr, values));
    match res {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(expr = expr_str, error = %err, "failed to evaluate expression");
            None
        }
    }
}
