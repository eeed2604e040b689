// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use crate::{
    ast::{BinaryOp, Expr, ExprCall, ExprNumber, ExprOpBinary, ExprVariable},
    error::ExprError,
    functions::Function,
    values::{TemplateValue, TemplateValues},
};

pub struct InterpreterRun<'a> {
    values: &'a TemplateValues,
}

impl<'a> InterpreterRun<'a> {
    pub fn new(values: &'a TemplateValues) -> InterpreterRun<'a> {
        InterpreterRun { values }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Option<f64>, ExprError> {
        match expr {
            Expr::Number(ExprNumber { value }) => Ok(Some(*value)),
            Expr::Variable(variable) => Ok(self.eval_variable(variable)),
            Expr::Binary(binary) => self.eval_binary(binary),
            Expr::Call(call) => self.eval_call(call),
        }
    }

    fn eval_variable(&self, variable: &ExprVariable) -> Option<f64> {
        let value = self.values.get(&variable.name)?;
        if value.is_empty() {
            return None;
        }
        TemplateValue::as_number(value)
    }

    fn eval_binary(&self, binary: &ExprOpBinary) -> Result<Option<f64>, ExprError> {
        // Both sides are always walked so errors surface regardless of which
        // side is missing.
        let left = self.eval(&binary.left)?;
        let right = self.eval(&binary.right)?;

        let (Some(left), Some(right)) = (left, right) else {
            return Ok(None);
        };

        let value = match binary.op {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => {
                if right == 0.0 {
                    return Ok(None);
                }
                left / right
            }
        };
        Ok(Some(value))
    }

    fn eval_call(&self, call: &ExprCall) -> Result<Option<f64>, ExprError> {
        let function = Function::from_name(&call.name)?;
        function.check_arity(call.args.len())?;

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval(arg)?);
        }
        Ok(function.apply(&args))
    }
}
