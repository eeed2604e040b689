// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use crate::error::ExprError;

/// Functions callable from calc expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Min,
    Max,
    Round,
}

impl Function {
    pub fn from_name(name: &str) -> Result<Function, ExprError> {
        match name {
            "min" => Ok(Function::Min),
            "max" => Ok(Function::Max),
            "round" => Ok(Function::Round),
            _ => Err(ExprError::UnknownFunction { name: name.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Min => "min",
            Function::Max => "max",
            Function::Round => "round",
        }
    }

    pub fn check_arity(self, found: usize) -> Result<(), ExprError> {
        let (ok, expected) = match self {
            Function::Min | Function::Max => (found == 2, "2"),
            Function::Round => (found == 1 || found == 2, "1 or 2"),
        };
        if ok {
            Ok(())
        } else {
            Err(ExprError::Arity {
                name: self.name().to_string(),
                expected,
                found,
            })
        }
    }

    /// Applies the function. Any missing or NaN argument makes the whole
    /// call missing. Arity has already been checked at compile time.
    pub fn apply(self, args: &[Option<f64>]) -> Option<f64> {
        let args = args.iter().copied().collect::<Option<Vec<f64>>>()?;
        // f64::min and f64::max drop a NaN operand; a NaN argument must
        // leave the call without a value instead.
        if args.iter().any(|arg| arg.is_nan()) {
            return None;
        }
        match (self, args.as_slice()) {
            (Function::Min, [a, b]) => Some(a.min(*b)),
            (Function::Max, [a, b]) => Some(a.max(*b)),
            (Function::Round, [x]) => Some(round_half_up(*x)),
            (Function::Round, [x, places]) => {
                let factor = 10f64.powf(*places);
                Some(round_half_up(x * factor) / factor)
            }
            _ => None,
        }
    }
}

// Halves round toward positive infinity: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
