// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(ExprNumber),
    Variable(ExprVariable),
    Binary(ExprOpBinary),
    Call(ExprCall),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNumber {
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprVariable {
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprOpBinary {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprCall {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Expr {
    /// Variable names referenced by the expression, de-duplicated, in the
    /// order they first appear.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(ExprVariable { name }) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            Expr::Binary(ExprOpBinary { left, right, .. }) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expr::Call(ExprCall { args, .. }) => {
                for arg in args {
                    arg.collect_variables(names);
                }
            }
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

// Fully parenthesized, so the tree shape is visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(ExprNumber { value }) => write!(f, "{}", value),
            Expr::Variable(ExprVariable { name }) => f.write_str(name),
            Expr::Binary(ExprOpBinary { op, left, right }) => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Call(ExprCall { name, args }) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
