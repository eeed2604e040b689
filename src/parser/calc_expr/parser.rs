// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use std::ops::Range;

use chumsky::{prelude::*, Stream};

use crate::{
    ast::{BinaryOp, Expr, ExprCall, ExprNumber, ExprOpBinary, ExprVariable},
    error::ExprError,
    functions::Function,
};

use super::lexer::{gen_lexer, lex_error, Token};

/// Compiles calc expression strings into [`Expr`] trees.
///
/// Building the underlying parsers is not free, so one instance is meant to be
/// reused for every expression of a template.
pub struct ExprParser {
    lexer: Box<dyn Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>>>,
    parser: Box<dyn Parser<Token, Expr, Error = Simple<Token>>>,
}

impl ExprParser {
    pub fn new() -> ExprParser {
        let lexer = gen_lexer();
        let parser = gen_calc_expression_parser();
        ExprParser {
            lexer: Box::new(lexer),
            parser: Box::new(parser),
        }
    }

    pub fn tokenize(&self, expr_str: &str) -> Result<Vec<(Token, Range<usize>)>, ExprError> {
        self.lexer.parse(expr_str).map_err(|errs| lex_error(expr_str, errs))
    }

    pub fn parse(&self, expr_str: &str) -> Result<Expr, ExprError> {
        let tokens = self.tokenize(expr_str)?;

        let expr_str_len = expr_str.chars().count();
        let eoi = expr_str_len..expr_str_len + 1;

        let res = self.parser.parse(Stream::from_iter(eoi, tokens.into_iter()));
        let expr = match res {
            Ok(expr) => expr,
            Err(errs) => {
                let message = errs.iter().map(|err| err.to_string()).collect::<Vec<_>>().join("; ");
                return Err(ExprError::Syntax { message });
            }
        };

        check_calls(&expr)?;
        Ok(expr)
    }

    /// Names of the variables an expression refers to, de-duplicated, in
    /// order of first appearance. Only tokenizes, so the expression does not
    /// need to be well formed.
    pub fn extract_variables(&self, expr_str: &str) -> Result<Vec<String>, ExprError> {
        let tokens = self.tokenize(expr_str)?;

        let mut names: Vec<String> = Vec::new();
        for (token, _) in tokens {
            if let Token::Variable(name) = token {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }
}

impl Default for ExprParser {
    fn default() -> Self {
        ExprParser::new()
    }
}

// Function names and argument counts are fixed, so they are checked once here
// rather than on every evaluation.
fn check_calls(expr: &Expr) -> Result<(), ExprError> {
    match expr {
        Expr::Number(_) | Expr::Variable(_) => Ok(()),
        Expr::Binary(ExprOpBinary { left, right, .. }) => {
            check_calls(left)?;
            check_calls(right)
        }
        Expr::Call(ExprCall { name, args }) => {
            let function = Function::from_name(name)?;
            function.check_arity(args.len())?;
            for arg in args {
                check_calls(arg)?;
            }
            Ok(())
        }
    }
}

fn gen_calc_expression_parser() -> impl Parser<Token, Expr, Error = Simple<Token>> {
    let expr = recursive(|expr| {
        let number = select! { Token::Number(value) => value }
            .try_map(|value, span| match value.parse::<f64>() {
                Ok(value) => Ok(Expr::Number(ExprNumber { value })),
                Err(_) => Err(Simple::custom(span, format!("invalid number {}", value))),
            })
            .labelled("number");

        let variable = select! { Token::Variable(name) => Expr::Variable(ExprVariable { name }) }.labelled("variable");

        let call = select! { Token::Function(name) => name }
            .then(
                expr.clone()
                    .separated_by(just(Token::Comma))
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .map(|(name, args)| Expr::Call(ExprCall { name, args }))
            .labelled("function call");

        let group = expr.delimited_by(just(Token::LParen), just(Token::RParen));

        let primary = number.or(variable).or(call).or(group);

        let binary_fold = |left: Expr, (op, right): (BinaryOp, Expr)| {
            Expr::Binary(ExprOpBinary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            })
        };

        let muldiv_op = just(Token::Star).to(BinaryOp::Mul).or(just(Token::Slash).to(BinaryOp::Div));

        let muldiv = primary.clone().then(muldiv_op.then(primary).repeated()).foldl(binary_fold);

        let addsub_op = just(Token::Plus).to(BinaryOp::Add).or(just(Token::Minus).to(BinaryOp::Sub));

        muldiv.clone().then(addsub_op.then(muldiv).repeated()).foldl(binary_fold)
    });

    expr.then_ignore(end())
}
